use std::fmt;

use crate::decl::{
    ClassNode, FeatureFlagNode, FunctionNode, IncludeNode, ParamNode, ProcessNode, WorkflowNode,
};
use crate::node::{NodeKind, Span};
use crate::output::OutputBlockNode;

/// One element of a script's canonical declaration list.
/// Borrows from the [`ScriptNode`](crate::ScriptNode) that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Declaration<'a> {
    FeatureFlag(&'a FeatureFlagNode),
    Include(&'a IncludeNode),
    Param(&'a ParamNode),
    /// The entry workflow, listed ahead of the output block and other workflows.
    Entry(&'a WorkflowNode),
    Outputs(&'a OutputBlockNode),
    Workflow(&'a WorkflowNode),
    Process(&'a ProcessNode),
    Function(&'a FunctionNode),
    Enum(&'a ClassNode),
}

impl<'a> Declaration<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Declaration::FeatureFlag(_) => NodeKind::FeatureFlag,
            Declaration::Include(_) => NodeKind::Include,
            Declaration::Param(_) => NodeKind::Param,
            Declaration::Entry(_) | Declaration::Workflow(_) => NodeKind::Workflow,
            Declaration::Outputs(_) => NodeKind::Output,
            Declaration::Process(_) => NodeKind::Process,
            Declaration::Function(_) => NodeKind::Function,
            Declaration::Enum(_) => NodeKind::Enum,
        }
    }

    pub fn span(&self) -> &'a Span {
        match self {
            Declaration::FeatureFlag(node) => &node.span,
            Declaration::Include(node) => &node.span,
            Declaration::Param(node) => &node.span,
            Declaration::Entry(node) | Declaration::Workflow(node) => &node.span,
            Declaration::Outputs(node) => node.span(),
            Declaration::Process(node) => &node.span,
            Declaration::Function(node) => &node.span,
            Declaration::Enum(node) => &node.span,
        }
    }

    /// The declared name. Includes, output blocks and unnamed workflows have none.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Declaration::FeatureFlag(node) => Some(node.name.as_str()),
            Declaration::Param(node) => Some(node.name.as_str()),
            Declaration::Entry(node) | Declaration::Workflow(node) => node.name.as_deref(),
            Declaration::Process(node) => Some(node.name.as_str()),
            Declaration::Function(node) => Some(node.name.as_str()),
            Declaration::Enum(node) => Some(node.name.as_str()),
            Declaration::Include(_) | Declaration::Outputs(_) => None,
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, Declaration::Entry(_))
    }
}

impl fmt::Display for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::FeatureFlag(node) => fmt::Display::fmt(node, f),
            Declaration::Include(node) => fmt::Display::fmt(node, f),
            Declaration::Param(node) => fmt::Display::fmt(node, f),
            Declaration::Entry(node) | Declaration::Workflow(node) => fmt::Display::fmt(node, f),
            Declaration::Outputs(node) => fmt::Display::fmt(node, f),
            Declaration::Process(node) => fmt::Display::fmt(node, f),
            Declaration::Function(node) => fmt::Display::fmt(node, f),
            Declaration::Enum(node) => fmt::Display::fmt(node, f),
        }
    }
}
