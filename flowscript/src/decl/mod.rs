pub mod class;
pub mod include;

use std::fmt;

use crate::node::Span;

pub use class::{ClassKind, ClassNode};
pub use include::{IncludeEntry, IncludeNode};

/// A feature flag assignment: `nextflow.enable.strict = true`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFlagNode {
    /// Dotted flag name, e.g. `nextflow.preview.output`.
    pub name: String,
    /// Assigned value as written in source.
    pub value: String,
    pub span: Span,
}

impl FeatureFlagNode {
    pub fn new(name: impl Into<String>, value: impl Into<String>, span: Span) -> Self {
        FeatureFlagNode {
            name: name.into(),
            value: value.into(),
            span,
        }
    }
}

/// A script parameter: `params.input = 'data/*.fq'`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamNode {
    pub name: String,
    /// Default value expression as written in source, if any.
    pub default: Option<String>,
    pub span: Span,
}

impl ParamNode {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        ParamNode {
            name: name.into(),
            default: None,
            span,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A workflow definition. The entry workflow is the one without a name.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowNode {
    pub name: Option<String>,
    pub span: Span,
}

impl WorkflowNode {
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        WorkflowNode {
            name: Some(name.into()),
            span,
        }
    }

    pub fn unnamed(span: Span) -> Self {
        WorkflowNode { name: None, span }
    }

    pub fn is_unnamed(&self) -> bool {
        self.name.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessNode {
    pub name: String,
    pub span: Span,
}

impl ProcessNode {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        ProcessNode {
            name: name.into(),
            span,
        }
    }
}

/// A function definition: `def name(a, b) { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    pub name: String,
    pub parameters: Vec<String>,
    pub span: Span,
}

impl FunctionNode {
    pub fn new(name: impl Into<String>, parameters: Vec<String>, span: Span) -> Self {
        FunctionNode {
            name: name.into(),
            parameters,
            span,
        }
    }
}

/// A single declaration inside an `output { }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputNode {
    pub name: String,
    pub span: Span,
}

impl OutputNode {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        OutputNode {
            name: name.into(),
            span,
        }
    }
}

// One-line headers, as a formatter would print the first line of each declaration.

impl fmt::Display for FeatureFlagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feature {} = {}", self.name, self.value)
    }
}

impl fmt::Display for ParamNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "param {}", self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

impl fmt::Display for WorkflowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "workflow {}", name),
            None => write!(f, "workflow"),
        }
    }
}

impl fmt::Display for ProcessNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "process {}", self.name)
    }
}

impl fmt::Display for FunctionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}({})", self.name, self.parameters.join(", "))
    }
}

impl fmt::Display for OutputNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
