pub mod declaration;
pub mod validate;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::decl::{
    ClassNode, FeatureFlagNode, FunctionNode, IncludeNode, ParamNode, ProcessNode, WorkflowNode,
};
use crate::module::ModuleNode;
use crate::node::Span;
use crate::output::OutputBlockNode;

pub use declaration::Declaration;

static NEXT_SCRIPT: AtomicU64 = AtomicU64::new(0);

/// Index of a workflow within the workflow list of the script that issued it.
/// Only handed out by [`ScriptNode::add_workflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkflowId {
    script: u64,
    index: usize,
}

impl WorkflowId {
    pub fn index(self) -> usize {
        self.index
    }
}

/// A value replaced by a repeated call to one of the single-valued setters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Overwrite {
    Shebang { replaced: String, by: String },
    Entry { replaced: WorkflowId, by: WorkflowId },
    Outputs { replaced: Span, by: Span },
}

/// The top-level AST node for one parsed script.
///
/// Populated incrementally by the parser, one declaration at a time. Each
/// category keeps its append order; [`ScriptNode::declarations`] gives the
/// canonical interleaving. Mutators never reject input: cross-field
/// invariants are checked by [`ScriptNode::finalize`].
#[derive(Debug, Clone)]
pub struct ScriptNode {
    /// Stamped into every `WorkflowId` this node hands out. Clones share it.
    script: u64,
    module: ModuleNode,
    shebang: Option<String>,
    feature_flags: Vec<FeatureFlagNode>,
    includes: Vec<IncludeNode>,
    params: Vec<ParamNode>,
    entry: Option<WorkflowId>,
    outputs: Option<OutputBlockNode>,
    workflows: Vec<WorkflowNode>,
    processes: Vec<ProcessNode>,
    functions: Vec<FunctionNode>,
    overwrites: Vec<Overwrite>,
}

impl ScriptNode {
    pub fn new(file_id: usize) -> Self {
        Self::with_module(ModuleNode::new(file_id))
    }

    /// Wrap a module the host front-end already created (and may have
    /// populated with classes).
    pub fn with_module(module: ModuleNode) -> Self {
        ScriptNode {
            script: NEXT_SCRIPT.fetch_add(1, Ordering::Relaxed),
            module,
            shebang: None,
            feature_flags: Vec::new(),
            includes: Vec::new(),
            params: Vec::new(),
            entry: None,
            outputs: None,
            workflows: Vec::new(),
            processes: Vec::new(),
            functions: Vec::new(),
            overwrites: Vec::new(),
        }
    }

    /// All script declarations in canonical order:
    /// feature flags, includes, params, the entry workflow, the output block,
    /// the remaining workflows, processes, functions, then enums.
    ///
    /// Recomputed on every call.
    pub fn declarations(&self) -> Vec<Declaration<'_>> {
        let mut declarations = Vec::new();
        declarations.extend(self.feature_flags.iter().map(Declaration::FeatureFlag));
        declarations.extend(self.includes.iter().map(Declaration::Include));
        declarations.extend(self.params.iter().map(Declaration::Param));
        if let Some(entry) = self.entry() {
            declarations.push(Declaration::Entry(entry));
        }
        if let Some(outputs) = &self.outputs {
            declarations.push(Declaration::Outputs(outputs));
        }
        let entry_index = self.entry.and_then(|id| self.owned_index(id));
        declarations.extend(
            self.workflows
                .iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != entry_index)
                .map(|(_, workflow)| Declaration::Workflow(workflow)),
        );
        declarations.extend(self.processes.iter().map(Declaration::Process));
        declarations.extend(self.functions.iter().map(Declaration::Function));
        declarations.extend(self.enums().map(Declaration::Enum));

        tracing::trace!(count = declarations.len(), "computed canonical declarations");
        declarations
    }

    // -- accessors --

    pub fn module(&self) -> &ModuleNode {
        &self.module
    }

    pub fn file_id(&self) -> usize {
        self.module.file_id
    }

    pub fn shebang(&self) -> Option<&str> {
        self.shebang.as_deref()
    }

    pub fn feature_flags(&self) -> &[FeatureFlagNode] {
        &self.feature_flags
    }

    pub fn includes(&self) -> &[IncludeNode] {
        &self.includes
    }

    pub fn params(&self) -> &[ParamNode] {
        &self.params
    }

    /// The entry workflow, if one is set and refers to a member of `workflows`.
    pub fn entry(&self) -> Option<&WorkflowNode> {
        self.entry.and_then(|id| self.workflow(id))
    }

    pub fn entry_id(&self) -> Option<WorkflowId> {
        self.entry
    }

    pub fn outputs(&self) -> Option<&OutputBlockNode> {
        self.outputs.as_ref()
    }

    /// All workflows in append order, including the entry workflow.
    pub fn workflows(&self) -> &[WorkflowNode] {
        &self.workflows
    }

    /// The workflow `id` refers to. `None` for ids issued by another script.
    pub fn workflow(&self, id: WorkflowId) -> Option<&WorkflowNode> {
        self.owned_index(id).map(|index| &self.workflows[index])
    }

    /// Whether `id` was issued by this script.
    pub fn owns(&self, id: WorkflowId) -> bool {
        id.script == self.script
    }

    fn owned_index(&self, id: WorkflowId) -> Option<usize> {
        (self.owns(id) && id.index < self.workflows.len()).then_some(id.index)
    }

    pub fn processes(&self) -> &[ProcessNode] {
        &self.processes
    }

    pub fn functions(&self) -> &[FunctionNode] {
        &self.functions
    }

    pub fn classes(&self) -> &[ClassNode] {
        self.module.classes()
    }

    /// Enum-kind classes in their original order.
    pub fn enums(&self) -> impl Iterator<Item = &ClassNode> {
        self.module.classes().iter().filter(|class| class.is_enum())
    }

    // -- mutators --

    /// Set the interpreter directive. A repeated call replaces the previous value.
    pub fn set_shebang(&mut self, shebang: impl Into<String>) {
        let shebang = shebang.into();
        if let Some(replaced) = self.shebang.replace(shebang.clone()) {
            tracing::debug!(%replaced, by = %shebang, "shebang overwritten");
            self.overwrites.push(Overwrite::Shebang {
                replaced,
                by: shebang,
            });
        }
    }

    pub fn add_feature_flag(&mut self, feature_flag: FeatureFlagNode) {
        self.feature_flags.push(feature_flag);
    }

    pub fn add_include(&mut self, include: IncludeNode) {
        self.includes.push(include);
    }

    pub fn add_param(&mut self, param: ParamNode) {
        self.params.push(param);
    }

    /// Append a workflow and return its id, which can be passed to [`ScriptNode::set_entry`].
    pub fn add_workflow(&mut self, workflow: WorkflowNode) -> WorkflowId {
        let id = WorkflowId {
            script: self.script,
            index: self.workflows.len(),
        };
        self.workflows.push(workflow);
        id
    }

    /// Designate a workflow as the entry. Not checked against `workflows` here.
    pub fn set_entry(&mut self, entry: WorkflowId) {
        if let Some(replaced) = self.entry.replace(entry) {
            tracing::debug!(
                replaced = replaced.index(),
                by = entry.index(),
                "entry workflow overwritten"
            );
            self.overwrites.push(Overwrite::Entry {
                replaced,
                by: entry,
            });
        }
    }

    pub fn set_outputs(&mut self, outputs: OutputBlockNode) {
        let by = outputs.span().clone();
        if let Some(replaced) = self.outputs.replace(outputs) {
            tracing::debug!(?by, "output block overwritten");
            self.overwrites.push(Overwrite::Outputs {
                replaced: replaced.span().clone(),
                by,
            });
        }
    }

    pub fn add_process(&mut self, process: ProcessNode) {
        self.processes.push(process);
    }

    pub fn add_function(&mut self, function: FunctionNode) {
        self.functions.push(function);
    }

    pub fn add_class(&mut self, class: ClassNode) {
        self.module.add_class(class);
    }

    pub(crate) fn overwrites(&self) -> &[Overwrite] {
        &self.overwrites
    }
}
