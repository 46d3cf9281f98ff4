use std::ops::Deref;

use crate::error::ValidationError;
use crate::script::{Overwrite, ScriptNode};

/// A script whose invariants have been checked by [`ScriptNode::finalize`].
/// Read-only: only `&ScriptNode` is reachable through it.
#[derive(Debug, Clone)]
pub struct Script {
    node: ScriptNode,
}

impl Script {
    /// Give the node back for further building. It must be finalized again.
    pub fn into_inner(self) -> ScriptNode {
        self.node
    }
}

impl Deref for Script {
    type Target = ScriptNode;

    fn deref(&self) -> &ScriptNode {
        &self.node
    }
}

impl ScriptNode {
    /// Check the invariants the builder does not enforce:
    /// each single-valued slot was set at most once, and the entry was
    /// issued by this script and refers to an unnamed member of `workflows`.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for overwrite in self.overwrites() {
            errors.push(match overwrite {
                Overwrite::Shebang { replaced, by } => ValidationError::DuplicateShebang {
                    first: replaced.clone(),
                    second: by.clone(),
                },
                Overwrite::Entry { replaced, by } => ValidationError::DuplicateEntry {
                    first: self.workflow(*replaced).map(|w| w.span.clone()),
                    second: self.workflow(*by).map(|w| w.span.clone()),
                },
                Overwrite::Outputs { replaced, by } => ValidationError::DuplicateOutputs {
                    first: replaced.clone(),
                    second: by.clone(),
                },
            });
        }

        if let Some(id) = self.entry_id() {
            match self.workflow(id) {
                None if !self.owns(id) => {
                    errors.push(ValidationError::ForeignEntry { index: id.index() })
                }
                None => errors.push(ValidationError::EntryNotInWorkflows {
                    index: id.index(),
                    len: self.workflows().len(),
                }),
                Some(workflow) => {
                    if let Some(name) = &workflow.name {
                        errors.push(ValidationError::EntryIsNamed {
                            name: name.clone(),
                            span: workflow.span.clone(),
                        });
                    }
                }
            }
        }

        tracing::debug!(errors = errors.len(), "validated script");
        errors
    }

    /// Validate and seal the script. Errors are returned in the order found.
    pub fn finalize(self) -> Result<Script, Vec<ValidationError>> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(Script { node: self })
        } else {
            Err(errors)
        }
    }
}
