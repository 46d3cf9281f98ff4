use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

use crate::node::Span;

/// A broken cross-field invariant found when a script is finalized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("entry workflow #{index} is not one of the script's {len} workflow(s)")]
    EntryNotInWorkflows { index: usize, len: usize },

    #[error("entry workflow #{index} was issued by another script")]
    ForeignEntry { index: usize },

    #[error("entry workflow must be unnamed, found workflow `{name}`")]
    EntryIsNamed { name: String, span: Span },

    #[error("entry workflow defined more than once")]
    DuplicateEntry {
        first: Option<Span>,
        second: Option<Span>,
    },

    #[error("output block defined more than once")]
    DuplicateOutputs { first: Span, second: Span },

    #[error("shebang defined more than once: `{first}` replaced by `{second}`")]
    DuplicateShebang { first: String, second: String },
}

impl ValidationError {
    /// The primary location of the error, when one is known.
    pub fn span(&self) -> Option<&Span> {
        match self {
            ValidationError::EntryNotInWorkflows { .. } => None,
            ValidationError::ForeignEntry { .. } => None,
            ValidationError::EntryIsNamed { span, .. } => Some(span),
            ValidationError::DuplicateEntry { second, .. } => second.as_ref(),
            ValidationError::DuplicateOutputs { second, .. } => Some(second),
            ValidationError::DuplicateShebang { .. } => None,
        }
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let mut labels = Vec::new();
        if let Some(span) = self.span() {
            labels.push(Label::primary(file_id, span.clone()));
        }
        let first = match self {
            ValidationError::DuplicateEntry { first, .. } => first.clone(),
            ValidationError::DuplicateOutputs { first, .. } => Some(first.clone()),
            _ => None,
        };
        if let Some(first) = first {
            labels.push(Label::secondary(file_id, first).with_message("first defined here"));
        }

        let notes = match self {
            ValidationError::EntryIsNamed { .. } => {
                vec!["the entry workflow is the one declared as `workflow { ... }`".to_string()]
            }
            ValidationError::DuplicateEntry { .. } | ValidationError::DuplicateOutputs { .. } => {
                vec!["a script may declare at most one".to_string()]
            }
            _ => Vec::new(),
        };

        Diagnostic::error()
            .with_message(self.to_string())
            .with_labels(labels)
            .with_notes(notes)
    }
}
