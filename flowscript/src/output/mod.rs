use std::fmt;

use crate::decl::OutputNode;
use crate::node::Span;

/// The workflow `output { }` block: an ordered list of output declarations.
/// Built once from a fully parsed list and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputBlockNode {
    declarations: Vec<OutputNode>,
    span: Span,
}

impl OutputBlockNode {
    pub fn new(declarations: Vec<OutputNode>, span: Span) -> Self {
        OutputBlockNode { declarations, span }
    }

    /// Output declarations in source order.
    pub fn declarations(&self) -> &[OutputNode] {
        &self.declarations
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for OutputBlockNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output {{")?;
        for (i, declaration) in self.declarations.iter().enumerate() {
            let separator = if i == 0 { " " } else { "; " };
            write!(f, "{}{}", separator, declaration)?;
        }
        write!(f, " }}")
    }
}
