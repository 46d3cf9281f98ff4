use std::fmt;
use std::ops::Range;

/// Byte span in source for error reporting.
pub type Span = Range<usize>;

/// Discriminator shared by every top-level declaration unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    FeatureFlag,
    Include,
    Param,
    Workflow,
    Output,
    Process,
    Function,
    Enum,
}

impl NodeKind {
    /// The keyword a script uses to introduce this kind of declaration.
    pub fn keyword(&self) -> &'static str {
        match self {
            NodeKind::FeatureFlag => "feature",
            NodeKind::Include => "include",
            NodeKind::Param => "param",
            NodeKind::Workflow => "workflow",
            NodeKind::Output => "output",
            NodeKind::Process => "process",
            NodeKind::Function => "function",
            NodeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
