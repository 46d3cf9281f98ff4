use std::fmt;

use crate::node::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// `enum Color { RED, GREEN }`
    Enum,
    /// Any other class-like type the host grammar produces.
    Class,
}

/// A type declaration held by the module's class list.
/// Only enum-kind classes are script declarations; the rest belong to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassNode {
    pub name: String,
    pub kind: ClassKind,
    /// Enum constants, in declaration order. Empty for non-enum classes.
    pub constants: Vec<String>,
    pub span: Span,
}

impl ClassNode {
    pub fn enumeration(name: impl Into<String>, constants: Vec<String>, span: Span) -> Self {
        ClassNode {
            name: name.into(),
            kind: ClassKind::Enum,
            constants,
            span,
        }
    }

    pub fn class(name: impl Into<String>, span: Span) -> Self {
        ClassNode {
            name: name.into(),
            kind: ClassKind::Class,
            constants: Vec::new(),
            span,
        }
    }

    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }
}

impl fmt::Display for ClassNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ClassKind::Enum => write!(f, "enum {} {{ {} }}", self.name, self.constants.join(", ")),
            ClassKind::Class => write!(f, "class {}", self.name),
        }
    }
}
