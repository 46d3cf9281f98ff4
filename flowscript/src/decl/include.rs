use std::fmt;

use crate::node::Span;

/// A module include: `include { A; B as C } from './modules/align'`.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeNode {
    /// The module source path, as written.
    pub source: String,
    pub entries: Vec<IncludeEntry>,
    pub span: Span,
}

/// One imported name, optionally aliased.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeEntry {
    pub name: String,
    pub alias: Option<String>,
}

impl IncludeNode {
    pub fn new(source: impl Into<String>, entries: Vec<IncludeEntry>, span: Span) -> Self {
        IncludeNode {
            source: source.into(),
            entries,
            span,
        }
    }
}

impl IncludeEntry {
    pub fn new(name: impl Into<String>) -> Self {
        IncludeEntry {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        IncludeEntry {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// The name this entry is visible under in the including script.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for IncludeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} as {}", self.name, alias),
            None => f.write_str(&self.name),
        }
    }
}

impl fmt::Display for IncludeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "include {{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            let separator = if i == 0 { " " } else { "; " };
            write!(f, "{}{}", separator, entry)?;
        }
        write!(f, " }} from '{}'", self.source)
    }
}
