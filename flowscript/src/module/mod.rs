use crate::decl::ClassNode;

/// The host module a script is compiled into.
/// Owns the type declarations (classes) the host grammar produced for the source.
#[derive(Debug, Clone, Default)]
pub struct ModuleNode {
    /// The source file ID (for error reporting with codespan-reporting).
    pub file_id: usize,
    classes: Vec<ClassNode>,
}

impl ModuleNode {
    pub fn new(file_id: usize) -> Self {
        ModuleNode {
            file_id,
            classes: Vec::new(),
        }
    }

    pub fn add_class(&mut self, class: ClassNode) {
        self.classes.push(class);
    }

    /// All classes in the order they were added, enum or not.
    pub fn classes(&self) -> &[ClassNode] {
        &self.classes
    }
}
