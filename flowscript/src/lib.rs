pub mod decl;
pub mod error;
pub mod module;
pub mod node;
pub mod output;
pub mod script;

pub use error::ValidationError;
pub use node::{NodeKind, Span};
pub use output::OutputBlockNode;
pub use script::validate::Script;
pub use script::{Declaration, ScriptNode, WorkflowId};
