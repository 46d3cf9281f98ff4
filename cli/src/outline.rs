//! Script outlines: a TOML listing of a script's declarations in source order.
//!
//! ```toml
//! shebang = "#!/usr/bin/env nextflow"
//!
//! [[declaration]]
//! kind = "process"
//! name = "ALIGN"
//!
//! [[declaration]]
//! kind = "workflow"      # no name: the entry workflow
//! ```
//!
//! Loading an outline replays it into a [`ScriptNode`] one declaration at a
//! time, the way a parser populates the node.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use flowscript::decl::{
    ClassNode, FeatureFlagNode, FunctionNode, IncludeEntry, IncludeNode, OutputNode, ParamNode,
    ProcessNode, WorkflowNode,
};
use flowscript::{OutputBlockNode, ScriptNode};

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid outline: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Shebang {
    One(String),
    /// Repeated interpreter lines, replayed in order.
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub struct Outline {
    #[serde(default)]
    pub shebang: Option<Shebang>,

    /// Each table keeps the byte span it occupies in the outline text.
    #[serde(default, rename = "declaration")]
    pub declarations: Vec<toml::Spanned<OutlineDeclaration>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncludeName {
    Plain(String),
    Aliased { name: String, alias: String },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutlineDeclaration {
    Feature {
        name: String,
        #[serde(default = "default_flag_value")]
        value: toml::Value,
    },
    Include {
        from: String,
        #[serde(default)]
        names: Vec<IncludeName>,
    },
    Param {
        name: String,
        #[serde(default)]
        default: Option<toml::Value>,
    },
    Workflow {
        #[serde(default)]
        name: Option<String>,
        /// Defaults to true for unnamed workflows.
        #[serde(default)]
        entry: Option<bool>,
    },
    Output {
        #[serde(default)]
        names: Vec<String>,
    },
    Process {
        name: String,
    },
    Function {
        name: String,
        #[serde(default)]
        params: Vec<String>,
    },
    Enum {
        name: String,
        #[serde(default)]
        values: Vec<String>,
    },
    Class {
        name: String,
    },
}

fn default_flag_value() -> toml::Value {
    toml::Value::Boolean(true)
}

/// Render a TOML value the way it would be written in a script.
fn script_literal(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

impl Outline {
    pub fn parse(source: &str) -> Result<Self, OutlineError> {
        Ok(toml::from_str(source)?)
    }

    /// Replay the outline into a fresh script node for `file_id`.
    pub fn build(&self, file_id: usize) -> ScriptNode {
        let mut script = ScriptNode::new(file_id);

        match &self.shebang {
            Some(Shebang::One(line)) => script.set_shebang(line.as_str()),
            Some(Shebang::Many(lines)) => {
                for line in lines {
                    script.set_shebang(line.as_str());
                }
            }
            None => {}
        }

        for declaration in &self.declarations {
            declaration.get_ref().replay(&mut script, declaration.span());
        }

        tracing::debug!(
            declarations = self.declarations.len(),
            file_id,
            "built script from outline"
        );
        script
    }
}

impl OutlineDeclaration {
    fn replay(&self, script: &mut ScriptNode, span: Range<usize>) {
        match self {
            OutlineDeclaration::Feature { name, value } => {
                script.add_feature_flag(FeatureFlagNode::new(name, script_literal(value), span));
            }
            OutlineDeclaration::Include { from, names } => {
                let entries = names
                    .iter()
                    .map(|n| match n {
                        IncludeName::Plain(name) => IncludeEntry::new(name),
                        IncludeName::Aliased { name, alias } => IncludeEntry::aliased(name, alias),
                    })
                    .collect();
                script.add_include(IncludeNode::new(from, entries, span));
            }
            OutlineDeclaration::Param { name, default } => {
                let mut param = ParamNode::new(name, span);
                if let Some(default) = default {
                    param = param.with_default(script_literal(default));
                }
                script.add_param(param);
            }
            OutlineDeclaration::Workflow { name, entry } => {
                let is_entry = entry.unwrap_or(name.is_none());
                let workflow = match name {
                    Some(name) => WorkflowNode::named(name, span),
                    None => WorkflowNode::unnamed(span),
                };
                let id = script.add_workflow(workflow);
                if is_entry {
                    script.set_entry(id);
                }
            }
            OutlineDeclaration::Output { names } => {
                let declarations = names
                    .iter()
                    .map(|name| OutputNode::new(name, span.clone()))
                    .collect();
                script.set_outputs(OutputBlockNode::new(declarations, span));
            }
            OutlineDeclaration::Process { name } => {
                script.add_process(ProcessNode::new(name, span));
            }
            OutlineDeclaration::Function { name, params } => {
                script.add_function(FunctionNode::new(name, params.clone(), span));
            }
            OutlineDeclaration::Enum { name, values } => {
                script.add_class(ClassNode::enumeration(name, values.clone(), span));
            }
            OutlineDeclaration::Class { name } => {
                script.add_class(ClassNode::class(name, span));
            }
        }
    }
}

/// Read and parse an outline file.
pub fn load(path: &Path) -> Result<(String, Outline), OutlineError> {
    let source = std::fs::read_to_string(path).map_err(|source| OutlineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let outline = Outline::parse(&source)?;
    Ok((source, outline))
}
