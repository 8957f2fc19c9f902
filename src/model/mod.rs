//! Semantic model of the host program.
//!
//! The generator never parses source code itself. The host compiler exports
//! what it knows about the program as a [`SemanticModel`]: the named types it
//! saw, their namespaces, and their members with declared types.
//! [`ProgramModel`] is a serde-loadable implementation of that trait, so any
//! front end that can write JSON can drive the generator.

mod symbols;

pub use symbols::{MemberSymbol, TypeKind, TypeRef, TypeSymbol, NULLABLE_WRAPPER};

use crate::error::{ErrorContext, GeneratorError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read access to the named types of a compiled program.
pub trait SemanticModel {
    /// Every named type the host resolved, in discovery order.
    ///
    /// The same type may be yielded more than once when several syntax trees
    /// reference it.
    fn named_types(&self) -> Box<dyn Iterator<Item = &TypeSymbol> + '_>;
}

/// The types referenced from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SyntaxTreeModel {
    /// Source path as reported by the host
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub types: Vec<TypeSymbol>,
}

/// A semantic model exported by the host as a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProgramModel {
    #[serde(default)]
    pub syntax_trees: Vec<SyntaxTreeModel>,
}

impl ProgramModel {
    /// A model with a single syntax tree holding `types`.
    #[must_use]
    pub fn from_types(types: Vec<TypeSymbol>) -> Self {
        Self {
            syntax_trees: vec![SyntaxTreeModel {
                path: String::new(),
                types,
            }],
        }
    }

    /// Parse and check a model document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(text)
            .map_err(|e| GeneratorError::model(format!("malformed model document: {e}")))?;
        model.check()?;
        Ok(model)
    }

    /// Load a model document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        Self::from_json_str(&text).with_context(|| format!("{}", path.display()))
    }

    /// Reject symbols the generator cannot reason about.
    fn check(&self) -> Result<()> {
        for tree in &self.syntax_trees {
            for ty in &tree.types {
                if ty.name.trim().is_empty() {
                    return Err(GeneratorError::model(format!(
                        "type with empty name in syntax tree '{}'",
                        tree.path
                    )));
                }
            }
        }
        Ok(())
    }

    /// Total number of type references across all syntax trees.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.syntax_trees.iter().map(|t| t.types.len()).sum()
    }
}

impl SemanticModel for ProgramModel {
    fn named_types(&self) -> Box<dyn Iterator<Item = &TypeSymbol> + '_> {
        Box::new(self.syntax_trees.iter().flat_map(|tree| tree.types.iter()))
    }
}

impl SemanticModel for [TypeSymbol] {
    fn named_types(&self) -> Box<dyn Iterator<Item = &TypeSymbol> + '_> {
        Box::new(self.iter())
    }
}

impl SemanticModel for Vec<TypeSymbol> {
    fn named_types(&self) -> Box<dyn Iterator<Item = &TypeSymbol> + '_> {
        Box::new(self.iter())
    }
}

/// JSON schema of the model document, for host implementers.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(ProgramModel);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
