//! Discovery of configuration classes in the semantic model.
//!
//! Every named type whose simple name ends in the marker suffix (by default
//! `Configuration`) becomes a [`ConfigurationClassDescription`], keyed by its
//! name with the suffix stripped: `RedisConfiguration` binds to the `Redis`
//! section.

use crate::model::{SemanticModel, TypeRef, TypeSymbol};
use indexmap::IndexMap;
use serde::Serialize;

/// Default marker suffix for configuration classes.
pub const DEFAULT_MARKER_SUFFIX: &str = "Configuration";

/// Declared type of one configuration property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub is_value_type: bool,
    pub is_generic_type: bool,
    pub is_nullable: bool,
    pub full_name: String,
    pub name: String,
    /// Name of the first type argument, only set for generic types
    pub type_argument_name: Option<String>,
}

impl TypeDescriptor {
    /// Whether absence from the settings file is acceptable.
    ///
    /// Reference types and nullable value types may be left out; plain value
    /// types have no representation for "missing".
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        !self.is_value_type || self.is_nullable
    }

    /// Whether this is the nullable wrapper around the type named `inner`.
    #[must_use]
    pub fn is_nullable_of(&self, inner: &str) -> bool {
        self.is_nullable && self.type_argument_name.as_deref() == Some(inner)
    }
}

impl From<&TypeRef> for TypeDescriptor {
    fn from(ty: &TypeRef) -> Self {
        let is_generic_type = ty.is_generic();
        Self {
            is_value_type: ty.is_value_type,
            is_generic_type,
            is_nullable: ty.is_nullable_wrapper(),
            full_name: ty.full_name.clone(),
            name: ty.name.clone(),
            type_argument_name: ty
                .type_arguments
                .first()
                .filter(|_| is_generic_type)
                .map(|arg| arg.name.clone()),
        }
    }
}

/// Structural description of one configuration class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationClassDescription {
    /// Unqualified class name, suffix included
    pub class_name: String,
    pub namespace: String,
    /// Property name to declared type, in declaration order
    pub properties: IndexMap<String, TypeDescriptor>,
}

/// Configuration classes keyed by their section key.
pub type ClassDescriptions = IndexMap<String, ConfigurationClassDescription>;

/// Walks a [`SemanticModel`] looking for configuration classes.
#[derive(Debug, Clone)]
pub struct TypeDescriptionExtractor {
    marker_suffix: String,
}

impl Default for TypeDescriptionExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_SUFFIX)
    }
}

impl TypeDescriptionExtractor {
    pub fn new(marker_suffix: impl Into<String>) -> Self {
        Self {
            marker_suffix: marker_suffix.into(),
        }
    }

    /// Section key for `type_name`, if it carries the marker suffix.
    ///
    /// Returns `None` when the suffix is missing or nothing but whitespace
    /// precedes it.
    #[must_use]
    pub fn section_key<'a>(&self, type_name: &'a str) -> Option<&'a str> {
        type_name
            .strip_suffix(self.marker_suffix.as_str())
            .filter(|key| !key.trim().is_empty())
    }

    /// Describe every configuration class in `model`.
    ///
    /// Types reached more than once keep their first description.
    pub fn extract<M: SemanticModel + ?Sized>(&self, model: &M) -> ClassDescriptions {
        let mut result = ClassDescriptions::new();

        for ty in model.named_types() {
            let Some(key) = self.section_key(&ty.name) else {
                continue;
            };
            if result.contains_key(key) {
                continue;
            }

            let description = describe(ty);
            tracing::debug!(
                "Found configuration class {} for section {} ({} properties)",
                ty.qualified_name(),
                key,
                description.properties.len()
            );
            result.insert(key.to_string(), description);
        }

        tracing::info!("Discovered {} configuration class(es)", result.len());
        result
    }
}

fn describe(ty: &TypeSymbol) -> ConfigurationClassDescription {
    let mut properties = IndexMap::new();

    for (property, return_type) in ty.property_getters() {
        let Some(return_type) = return_type else {
            continue;
        };
        if !return_type.is_named() || return_type.is_void() {
            continue;
        }
        properties
            .entry(property.to_string())
            .or_insert_with(|| TypeDescriptor::from(return_type));
    }

    ConfigurationClassDescription {
        class_name: ty.name.clone(),
        namespace: ty.namespace.clone(),
        properties,
    }
}
