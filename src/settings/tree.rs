//! The merged settings tree.

use crate::error::{GeneratorError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Kind of a JSON value, used when checking settings against declared types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Lowercase name as used in messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Kind of a raw `serde_json` value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value in a [`SettingsTree`].
///
/// Nested objects become trees of their own; everything else is kept as a
/// scalar leaf. Arrays are leaves too, their elements are never merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingsValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<Value>),
    Object(SettingsTree),
}

impl SettingsValue {
    #[must_use]
    pub const fn kind(&self) -> JsonKind {
        match self {
            Self::Null => JsonKind::Null,
            Self::Bool(_) => JsonKind::Bool,
            Self::Number(_) => JsonKind::Number,
            Self::String(_) => JsonKind::String,
            Self::Array(_) => JsonKind::Array,
            Self::Object(_) => JsonKind::Object,
        }
    }

    #[must_use]
    pub const fn as_tree(&self) -> Option<&SettingsTree> {
        match self {
            Self::Object(tree) => Some(tree),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_tree(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

impl From<Value> for SettingsValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items),
            Value::Object(map) => Self::Object(SettingsTree {
                entries: map
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            }),
        }
    }
}

/// A recursive mapping from setting key to [`SettingsValue`].
///
/// Keys are unique within one level. Iteration follows insertion order so
/// that anything derived from a tree is reproducible between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SettingsTree {
    pub(crate) entries: IndexMap<String, SettingsValue>,
}

impl SettingsTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one settings document. The root must be a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    /// Convert an already parsed JSON value. The root must be an object.
    pub fn from_json_value(value: Value) -> Result<Self> {
        match SettingsValue::from(value) {
            SettingsValue::Object(tree) => Ok(tree),
            other => Err(GeneratorError::not_an_object(
                "settings document",
                other.kind().name(),
            )),
        }
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingsValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingsValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Top-level entries whose values are nested trees.
    ///
    /// Each of these is a section that a configuration class may bind to.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &SettingsTree)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_tree().map(|tree| (k.as_str(), tree)))
    }

    /// Top-level entries that are plain values rather than sections.
    pub fn top_level_scalars(&self) -> impl Iterator<Item = (&str, &SettingsValue)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_tree())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a section by exact key.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&SettingsTree> {
        self.entries.get(key).and_then(SettingsValue::as_tree)
    }

    /// Render back to a JSON value, preserving entry order.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        // Serializing plain data into a Value cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
