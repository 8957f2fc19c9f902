//! Cross-checking configuration classes against the merged settings.
//!
//! Mismatches are collected, never thrown: a single pass reports every
//! missing section, missing field and kind mismatch at once.

use crate::extract::{ClassDescriptions, ConfigurationClassDescription, TypeDescriptor};
use crate::settings::{JsonKind, SettingsTree};

/// Default key of the aggregate type's own description.
pub const DEFAULT_HOST_KEY: &str = "Host";

/// Minimum similarity for suggesting a section name.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// What went wrong for one class or property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No settings section carries the class key
    SectionNotFound,
    /// A non-nullable value-type property has no entry
    MissingField,
    /// The entry's JSON kind cannot bind to the declared type
    TypeMismatch { expected: String, found: JsonKind },
}

/// One mismatch between a configuration class and the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub class_key: String,
    pub property: Option<String>,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn section_not_found(class_key: &str) -> Self {
        Self {
            class_key: class_key.to_string(),
            property: None,
            kind: ValidationErrorKind::SectionNotFound,
        }
    }

    fn property(class_key: &str, property: &str, kind: ValidationErrorKind) -> Self {
        Self {
            class_key: class_key.to_string(),
            property: Some(property.to_string()),
            kind,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let property = self.property.as_deref().unwrap_or_default();
        match &self.kind {
            ValidationErrorKind::SectionNotFound => write!(
                f,
                "Configuration for class {} not found in json file.",
                self.class_key
            ),
            ValidationErrorKind::MissingField => write!(
                f,
                "Class {}, Property: {}. The field must be present in the configuration file.",
                self.class_key, property
            ),
            ValidationErrorKind::TypeMismatch { expected, .. } => write!(
                f,
                "Class {}, Property: {}. The field must be of type {}.",
                self.class_key, property, expected
            ),
        }
    }
}

/// Render errors as the plain strings reported to the host.
#[must_use]
pub fn error_messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

/// Whether a settings value of `kind` can bind to `ty`.
///
/// Only booleans, numbers and strings are checked. Null, arrays and objects
/// are accepted for any declared type.
#[must_use]
pub fn is_kind_compatible(kind: JsonKind, ty: &TypeDescriptor) -> bool {
    match kind {
        JsonKind::Bool => ty.name == "Boolean" || ty.is_nullable_of("Boolean"),
        JsonKind::Number => ty.name == "Int32" || ty.is_nullable_of("Int32"),
        JsonKind::String => ty.name == "String",
        JsonKind::Null | JsonKind::Array | JsonKind::Object => true,
    }
}

/// Checks every configuration class against its settings section.
#[derive(Debug, Clone)]
pub struct ConfigurationValidator {
    host_key: String,
}

impl Default for ConfigurationValidator {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_KEY)
    }
}

impl ConfigurationValidator {
    pub fn new(host_key: impl Into<String>) -> Self {
        Self {
            host_key: host_key.into(),
        }
    }

    /// Validate `classes` against the sections of `settings`.
    ///
    /// Errors come out in class order, then property order. An empty result
    /// means the settings are usable.
    #[must_use]
    pub fn validate(
        &self,
        classes: &ClassDescriptions,
        settings: &SettingsTree,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (class_key, class) in classes {
            if *class_key == self.host_key {
                continue;
            }

            let Some(section) = settings.section(class_key) else {
                if let Some(candidate) = closest_section(settings, class_key) {
                    tracing::warn!(
                        "No section '{}' for {}; did you mean '{}'?",
                        class_key,
                        class.class_name,
                        candidate
                    );
                }
                errors.push(ValidationError::section_not_found(class_key));
                continue;
            };

            check_section(class_key, class, section, &mut errors);
        }

        tracing::debug!("Validation finished with {} error(s)", errors.len());
        errors
    }
}

fn check_section(
    class_key: &str,
    class: &ConfigurationClassDescription,
    section: &SettingsTree,
    errors: &mut Vec<ValidationError>,
) {
    for (property, ty) in &class.properties {
        match section.get(property) {
            None => {
                if !ty.is_optional() {
                    errors.push(ValidationError::property(
                        class_key,
                        property,
                        ValidationErrorKind::MissingField,
                    ));
                }
            }
            Some(value) => {
                let kind = value.kind();
                if !is_kind_compatible(kind, ty) {
                    errors.push(ValidationError::property(
                        class_key,
                        property,
                        ValidationErrorKind::TypeMismatch {
                            expected: ty.full_name.clone(),
                            found: kind,
                        },
                    ));
                }
            }
        }
    }
}

/// The section whose name is most similar to `key`, if any is close.
fn closest_section<'a>(settings: &'a SettingsTree, key: &str) -> Option<&'a str> {
    settings
        .sections()
        .map(|(name, _)| {
            let score = if name.eq_ignore_ascii_case(key) {
                1.0
            } else {
                strsim::normalized_levenshtein(name, key)
            };
            (name, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::TypeDescriptionExtractor;
    use crate::model::{TypeRef, TypeSymbol};
    use crate::settings::SettingsTree;

    fn classes(types: Vec<TypeSymbol>) -> ClassDescriptions {
        TypeDescriptionExtractor::default().extract(&types)
    }

    fn settings(text: &str) -> SettingsTree {
        SettingsTree::from_json_str(text).unwrap()
    }

    fn messages(types: Vec<TypeSymbol>, text: &str) -> Vec<String> {
        let errors = ConfigurationValidator::default().validate(&classes(types), &settings(text));
        error_messages(&errors)
    }

    #[test]
    fn test_host_is_skipped() {
        let errs = messages(vec![TypeSymbol::new("App", "HostConfiguration")], "{}");
        assert!(errs.is_empty());
    }

    #[test]
    fn test_missing_section() {
        let errs = messages(
            vec![TypeSymbol::new("App", "RedisConfiguration")
                .with_property("Port", TypeRef::int32())],
            r#"{"Db": {}}"#,
        );
        assert_eq!(errs, vec!["Configuration for class Redis not found in json file."]);
    }

    #[test]
    fn test_scalar_top_level_is_not_a_section() {
        let errs = messages(
            vec![TypeSymbol::new("App", "RedisConfiguration")],
            r#"{"Redis": "localhost"}"#,
        );
        assert_eq!(errs, vec!["Configuration for class Redis not found in json file."]);
    }

    #[test]
    fn test_missing_non_nullable_value_type() {
        let errs = messages(
            vec![
                TypeSymbol::new("App", "HostConfiguration"),
                TypeSymbol::new("App", "DbConfiguration").with_property("Port", TypeRef::int32()),
            ],
            r#"{"Db": {}}"#,
        );
        assert_eq!(
            errs,
            vec!["Class Db, Property: Port. The field must be present in the configuration file."]
        );
    }

    #[test]
    fn test_optional_properties_may_be_absent() {
        let errs = messages(
            vec![TypeSymbol::new("App", "DbConfiguration")
                .with_property("Name", TypeRef::string())
                .with_property("Timeout", TypeRef::nullable(TypeRef::int32()))
                .with_property("Enabled", TypeRef::nullable(TypeRef::boolean()))],
            r#"{"Db": {}}"#,
        );
        assert!(errs.is_empty(), "{errs:?}");
    }

    #[test]
    fn test_string_for_int_is_mismatch() {
        let errs = messages(
            vec![TypeSymbol::new("App", "DbConfiguration").with_property("Port", TypeRef::int32())],
            r#"{"Db": {"Port": "5432"}}"#,
        );
        assert_eq!(errs, vec!["Class Db, Property: Port. The field must be of type int."]);
    }

    #[test]
    fn test_both_boolean_literals_accepted() {
        let types = || {
            vec![TypeSymbol::new("App", "FeatureConfiguration")
                .with_property("On", TypeRef::boolean())
                .with_property("Maybe", TypeRef::nullable(TypeRef::boolean()))]
        };
        assert!(messages(types(), r#"{"Feature": {"On": true, "Maybe": false}}"#).is_empty());
        assert!(messages(types(), r#"{"Feature": {"On": false, "Maybe": true}}"#).is_empty());
    }

    #[test]
    fn test_boolean_for_string_is_mismatch() {
        let errs = messages(
            vec![
                TypeSymbol::new("App", "DbConfiguration").with_property("Name", TypeRef::string()),
            ],
            r#"{"Db": {"Name": true}}"#,
        );
        assert_eq!(errs, vec!["Class Db, Property: Name. The field must be of type string."]);
    }

    #[test]
    fn test_number_for_nullable_int_is_fine() {
        let errs = messages(
            vec![TypeSymbol::new("App", "DbConfiguration")
                .with_property("Timeout", TypeRef::nullable(TypeRef::int32()))],
            r#"{"Db": {"Timeout": 30}}"#,
        );
        assert!(errs.is_empty());
    }

    #[test]
    fn test_number_for_nullable_bool_is_mismatch() {
        let errs = messages(
            vec![TypeSymbol::new("App", "DbConfiguration")
                .with_property("Enabled", TypeRef::nullable(TypeRef::boolean()))],
            r#"{"Db": {"Enabled": 1}}"#,
        );
        assert_eq!(
            errs,
            vec!["Class Db, Property: Enabled. The field must be of type bool?."]
        );
    }

    #[test]
    fn test_null_array_object_unchecked() {
        let errs = messages(
            vec![TypeSymbol::new("App", "DbConfiguration")
                .with_property("Port", TypeRef::int32())
                .with_property("Name", TypeRef::string())
                .with_property("Id", TypeRef::value("Guid", "System.Guid"))],
            r#"{"Db": {"Port": null, "Name": [1, 2], "Id": {"a": 1}}}"#,
        );
        assert!(errs.is_empty(), "{errs:?}");
    }

    #[test]
    fn test_string_for_other_value_type_is_mismatch() {
        let errs = messages(
            vec![TypeSymbol::new("App", "DbConfiguration")
                .with_property("Id", TypeRef::value("Guid", "System.Guid"))],
            r#"{"Db": {"Id": "0f8fad5b-d9cb-469f-a165-70867728950e"}}"#,
        );
        assert_eq!(
            errs,
            vec!["Class Db, Property: Id. The field must be of type System.Guid."]
        );
    }

    #[test]
    fn test_errors_follow_discovery_order() {
        let errs = messages(
            vec![
                TypeSymbol::new("App", "CacheConfiguration")
                    .with_property("Size", TypeRef::int32())
                    .with_property("Name", TypeRef::string()),
                TypeSymbol::new("App", "QueueConfiguration"),
                TypeSymbol::new("App", "DbConfiguration").with_property("Port", TypeRef::int32()),
            ],
            r#"{"Cache": {"Name": 5}, "Db": {"Port": "x"}}"#,
        );
        assert_eq!(
            errs,
            vec![
                "Class Cache, Property: Size. The field must be present in the configuration file.",
                "Class Cache, Property: Name. The field must be of type string.",
                "Configuration for class Queue not found in json file.",
                "Class Db, Property: Port. The field must be of type int.",
            ]
        );
    }

    #[test]
    fn test_custom_host_key() {
        let types = vec![TypeSymbol::new("App", "RootConfiguration")];
        let errors = ConfigurationValidator::new("Root").validate(&classes(types), &settings("{}"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_error_structure() {
        let types =
            vec![TypeSymbol::new("App", "DbConfiguration").with_property("Port", TypeRef::int32())];
        let errors = ConfigurationValidator::default()
            .validate(&classes(types), &settings(r#"{"Db": {"Port": "1"}}"#));
        assert_eq!(
            errors,
            vec![ValidationError {
                class_key: "Db".to_string(),
                property: Some("Port".to_string()),
                kind: ValidationErrorKind::TypeMismatch {
                    expected: "int".to_string(),
                    found: JsonKind::String,
                },
            }]
        );
    }

    #[test]
    fn test_closest_section() {
        let tree = settings(r#"{"redis": {}, "Database": {}, "Flag": true}"#);
        assert_eq!(closest_section(&tree, "Redis"), Some("redis"));
        assert_eq!(closest_section(&tree, "Databse"), Some("Database"));
        assert_eq!(closest_section(&tree, "Flag"), None);
        assert_eq!(closest_section(&tree, "Queue"), None);
    }
}
