//! Configuration validation.

use super::types::GeneratorConfig;
use regex::Regex;
use std::sync::OnceLock;

/// Largest accepted indentation width.
const MAX_INDENT_WIDTH: usize = 16;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern should compile")
    })
}

fn check_identifier(field: &str, value: &str, errors: &mut Vec<ConfigError>) {
    if !identifier_pattern().is_match(value) {
        errors.push(ConfigError {
            field: field.to_string(),
            message: format!("'{value}' is not a valid identifier"),
        });
    }
}

impl Validatable for GeneratorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        check_identifier("marker_suffix", &self.marker_suffix, &mut errors);
        check_identifier("host_key", &self.host_key, &mut errors);

        if self.settings_file_name.trim().is_empty() {
            errors.push(ConfigError {
                field: "settings_file_name".to_string(),
                message: "Settings file name must not be empty".to_string(),
            });
        }

        if self.source_name.trim().is_empty() {
            errors.push(ConfigError {
                field: "source_name".to_string(),
                message: "Source name must not be empty".to_string(),
            });
        }

        if !(1..=MAX_INDENT_WIDTH).contains(&self.indent_width) {
            errors.push(ConfigError {
                field: "indent_width".to_string(),
                message: format!(
                    "Indent width must be between 1 and {MAX_INDENT_WIDTH}, got {}",
                    self.indent_width
                ),
            });
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
