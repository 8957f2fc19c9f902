//! Configuration module for appsettings-gen.
//!
//! This module provides:
//! - The [`GeneratorConfig`] tunables for a generation pass
//! - Validation through the [`Validatable`] trait
//! - YAML config file loading and discovery
//!
//! # Configuration File
//!
//! Place a `.appsettings-gen.yaml` file in your project root or
//! `~/.config/appsettings-gen/`:
//!
//! ```yaml
//! marker_suffix: Configuration
//! host_key: Host
//! source_name: Host.g.cs
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    GeneratorConfig, GeneratorConfigBuilder, DEFAULT_SETTINGS_FILE_NAME, DEFAULT_SOURCE_NAME,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the configuration file format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(GeneratorConfig);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
