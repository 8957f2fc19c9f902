//! Configuration types for generation passes.

use crate::extract::DEFAULT_MARKER_SUFFIX;
use crate::synth::DEFAULT_INDENT_WIDTH;
use crate::validate::DEFAULT_HOST_KEY;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default settings file name selected by the host.
pub const DEFAULT_SETTINGS_FILE_NAME: &str = "appsettings.json";

/// Default logical name of the generated source.
pub const DEFAULT_SOURCE_NAME: &str = "Host.cs";

/// Tunables for one generation pass.
///
/// Every field has a default, so an empty config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Suffix that marks a type as a configuration class
    pub marker_suffix: String,
    /// Section key of the aggregate class (`<host_key><marker_suffix>`)
    pub host_key: String,
    /// File name of settings documents, compared ignoring case
    pub settings_file_name: String,
    /// Name the generated source is registered under
    pub source_name: String,
    /// Spaces per indentation level in generated source
    pub indent_width: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker_suffix: DEFAULT_MARKER_SUFFIX.to_string(),
            host_key: DEFAULT_HOST_KEY.to_string(),
            settings_file_name: DEFAULT_SETTINGS_FILE_NAME.to_string(),
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Class name of the aggregate type, e.g. `HostConfiguration`.
    #[must_use]
    pub fn host_class_name(&self) -> String {
        format!("{}{}", self.host_key, self.marker_suffix)
    }
}

/// Builder for constructing `GeneratorConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    pub fn marker_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.marker_suffix = suffix.into();
        self
    }

    pub fn host_key(mut self, key: impl Into<String>) -> Self {
        self.config.host_key = key.into();
        self
    }

    pub fn settings_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.settings_file_name = name.into();
        self
    }

    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.config.source_name = name.into();
        self
    }

    pub const fn indent_width(mut self, width: usize) -> Self {
        self.config.indent_width = width;
        self
    }

    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
