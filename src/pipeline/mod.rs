//! Orchestration of a generation pass.
//!
//! A pass runs merge → extract → validate → synthesize:
//! - merging and extraction are independent of each other
//! - validation failures end the pass with one [`Diagnostic`]
//! - a missing host class ends the pass with no output at all
//!
//! Only fatal input problems (malformed JSON, cancellation) surface as `Err`.

mod diagnostic;
mod output;

pub use diagnostic::{Diagnostic, GeneratedSource, Severity, CONFIGURATION_ERRORS_ID};
pub use output::{write_output, OutputTarget};

use crate::cancel::CancellationFlag;
use crate::config::{GeneratorConfig, Validatable};
use crate::error::{GeneratorError, Result};
use crate::extract::{ClassDescriptions, TypeDescriptionExtractor};
use crate::model::SemanticModel;
use crate::settings::{ConfigTreeMerger, MergedSettings, SettingsDocument};
use crate::synth::AggregateSourceSynthesizer;
use crate::validate::{error_messages, ConfigurationValidator, ValidationError};

/// How a generation pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The aggregate type was synthesized
    Generated(GeneratedSource),
    /// Settings and configuration classes disagree
    Failed {
        diagnostic: Diagnostic,
        errors: Vec<ValidationError>,
    },
    /// No host class exists, so there is nothing to generate
    Skipped,
}

impl GenerationOutcome {
    /// The generated source, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&GeneratedSource> {
        match self {
            Self::Generated(source) => Some(source),
            _ => None,
        }
    }

    /// The diagnostic to report, if any.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Failed { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }
}

/// Result of checking settings without synthesizing anything.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub merged: MergedSettings,
    pub classes: ClassDescriptions,
    pub errors: Vec<ValidationError>,
}

impl CheckReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        error_messages(&self.errors)
    }
}

/// Runs generation passes for one configuration.
///
/// Every call works on fresh, pass-scoped data; a driver can be shared
/// between concurrent passes.
#[derive(Debug, Clone, Default)]
pub struct GeneratorDriver {
    config: GeneratorConfig,
    cancellation: Option<CancellationFlag>,
}

impl GeneratorDriver {
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            cancellation: None,
        }
    }

    /// Create a driver after rejecting invalid configuration values.
    pub fn try_new(config: GeneratorConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(GeneratorError::config(details.join("; ")));
        }
        Ok(Self::new(config))
    }

    #[must_use]
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Merge the settings documents.
    pub fn merge(&self, documents: &[SettingsDocument]) -> Result<MergedSettings> {
        let mut merger = ConfigTreeMerger::new();
        if let Some(flag) = &self.cancellation {
            merger = merger.with_cancellation(flag.clone());
        }
        let merged = merger.merge(documents)?;
        tracing::debug!(
            "Merged {} of {} settings document(s) into {} top-level entries",
            merged.merged_documents,
            documents.len(),
            merged.tree.len()
        );
        Ok(merged)
    }

    /// Describe the configuration classes of `model`.
    pub fn extract<M: SemanticModel + ?Sized>(&self, model: &M) -> ClassDescriptions {
        TypeDescriptionExtractor::new(self.config.marker_suffix.as_str()).extract(model)
    }

    /// Merge, extract and validate, without synthesizing.
    pub fn check<M: SemanticModel + ?Sized>(
        &self,
        documents: &[SettingsDocument],
        model: &M,
    ) -> Result<CheckReport> {
        let merged = self.merge(documents)?;
        let classes = self.extract(model);
        let errors = ConfigurationValidator::new(self.config.host_key.as_str())
            .validate(&classes, &merged.tree);

        Ok(CheckReport {
            merged,
            classes,
            errors,
        })
    }

    /// Run a full generation pass.
    pub fn run<M: SemanticModel + ?Sized>(
        &self,
        documents: &[SettingsDocument],
        model: &M,
    ) -> Result<GenerationOutcome> {
        let report = self.check(documents, model)?;

        if !report.is_valid() {
            tracing::info!(
                "Configuration check failed with {} error(s)",
                report.errors.len()
            );
            let diagnostic = Diagnostic::configuration_errors(&report.messages());
            return Ok(GenerationOutcome::Failed {
                diagnostic,
                errors: report.errors,
            });
        }

        let synthesizer = AggregateSourceSynthesizer::new(self.config.host_key.as_str())
            .with_indent_width(self.config.indent_width);

        Ok(synthesizer.synthesize(&report.classes).map_or_else(
            || {
                tracing::info!(
                    "No {} type found, skipping generation",
                    self.config.host_class_name()
                );
                GenerationOutcome::Skipped
            },
            |text| {
                tracing::info!(
                    "Generated {} ({} bytes)",
                    self.config.source_name,
                    text.len()
                );
                GenerationOutcome::Generated(GeneratedSource {
                    hint_name: self.config.source_name.clone(),
                    text,
                })
            },
        ))
    }
}

/// Run one generation pass with `config`.
pub fn run_generation<M: SemanticModel + ?Sized>(
    documents: &[SettingsDocument],
    model: &M,
    config: &GeneratorConfig,
) -> Result<GenerationOutcome> {
    GeneratorDriver::try_new(config.clone())?.run(documents, model)
}

/// Exit codes for build integration
pub mod exit_codes {
    /// Source generated, skipped, or settings valid
    pub const SUCCESS: i32 = 0;
    /// Settings do not match the configuration classes
    pub const CONFIGURATION_ERRORS: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}
