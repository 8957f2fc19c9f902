//! **Compile-time reconciliation of `appsettings.json` files with configuration types.**
//!
//! `appsettings-gen` runs inside a host build pipeline. The host hands it the
//! program's semantic model and the project's settings documents; it hands
//! back either the source of one aggregate type or a single diagnostic that
//! lists every mismatch between the two.
//!
//! ## Core Concepts & Modules
//!
//! - **[`settings`]**: Parses settings documents and merges them into one
//!   [`SettingsTree`] with [`ConfigTreeMerger`].
//! - **[`model`]**: The [`SemanticModel`] trait and the JSON-loadable
//!   [`ProgramModel`] a host exports.
//! - **[`extract`]**: [`TypeDescriptionExtractor`] finds every type named
//!   `<Section>Configuration` and describes its properties.
//! - **[`validate`]**: [`ConfigurationValidator`] checks each description
//!   against its settings section.
//! - **[`synth`]**: [`AggregateSourceSynthesizer`] writes the partial
//!   `HostConfiguration` class exposing one property per section.
//! - **[`pipeline`]**: [`GeneratorDriver`] runs the whole pass.
//!
//! ## Getting Started
//!
//! ```
//! use appsettings_gen::model::{TypeRef, TypeSymbol};
//! use appsettings_gen::{run_generation, GenerationOutcome, GeneratorConfig, SettingsDocument};
//!
//! let documents = vec![SettingsDocument::new(
//!     "appsettings.json",
//!     r#"{"Db": {"Host": "localhost", "Port": 5432}}"#,
//! )];
//! let types = vec![
//!     TypeSymbol::new("App", "HostConfiguration"),
//!     TypeSymbol::new("App.Data", "DbConfiguration")
//!         .with_property("Host", TypeRef::string())
//!         .with_property("Port", TypeRef::int32()),
//! ];
//!
//! let outcome = run_generation(&documents, &types, &GeneratorConfig::default()).unwrap();
//! match outcome {
//!     GenerationOutcome::Generated(source) => {
//!         assert!(source.text.contains("public DbConfiguration Db { get; set; }"));
//!     }
//!     GenerationOutcome::Failed { diagnostic, .. } => panic!("{diagnostic}"),
//!     GenerationOutcome::Skipped => panic!("no HostConfiguration type"),
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `appsettings-gen` binary drives the same pass from files on disk, for
//! build scripts and CI that cannot embed the library.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod settings;
pub mod synth;
pub mod validate;

// Re-export main types for convenience
pub use cancel::CancellationFlag;
pub use config::{ConfigError, GeneratorConfig, GeneratorConfigBuilder, Validatable};
pub use error::{ErrorContext, GeneratorError, Result};
pub use extract::{
    ClassDescriptions, ConfigurationClassDescription, TypeDescriptionExtractor, TypeDescriptor,
};
pub use model::{ProgramModel, SemanticModel};
pub use pipeline::{
    run_generation, CheckReport, Diagnostic, GeneratedSource, GenerationOutcome, GeneratorDriver,
    Severity,
};
pub use settings::{ConfigTreeMerger, MergedSettings, SettingsDocument, SettingsTree, SettingsValue};
pub use synth::AggregateSourceSynthesizer;
pub use validate::{ConfigurationValidator, ValidationError, ValidationErrorKind};
