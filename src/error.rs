//! Unified error types for appsettings-gen.
//!
//! Only fatal conditions live here. Configuration mismatches found while
//! validating settings against configuration types are collected as
//! [`crate::validate::ValidationError`] values instead, so a single pass can
//! report every problem at once.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for generator operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeneratorError {
    /// A settings document could not be parsed
    #[error("Failed to parse settings: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// The semantic model document is unusable
    #[error("Invalid semantic model: {0}")]
    Model(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generator configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The caller asked the pass to stop
    #[error("Generation cancelled")]
    Cancelled,
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Root of the document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl GeneratorError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a document whose root is not an object
    pub fn not_an_object(document: impl Into<String>, found: &'static str) -> Self {
        Self::parse(
            format!("in {}", document.into()),
            ParseErrorKind::NotAnObject { found },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a semantic model error
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for GeneratorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for GeneratorError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to any context the error already carries,
/// so the rendered message reads outermost-first.
///
/// # Example
///
/// ```ignore
/// use appsettings_gen::error::ErrorContext;
///
/// let tree = SettingsTree::from_json_str(text)
///     .with_context(|| format!("document {name}"))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<GeneratorError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: GeneratorError, new_ctx: &str) -> GeneratorError {
    match err {
        GeneratorError::Parse {
            context: existing,
            source,
        } => GeneratorError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        GeneratorError::Io {
            path,
            message,
            source,
        } => GeneratorError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        GeneratorError::Model(msg) => GeneratorError::Model(chain_context(new_ctx, &msg)),
        GeneratorError::Config(msg) => GeneratorError::Config(chain_context(new_ctx, &msg)),
        GeneratorError::Cancelled => GeneratorError::Cancelled,
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
