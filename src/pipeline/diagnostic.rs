//! What a generation pass hands back to its host.

use serde::Serialize;

/// Identifier of the diagnostic raised for configuration mismatches.
pub const CONFIGURATION_ERRORS_ID: &str = "ASG001";

/// Severity of a host diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        f.write_str(s)
    }
}

/// A build diagnostic without a source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// One error diagnostic carrying every validation message.
    ///
    /// The messages are embedded as a JSON array so the host (or a test) can
    /// decode them again.
    #[must_use]
    pub fn configuration_errors(messages: &[String]) -> Self {
        let payload = serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string());
        Self {
            id: CONFIGURATION_ERRORS_ID.to_string(),
            title: "Errors in generator".to_string(),
            severity: Severity::Error,
            message: format!("Generator errors: {payload}"),
        }
    }

    /// Decode the messages embedded by [`Diagnostic::configuration_errors`].
    #[must_use]
    pub fn embedded_messages(&self) -> Option<Vec<String>> {
        let payload = self.message.strip_prefix("Generator errors: ")?;
        serde_json::from_str(payload).ok()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.id, self.message)
    }
}

/// Source text to be added to the host compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSource {
    /// Logical name the host registers the source under
    pub hint_name: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_roundtrip() {
        let messages = vec![
            "Configuration for class Redis not found in json file.".to_string(),
            "Class Db, Property: \"Port\". The field must be of type int.".to_string(),
        ];
        let diagnostic = Diagnostic::configuration_errors(&messages);

        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.id, "ASG001");
        assert!(diagnostic.message.starts_with("Generator errors: [\"Configuration"));
        assert_eq!(diagnostic.embedded_messages(), Some(messages));
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::configuration_errors(&["x".to_string()]);
        assert_eq!(
            diagnostic.to_string(),
            "error ASG001: Generator errors: [\"x\"]"
        );
    }
}
