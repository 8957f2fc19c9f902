//! Settings documents handed to the generator by its host.

use crate::error::{GeneratorError, Result};
use std::path::{Path, PathBuf};

/// One raw settings text blob, with the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDocument {
    /// Display name, usually the source path
    pub name: String,
    /// Raw JSON text
    pub text: String,
}

impl SettingsDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        Ok(Self::new(path.display().to_string(), text))
    }

    /// Whether the document carries any content at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Check whether `path` names a settings file.
///
/// Only the final path component is compared, ignoring ASCII case, so
/// `config/AppSettings.JSON` matches `appsettings.json` while
/// `appsettings.Development.json` does not.
#[must_use]
pub fn is_settings_file(path: &Path, file_name: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(file_name))
}

/// List the settings files directly inside `dir`, sorted by path.
pub fn discover_settings_files(dir: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| GeneratorError::io(dir, e))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GeneratorError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && is_settings_file(&path, file_name) {
            found.push(path);
        }
    }
    found.sort();

    tracing::debug!("Found {} settings file(s) in {}", found.len(), dir.display());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_settings_file_ignores_case() {
        assert!(is_settings_file(Path::new("appsettings.json"), "appsettings.json"));
        assert!(is_settings_file(
            Path::new("src/App/AppSettings.JSON"),
            "appsettings.json"
        ));
    }

    #[test]
    fn test_is_settings_file_requires_exact_name() {
        assert!(!is_settings_file(
            Path::new("appsettings.Development.json"),
            "appsettings.json"
        ));
        assert!(!is_settings_file(Path::new("myappsettings.json"), "appsettings.json"));
        assert!(!is_settings_file(Path::new("appsettings.json/"), "other.json"));
    }

    #[test]
    fn test_blank_document() {
        assert!(SettingsDocument::new("a", "  \n\t").is_blank());
        assert!(!SettingsDocument::new("a", "{}").is_blank());
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let err = SettingsDocument::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, GeneratorError::Io { path: Some(_), .. }));
    }

    #[test]
    fn test_discover_settings_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("appsettings.json"), "{}").unwrap();
        std::fs::write(dir.path().join("other.json"), "{}").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("appsettings.json"), "{}").unwrap();

        let found = discover_settings_files(dir.path(), "appsettings.json").unwrap();
        assert_eq!(found, vec![dir.path().join("appsettings.json")]);
    }
}
