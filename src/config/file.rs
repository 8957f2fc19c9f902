//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::GeneratorConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".appsettings-gen.yaml",
    ".appsettings-gen.yml",
    "appsettings-gen.yaml",
    "appsettings-gen.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/appsettings-gen/)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("appsettings-gen")))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load a `GeneratorConfig` from a YAML file.
///
/// An empty file yields the default configuration.
pub fn load_config_file(path: &Path) -> Result<GeneratorConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(GeneratorConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// Load config from an explicit or discovered file, or fall back to defaults.
///
/// An explicit path that cannot be loaded is an error; a discovered file that
/// fails to load is reported and skipped.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(GeneratorConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        return load_config_file(path).map(|config| (config, Some(path.to_path_buf())));
    }

    Ok(discover_config_file(None).map_or_else(
        || (GeneratorConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (GeneratorConfig::default(), None)
            }
        },
    ))
}

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        "# appsettings-gen configuration\n\
         # Place this file at .appsettings-gen.yaml in your project root\n\
         # or ~/.config/appsettings-gen/\n\n{}",
        serde_yaml::to_string(&GeneratorConfig::default()).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================
