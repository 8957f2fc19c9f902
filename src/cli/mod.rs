//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod check;
mod generate;
mod merge;
mod schema;

pub use check::{run_check, CheckFormat};
pub use generate::run_generate;
pub use merge::run_merge;
pub use schema::{run_schema, SchemaKind};

use crate::settings::{discover_settings_files, SettingsDocument};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the settings documents of a pass come from.
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    /// Files given explicitly, merged in the order given
    pub files: Vec<PathBuf>,
    /// Directory searched for settings files, merged after `files`
    pub dir: Option<PathBuf>,
}

impl SettingsInput {
    /// Read every selected document from disk.
    ///
    /// Explicit files are taken as given. Directory entries are filtered by
    /// `file_name`, ignoring case.
    pub fn load(&self, file_name: &str) -> Result<Vec<SettingsDocument>> {
        let mut paths = self.files.clone();
        if let Some(dir) = &self.dir {
            let found = discover_settings_files(dir, file_name)
                .with_context(|| format!("Failed to search {}", dir.display()))?;
            if found.is_empty() {
                tracing::warn!("No {} found in {}", file_name, dir.display());
            }
            paths.extend(found);
        }

        paths.iter().map(|path| load_document(path)).collect()
    }
}

fn load_document(path: &Path) -> Result<SettingsDocument> {
    tracing::debug!("Reading settings document {}", path.display());
    SettingsDocument::from_path(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))
}
