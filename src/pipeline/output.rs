//! Output handling for generated source and reports.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }
}

/// Write output to the target (stdout or file)
///
/// Parent directories of a file target are created as needed, so generated
/// sources can go straight into a build output directory.
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        OutputTarget::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory {}", parent.display())
                    })?;
                }
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Output written to {}", path.display());
            }
            Ok(())
        }
    }
}
