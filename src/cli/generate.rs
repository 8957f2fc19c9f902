//! Generate command handler.
//!
//! Implements the `generate` subcommand: a full generation pass from files on disk.

use super::SettingsInput;
use crate::config::GeneratorConfig;
use crate::model::ProgramModel;
use crate::pipeline::{exit_codes, write_output, GenerationOutcome, GeneratorDriver, OutputTarget};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Run the generate command
///
/// The generated source goes to `output_file` or stdout. A configuration
/// mismatch prints the diagnostic to stderr and yields
/// [`exit_codes::CONFIGURATION_ERRORS`].
pub fn run_generate(
    model_path: &Path,
    settings: &SettingsInput,
    output_file: Option<PathBuf>,
    config: &GeneratorConfig,
    quiet: bool,
) -> Result<i32> {
    let model = ProgramModel::from_path(model_path)
        .with_context(|| format!("Failed to load semantic model {}", model_path.display()))?;
    let documents = settings.load(&config.settings_file_name)?;

    let outcome = GeneratorDriver::try_new(config.clone())?
        .run(&documents, &model)
        .context("Generation failed")?;

    match outcome {
        GenerationOutcome::Generated(source) => {
            write_output(&source.text, &OutputTarget::from_option(output_file), quiet)?;
            Ok(exit_codes::SUCCESS)
        }
        GenerationOutcome::Failed { diagnostic, errors } => {
            eprintln!("{diagnostic}");
            if !quiet {
                for error in &errors {
                    eprintln!("  - {error}");
                }
            }
            Ok(exit_codes::CONFIGURATION_ERRORS)
        }
        GenerationOutcome::Skipped => Ok(exit_codes::SUCCESS),
    }
}
