//! Check command handler.
//!
//! Implements the `check` subcommand: merge, extract and validate without
//! generating anything.

use super::SettingsInput;
use crate::config::GeneratorConfig;
use crate::model::ProgramModel;
use crate::pipeline::{exit_codes, write_output, CheckReport, GeneratorDriver, OutputTarget};
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Output format for the check report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CheckFormat {
    /// One line per error
    #[default]
    Text,
    /// A JSON object with the class keys and error messages
    Json,
}

/// Run the check command
pub fn run_check(
    model_path: &Path,
    settings: &SettingsInput,
    format: CheckFormat,
    output_file: Option<PathBuf>,
    config: &GeneratorConfig,
    quiet: bool,
) -> Result<i32> {
    let model = ProgramModel::from_path(model_path)
        .with_context(|| format!("Failed to load semantic model {}", model_path.display()))?;
    let documents = settings.load(&config.settings_file_name)?;

    let report = GeneratorDriver::try_new(config.clone())?
        .check(&documents, &model)
        .context("Check failed")?;

    let content = match format {
        CheckFormat::Text => format_text(&report),
        CheckFormat::Json => format_json(&report)?,
    };
    write_output(&content, &OutputTarget::from_option(output_file), quiet)?;

    Ok(if report.is_valid() {
        exit_codes::SUCCESS
    } else {
        exit_codes::CONFIGURATION_ERRORS
    })
}

fn format_text(report: &CheckReport) -> String {
    if report.is_valid() {
        return format!(
            "OK: {} configuration class(es) match the settings\n",
            report.classes.len()
        );
    }

    let mut out = String::new();
    for message in report.messages() {
        out.push_str(&message);
        out.push('\n');
    }
    out
}

fn format_json(report: &CheckReport) -> Result<String> {
    let value = serde_json::json!({
        "valid": report.is_valid(),
        "documents": report.merged.merged_documents,
        "classes": report.classes.keys().collect::<Vec<_>>(),
        "errors": report.messages(),
    });
    serde_json::to_string_pretty(&value).context("Failed to serialize check report")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "syntax_trees": [{
            "types": [
                {"name": "RedisConfiguration", "namespace": "App", "members": [
                    {"kind": "property_getter", "property": "Enabled",
                     "return_type": {"name": "Boolean", "full_name": "bool", "is_value_type": true}}
                ]}
            ]
        }]
    }"#;

    fn run(settings: &str, format: CheckFormat) -> (i32, String) {
        let tmp = tempfile::tempdir().unwrap();
        let model = tmp.path().join("model.json");
        std::fs::write(&model, MODEL).unwrap();
        let settings_path = tmp.path().join("appsettings.json");
        std::fs::write(&settings_path, settings).unwrap();
        let out = tmp.path().join("report.txt");

        let input = SettingsInput {
            files: vec![settings_path],
            dir: None,
        };
        let code = run_check(
            &model,
            &input,
            format,
            Some(out.clone()),
            &GeneratorConfig::default(),
            true,
        )
        .unwrap();
        (code, std::fs::read_to_string(out).unwrap())
    }

    #[test]
    fn test_check_text_ok() {
        let (code, text) = run(r#"{"Redis": {"Enabled": true}}"#, CheckFormat::Text);
        assert_eq!(code, exit_codes::SUCCESS);
        assert!(text.starts_with("OK: 1 configuration class(es)"));
    }

    #[test]
    fn test_check_text_errors() {
        let (code, text) = run("{}", CheckFormat::Text);
        assert_eq!(code, exit_codes::CONFIGURATION_ERRORS);
        assert_eq!(
            text,
            "Configuration for class Redis not found in json file.\n"
        );
    }

    #[test]
    fn test_check_json() {
        let (code, text) = run(r#"{"Redis": {}}"#, CheckFormat::Json);
        assert_eq!(code, exit_codes::CONFIGURATION_ERRORS);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["classes"], serde_json::json!(["Redis"]));
        assert_eq!(
            value["errors"][0],
            "Class Redis, Property: Enabled. The field must be present in the configuration file."
        );
    }
}
