//! Merge command handler.

use super::SettingsInput;
use crate::config::GeneratorConfig;
use crate::pipeline::{exit_codes, write_output, GeneratorDriver, OutputTarget};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the merge command, printing the merged settings tree as pretty JSON
pub fn run_merge(
    settings: &SettingsInput,
    output_file: Option<PathBuf>,
    config: &GeneratorConfig,
    quiet: bool,
) -> Result<i32> {
    let documents = settings.load(&config.settings_file_name)?;
    let merged = GeneratorDriver::try_new(config.clone())?
        .merge(&documents)
        .context("Merge failed")?;

    let json = serde_json::to_string_pretty(&merged.tree.to_json_value())
        .context("Failed to serialize merged settings")?;
    write_output(&json, &OutputTarget::from_option(output_file), quiet)?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_files_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("a.json");
        let second = tmp.path().join("b.json");
        std::fs::write(&first, r#"{"Db": {"Host": "a", "Port": 1}, "Name": "first"}"#).unwrap();
        std::fs::write(
            &second,
            r#"{"Db": {"Host": "b", "Port": 2, "Timeout": 5}, "Name": "second"}"#,
        )
        .unwrap();
        let out = tmp.path().join("merged.json");

        let input = SettingsInput {
            files: vec![first, second],
            dir: None,
        };
        let code = run_merge(&input, Some(out.clone()), &GeneratorConfig::default(), true).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let merged: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(
            merged,
            serde_json::json!({
                "Db": {"Host": "b", "Port": 2, "Timeout": 5},
                "Name": "first"
            })
        );
    }

    #[test]
    fn test_merge_output_keeps_key_order() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = tmp.path().join("appsettings.json");
        std::fs::write(&settings, r#"{"Zeta": {"b": 1, "a": 2}, "Alpha": {}}"#).unwrap();
        let out = tmp.path().join("merged.json");

        let input = SettingsInput {
            files: vec![settings],
            dir: None,
        };
        run_merge(&input, Some(out.clone()), &GeneratorConfig::default(), true).unwrap();

        let text = std::fs::read_to_string(out).unwrap();
        let position = |needle: &str| text.find(needle).unwrap();
        assert!(position("\"Zeta\"") < position("\"Alpha\""), "{text}");
        assert!(position("\"b\"") < position("\"a\""), "{text}");
    }
}
