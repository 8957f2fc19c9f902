//! Schema command handler.

use crate::pipeline::{exit_codes, write_output, OutputTarget};
use anyhow::Result;
use clap::ValueEnum;
use std::path::PathBuf;

/// Which document format to describe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    /// The semantic model document read by `--model`
    #[default]
    Model,
    /// The YAML configuration file
    Config,
}

/// Run the schema command
pub fn run_schema(kind: SchemaKind, output_file: Option<PathBuf>, quiet: bool) -> Result<i32> {
    let schema = match kind {
        SchemaKind::Model => crate::model::generate_json_schema(),
        SchemaKind::Config => crate::config::generate_json_schema(),
    };
    write_output(&schema, &OutputTarget::from_option(output_file), quiet)?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_kinds_differ() {
        let tmp = tempfile::tempdir().unwrap();
        let model = tmp.path().join("model.schema.json");
        let config = tmp.path().join("config.schema.json");

        run_schema(SchemaKind::Model, Some(model.clone()), true).unwrap();
        run_schema(SchemaKind::Config, Some(config.clone()), true).unwrap();

        let model = std::fs::read_to_string(model).unwrap();
        let config = std::fs::read_to_string(config).unwrap();
        assert!(model.contains("syntax_trees"));
        assert!(config.contains("marker_suffix"));
    }
}
