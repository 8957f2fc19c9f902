//! Settings merge logic
//!
//! Documents are merged left to right into one accumulator:
//! - New keys: inserted as-is
//! - Objects on both sides: the one with more direct children wins, ties keep
//!   the accumulator's; the loser is then merged into the winner
//! - Anything involving a scalar: the first-seen value is kept

use super::document::SettingsDocument;
use super::tree::{SettingsTree, SettingsValue};
use crate::cancel::CancellationFlag;
use crate::error::{ErrorContext, GeneratorError, Result};
use indexmap::map::Entry;

/// Merge `incoming` into `accumulator`.
pub fn merge_trees(accumulator: &mut SettingsTree, incoming: SettingsTree) {
    for (key, incoming_value) in incoming.entries {
        match accumulator.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(incoming_value);
            }
            Entry::Occupied(mut slot) => {
                // Only object-vs-object is resolved; a scalar on either side
                // leaves the existing value in place.
                if let (SettingsValue::Object(existing), SettingsValue::Object(incoming_tree)) =
                    (slot.get_mut(), incoming_value)
                {
                    let loser = if incoming_tree.len() > existing.len() {
                        std::mem::replace(existing, incoming_tree)
                    } else {
                        incoming_tree
                    };
                    merge_trees(existing, loser);
                }
            }
        }
    }
}

/// Result of merging a set of settings documents.
#[derive(Debug, Clone, Default)]
pub struct MergedSettings {
    /// The merged tree
    pub tree: SettingsTree,
    /// Every document's raw text, one after the other, each ending in a newline
    pub raw_content: String,
    /// Number of documents that contributed entries
    pub merged_documents: usize,
}

/// Loads settings documents and folds them into one tree.
#[derive(Debug, Clone, Default)]
pub struct ConfigTreeMerger {
    cancellation: Option<CancellationFlag>,
}

impl ConfigTreeMerger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `flag` before each document.
    #[must_use]
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Parse and merge `documents` in order.
    ///
    /// Blank documents contribute their text to `raw_content` but no entries.
    /// The first malformed document aborts the whole merge.
    pub fn merge(&self, documents: &[SettingsDocument]) -> Result<MergedSettings> {
        let mut merged = MergedSettings::default();

        for document in documents {
            if self
                .cancellation
                .as_ref()
                .is_some_and(CancellationFlag::is_cancelled)
            {
                tracing::debug!("Merge cancelled before {}", document.name);
                return Err(GeneratorError::Cancelled);
            }

            merged.raw_content.push_str(&document.text);
            merged.raw_content.push('\n');

            if document.is_blank() {
                tracing::warn!("Settings document {} is empty, skipping", document.name);
                continue;
            }

            let tree = SettingsTree::from_json_str(&document.text)
                .with_context(|| format!("document {}", document.name))?;
            tracing::debug!(
                "Merging {} ({} top-level entries)",
                document.name,
                tree.len()
            );
            merge_trees(&mut merged.tree, tree);
            merged.merged_documents += 1;
        }

        Ok(merged)
    }
}

/// Merge documents given as plain JSON texts, naming them by position.
pub fn merge_json_texts<S: AsRef<str>>(texts: &[S]) -> Result<SettingsTree> {
    let documents: Vec<_> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| SettingsDocument::new(format!("document #{}", i + 1), text.as_ref()))
        .collect();
    Ok(ConfigTreeMerger::new().merge(&documents)?.tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn merged(texts: &[&str]) -> serde_json::Value {
        merge_json_texts(texts).unwrap().to_json_value()
    }

    #[test]
    fn test_disjoint_keys_union() {
        let result = merged(&[r#"{"a": 1}"#, r#"{"b": {"c": true}}"#]);
        assert_eq!(result, json!({"a": 1, "b": {"c": true}}));
    }

    #[test]
    fn test_merge_keeps_document_key_order() {
        let tree = merge_json_texts(&[
            r#"{"Zeta": {"b": 1, "a": 2}, "Alpha": {}}"#,
            r#"{"Mid": 1, "Zeta": {"y": 1, "x": 2, "b": 3}}"#,
        ])
        .unwrap();

        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["Zeta", "Alpha", "Mid"]);
        // The larger incoming section takes the slot; keys only the loser had follow
        let zeta = tree.section("Zeta").unwrap();
        assert_eq!(zeta.keys().collect::<Vec<_>>(), vec!["y", "x", "b", "a"]);
    }

    #[test]
    fn test_scalar_first_seen_wins() {
        let result = merged(&[r#"{"timeout": 100}"#, r#"{"timeout": 200}"#]);
        assert_eq!(result["timeout"], 100);
    }

    #[test]
    fn test_scalar_never_replaced_by_object() {
        let result = merged(&[r#"{"Db": "inline"}"#, r#"{"Db": {"Host": "a"}}"#]);
        assert_eq!(result["Db"], "inline");
    }

    #[test]
    fn test_object_never_replaced_by_scalar() {
        let result = merged(&[r#"{"Db": {"Host": "a"}}"#, r#"{"Db": 5}"#]);
        assert_eq!(result["Db"], json!({"Host": "a"}));
    }

    #[test]
    fn test_larger_object_wins() {
        let result = merged(&[
            r#"{"Db":{"Host":"a","Port":1}}"#,
            r#"{"Db":{"Host":"a","Port":1,"Timeout":5}}"#,
        ]);
        assert_eq!(result, json!({"Db": {"Host": "a", "Port": 1, "Timeout": 5}}));
    }

    #[test]
    fn test_larger_object_values_take_precedence() {
        let result = merged(&[
            r#"{"Db":{"Host":"first"}}"#,
            r#"{"Db":{"Host":"second","Port":2}}"#,
        ]);
        assert_eq!(result["Db"]["Host"], "second");
        assert_eq!(result["Db"]["Port"], 2);
    }

    #[test]
    fn test_loser_keys_are_kept() {
        let result = merged(&[
            r#"{"Db":{"Legacy":true}}"#,
            r#"{"Db":{"Host":"a","Port":1}}"#,
        ]);
        assert_eq!(
            result["Db"],
            json!({"Host": "a", "Port": 1, "Legacy": true})
        );
    }

    #[test]
    fn test_equal_size_keeps_first() {
        let result = merged(&[r#"{"Db":{"Host":"a"}}"#, r#"{"Db":{"Host":"b"}}"#]);
        assert_eq!(result["Db"]["Host"], "a");
    }

    #[test]
    fn test_nested_levels_merge_recursively() {
        let result = merged(&[
            r#"{"Cache":{"Redis":{"Host":"a"},"Ttl":5}}"#,
            r#"{"Cache":{"Redis":{"Host":"b","Port":6379}}}"#,
        ]);
        assert_eq!(result["Cache"]["Ttl"], 5);
        assert_eq!(result["Cache"]["Redis"], json!({"Host": "b", "Port": 6379}));
    }

    #[test]
    fn test_malformed_document_names_source() {
        let docs = vec![
            SettingsDocument::new("good.json", "{}"),
            SettingsDocument::new("bad/appsettings.json", "{ not json"),
        ];
        let err = ConfigTreeMerger::new().merge(&docs).unwrap_err();
        assert!(
            err.to_string().contains("bad/appsettings.json"),
            "error should name the document: {err}"
        );
    }

    #[test]
    fn test_blank_documents_skipped_but_recorded() {
        let docs = vec![
            SettingsDocument::new("a", ""),
            SettingsDocument::new("b", r#"{"x": 1}"#),
        ];
        let result = ConfigTreeMerger::new().merge(&docs).unwrap();
        assert_eq!(result.merged_documents, 1);
        assert_eq!(result.raw_content, "\n{\"x\": 1}\n");
        assert_eq!(result.tree.len(), 1);
    }

    #[test]
    fn test_no_documents_gives_empty_tree() {
        let result = ConfigTreeMerger::new().merge(&[]).unwrap();
        assert!(result.tree.is_empty());
        assert!(result.raw_content.is_empty());
    }

    #[test]
    fn test_cancellation_checked_between_documents() {
        let flag = CancellationFlag::new();
        flag.cancel();
        let docs = vec![SettingsDocument::new("a", "{}")];
        let err = ConfigTreeMerger::new()
            .with_cancellation(flag)
            .merge(&docs)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Cancelled));
    }
}
