//! Settings documents and the merged settings tree.
//!
//! A project may carry several `appsettings.json` files. They are parsed into
//! [`SettingsTree`]s and folded into one tree by [`ConfigTreeMerger`]; the
//! top-level object entries of that tree are the *sections* that
//! configuration classes bind to.
//!
//! ```
//! use appsettings_gen::settings::merge_json_texts;
//!
//! let tree = merge_json_texts(&[
//!     r#"{"Db": {"Host": "a", "Port": 1}}"#,
//!     r#"{"Db": {"Host": "a", "Port": 1, "Timeout": 5}}"#,
//! ])
//! .unwrap();
//!
//! assert_eq!(tree.section("Db").unwrap().len(), 3);
//! ```

mod document;
mod merge;
mod tree;

pub use document::{discover_settings_files, is_settings_file, SettingsDocument};
pub use merge::{merge_json_texts, merge_trees, ConfigTreeMerger, MergedSettings};
pub use tree::{JsonKind, SettingsTree, SettingsValue};
