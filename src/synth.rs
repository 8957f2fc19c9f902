//! Source text for the aggregate host type.

use crate::extract::ClassDescriptions;
use crate::validate::DEFAULT_HOST_KEY;
use std::fmt::Write as _;

/// Marker placed on the first line of every generated file.
pub const AUTO_GENERATED_MARKER: &str = "// <auto-generated />";

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Emits the partial class that exposes every configuration section.
#[derive(Debug, Clone)]
pub struct AggregateSourceSynthesizer {
    host_key: String,
    indent_width: usize,
}

impl Default for AggregateSourceSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_KEY)
    }
}

impl AggregateSourceSynthesizer {
    pub fn new(host_key: impl Into<String>) -> Self {
        Self {
            host_key: host_key.into(),
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }

    #[must_use]
    pub const fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Source of the aggregate type, or `None` when no host class exists.
    ///
    /// The aggregate reuses the host class's name and namespace and is
    /// declared `partial`, so it extends the user's own declaration. Every
    /// other class becomes one property named by its section key.
    #[must_use]
    pub fn synthesize(&self, classes: &ClassDescriptions) -> Option<String> {
        let Some(host) = classes.get(&self.host_key) else {
            tracing::debug!("No {} class found, nothing to generate", self.host_key);
            return None;
        };

        let sections: Vec<_> = classes
            .iter()
            .filter(|(key, _)| **key != self.host_key)
            .collect();

        let mut imports: Vec<&str> = Vec::new();
        for (_, class) in &sections {
            let ns = class.namespace.as_str();
            if !ns.is_empty() && ns != host.namespace && !imports.contains(&ns) {
                imports.push(ns);
            }
        }

        let level = |n: usize| " ".repeat(n * self.indent_width);
        let in_namespace = !host.namespace.is_empty();
        let base = usize::from(in_namespace);

        let mut out = String::new();
        out.push_str(AUTO_GENERATED_MARKER);
        out.push('\n');
        for ns in &imports {
            let _ = writeln!(out, "using {ns};");
        }
        out.push('\n');

        if in_namespace {
            let _ = writeln!(out, "namespace {}", host.namespace);
            out.push_str("{\n");
        }
        let _ = writeln!(
            out,
            "{}public partial class {}",
            level(base),
            host.class_name
        );
        let _ = writeln!(out, "{}{{", level(base));
        for (key, class) in &sections {
            let _ = writeln!(
                out,
                "{}public {} {} {{ get; set; }}",
                level(base + 1),
                class.class_name,
                key
            );
        }
        let _ = writeln!(out, "{}}}", level(base));
        if in_namespace {
            out.push_str("}\n");
        }

        tracing::debug!(
            "Synthesized {} with {} section properties",
            host.class_name,
            sections.len()
        );
        Some(out)
    }
}
