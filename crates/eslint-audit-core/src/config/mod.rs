//! Configuration resolution: documents in, effective snapshot out.
//!
//! # Architecture
//!
//! ```text
//! JSON document
//!   ↓ serde (DTO layer)
//! dto types (legacy object / flat entry array)
//!   ↓ format strategy (selected by engine capability)
//! legacy::resolve | flat::resolve
//!   ↓
//! ConfigSnapshot (effective rules + plugin bindings)
//! ```

use std::collections::BTreeMap;

use crate::plugin::PluginManifest;
use crate::types::RuleConfig;

pub mod dto;
mod flat;
mod legacy;
mod resolver;

pub use resolver::ConfigResolver;

/// Where a plugin binding's metadata comes from.
#[derive(Debug, Clone)]
pub enum PluginSource {
    /// A package name to resolve through the plugin loader.
    Package(String),
    /// A manifest carried inline by the configuration document.
    Inline(PluginManifest),
}

/// The project's effective configuration, abstracted over format.
///
/// `rules` is the merged rule map (union across extension passes for flat
/// configs); `plugins` are the bindings the configuration references,
/// keyed by namespace key in lexicographic order.
#[derive(Debug, Clone, Default)]
pub struct ConfigSnapshot {
    rules: BTreeMap<String, RuleConfig>,
    plugins: BTreeMap<String, PluginSource>,
}

impl ConfigSnapshot {
    /// Builds a snapshot from already-effective parts.
    #[must_use]
    pub fn new(
        rules: BTreeMap<String, RuleConfig>,
        plugins: BTreeMap<String, PluginSource>,
    ) -> Self {
        Self { rules, plugins }
    }

    /// The effective rule configurations, keyed by rule id.
    #[must_use]
    pub fn rules(&self) -> &BTreeMap<String, RuleConfig> {
        &self.rules
    }

    /// The plugin bindings referenced by the configuration.
    #[must_use]
    pub fn plugins(&self) -> &BTreeMap<String, PluginSource> {
        &self.plugins
    }
}

/// Normalizes an extension filter entry: `"json"` and `".json"` are the
/// same filter.
#[must_use]
pub(crate) fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

/// A representative filename for an extension filter entry.
pub(crate) fn representative_file(ext: &str) -> String {
    format!("file{}", normalize_ext(ext))
}

/// Whether a `files`/`ignores` glob matches a representative filename.
///
/// Patterns are commonly written against nested paths (`**/*.json`), so
/// the representative is tested both bare and one directory deep.
pub(crate) fn pattern_matches_file(pattern: &str, file_name: &str) -> bool {
    let Ok(compiled) = glob::Pattern::new(pattern) else {
        tracing::warn!("ignoring unparsable file pattern: {pattern}");
        return false;
    };
    compiled.matches(file_name) || compiled.matches(&format!("src/{file_name}"))
}
