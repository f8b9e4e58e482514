//! JSON deserialization types for the two configuration formats (DTO layer).
//!
//! These types exist solely for serde deserialization; the format
//! strategies fold them into a [`super::ConfigSnapshot`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::plugin::PluginManifest;
use crate::types::RuleConfig;

/// A legacy (eslintrc-style) configuration object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacyConfigDto {
    /// Configurations this one extends, merged in order before own rules.
    pub extends: Option<ExtendsDto>,

    /// Plugins referenced by short name.
    pub plugins: Vec<String>,

    /// Rule configurations, keyed by rule id.
    pub rules: BTreeMap<String, RuleConfig>,

    /// File-scoped override blocks.
    pub overrides: Vec<OverrideDto>,
}

/// `extends` accepts a single entry or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExtendsDto {
    /// Single entry: `"extends": "./base.json"`.
    Single(String),
    /// Multiple entries, merged in array order.
    Multiple(Vec<String>),
}

impl ExtendsDto {
    /// All entries in merge order.
    #[must_use]
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Multiple(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

/// A legacy `overrides` block, applied when its file patterns match.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideDto {
    /// File patterns selecting what the override applies to.
    pub files: FilesDto,

    /// Additional plugins the override brings in.
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Rule configurations layered over the base config.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

/// `files` accepts a single pattern or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FilesDto {
    /// Single pattern.
    Single(String),
    /// Multiple patterns; any match selects the block.
    Multiple(Vec<String>),
}

impl FilesDto {
    /// All patterns.
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Multiple(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

/// One entry of a flat configuration array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatEntryDto {
    /// File patterns the entry applies to; empty means global.
    pub files: Vec<String>,

    /// Ignore patterns; an entry carrying only these is a global ignore.
    pub ignores: Vec<String>,

    /// Plugin bindings: namespace key to package name or inline manifest.
    pub plugins: BTreeMap<String, PluginSpecDto>,

    /// Rule configurations, keyed by (possibly qualified) rule id.
    pub rules: BTreeMap<String, RuleConfig>,

    /// Language options; carried through but not interpreted here.
    pub language_options: Option<serde_json::Value>,
}

impl FlatEntryDto {
    /// Whether the entry does nothing but declare global ignores.
    #[must_use]
    pub fn is_global_ignore(&self) -> bool {
        !self.ignores.is_empty()
            && self.files.is_empty()
            && self.plugins.is_empty()
            && self.rules.is_empty()
    }
}

/// A flat `plugins` value: a package reference or an inline manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PluginSpecDto {
    /// Package name resolved through the plugin loader.
    Package(String),
    /// Manifest carried inline by the document.
    Inline(PluginManifest),
}

/// A flat document: an array of entries, or a single entry for the
/// degenerate one-block case.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlatDocumentDto {
    /// The usual ordered array form.
    Entries(Vec<FlatEntryDto>),
    /// A single configuration object.
    Single(FlatEntryDto),
}

impl FlatDocumentDto {
    /// The entries in fold order.
    #[must_use]
    pub fn into_entries(self) -> Vec<FlatEntryDto> {
        match self {
            Self::Entries(entries) => entries,
            Self::Single(entry) => vec![entry],
        }
    }
}
