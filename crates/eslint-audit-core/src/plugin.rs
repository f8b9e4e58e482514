//! Plugin loader capability.
//!
//! Plugins are referenced by package name; what the engine needs from them
//! is metadata only (their exported rule map and shareable configs), so
//! loading is an injected capability rather than module resolution baked
//! into the resolver. [`NodeModulesLoader`] covers real projects on disk;
//! [`StaticPluginLoader`] covers tests and hosts that already hold their
//! plugin inventory in memory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::FinderError;
use crate::registry::RuleInfo;
use crate::types::RuleConfig;

/// Metadata a plugin package exports.
///
/// A plugin without a `rules` export (a processor-only plugin) is valid
/// and contributes nothing to the catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginManifest {
    /// Rules exported by the plugin, keyed by unqualified rule id.
    #[serde(default)]
    pub rules: Option<BTreeMap<String, RuleInfo>>,

    /// Shareable configs exported by the plugin, keyed by preset name.
    #[serde(default)]
    pub configs: Option<BTreeMap<String, PresetConfig>>,
}

impl PluginManifest {
    /// Builds a manifest from a rule inventory.
    pub fn with_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (String, RuleInfo)>,
    {
        Self {
            rules: Some(rules.into_iter().collect()),
            configs: None,
        }
    }
}

/// A shareable config exported by a plugin under `configs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresetConfig {
    /// Rule configurations the preset applies.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

/// Read-only capability resolving a plugin package name to its manifest.
pub trait PluginLoader {
    /// Loads the manifest for `package`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::PluginResolution`] when the package cannot
    /// be located; a located package with no rule metadata is not an
    /// error.
    fn load(&self, package: &str) -> Result<PluginManifest, FinderError>;
}

/// In-memory loader over a fixed plugin inventory.
#[derive(Debug, Clone, Default)]
pub struct StaticPluginLoader {
    plugins: BTreeMap<String, PluginManifest>,
}

impl StaticPluginLoader {
    /// Builds a loader from `(package name, manifest)` pairs.
    pub fn new<I>(plugins: I) -> Self
    where
        I: IntoIterator<Item = (String, PluginManifest)>,
    {
        Self {
            plugins: plugins.into_iter().collect(),
        }
    }
}

impl PluginLoader for StaticPluginLoader {
    fn load(&self, package: &str) -> Result<PluginManifest, FinderError> {
        self.plugins
            .get(package)
            .cloned()
            .ok_or_else(|| FinderError::PluginResolution {
                name: package.to_string(),
                reason: "not in the static plugin inventory".to_string(),
            })
    }
}

/// Name of the rule-metadata manifest inside an installed plugin package.
const MANIFEST_FILE: &str = "rules.json";

/// Loader that resolves packages from the nearest `node_modules` directory.
///
/// Resolution walks ancestor directories of the search root, the same way
/// module resolution does. The rule metadata is read from the package's
/// `rules.json` manifest; a package installed without one contributes no
/// rules.
#[derive(Debug, Clone)]
pub struct NodeModulesLoader {
    root: PathBuf,
}

impl NodeModulesLoader {
    /// Creates a loader searching upward from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn locate(&self, package: &str) -> Option<PathBuf> {
        self.root
            .ancestors()
            .map(|dir| dir.join("node_modules").join(package))
            .find(|candidate| candidate.is_dir())
    }
}

impl PluginLoader for NodeModulesLoader {
    fn load(&self, package: &str) -> Result<PluginManifest, FinderError> {
        let Some(package_dir) = self.locate(package) else {
            return Err(FinderError::PluginResolution {
                name: package.to_string(),
                reason: format!("not installed under any node_modules of {}", self.root.display()),
            });
        };

        let manifest_path = package_dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            tracing::debug!(
                "plugin {} has no {}, treating as rule-less",
                package,
                MANIFEST_FILE
            );
            return Ok(PluginManifest::default());
        }

        let content =
            std::fs::read_to_string(&manifest_path).map_err(|source| FinderError::Io {
                path: manifest_path.clone(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|e| FinderError::Parse {
            path: manifest_path,
            message: e.to_string(),
        })
    }
}
