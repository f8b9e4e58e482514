//! Unified rule catalog: builtin registry merged with plugin exports.

use std::collections::BTreeMap;

use crate::config::{ConfigSnapshot, PluginSource};
use crate::error::FinderError;
use crate::finder::FinderOptions;
use crate::namespace::{namespace_prefix, qualify};
use crate::plugin::{PluginLoader, PluginManifest};
use crate::registry::RuleRegistry;

/// Which registry a catalog entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    /// The builtin rule registry.
    Core,
    /// A plugin's exported rule map.
    Plugin,
}

/// Catalog metadata for a single rule id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMetadata {
    /// Which registry supplied the rule.
    pub source: RuleSource,
    /// Whether the owning registry flags the rule deprecated.
    pub deprecated: bool,
    /// Identity fingerprint of the underlying implementation.
    uid: Option<String>,
}

impl RuleMetadata {
    fn new(source: RuleSource, deprecated: bool, uid: Option<String>) -> Self {
        Self {
            source,
            deprecated,
            uid,
        }
    }
}

/// Every rule visible to a configuration, keyed by (qualified) rule id.
///
/// Built once per finder; immutable thereafter. The `BTreeMap` keys carry
/// the canonical ascending code-point ordering.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    entries: BTreeMap<String, RuleMetadata>,
}

impl RuleCatalog {
    /// Builds the catalog for a snapshot.
    ///
    /// Plugin bindings merge in lexicographic namespace-key order with
    /// last-write-wins on id collision; aliases sharing an implementation
    /// fingerprint collapse onto the plugin-qualified id.
    ///
    /// # Errors
    ///
    /// Propagates plugin resolution failures; no partial catalog is
    /// returned.
    pub fn build(
        snapshot: &ConfigSnapshot,
        registry: &dyn RuleRegistry,
        loader: &dyn PluginLoader,
        options: &FinderOptions,
    ) -> Result<Self, FinderError> {
        let mut entries = BTreeMap::new();

        if !options.omit_core {
            for (id, info) in registry.rules() {
                entries.insert(
                    id.clone(),
                    RuleMetadata::new(RuleSource::Core, info.deprecated, info.uid.clone()),
                );
            }
        }

        for (key, source) in snapshot.plugins() {
            let manifest: PluginManifest = match source {
                PluginSource::Inline(manifest) => manifest.clone(),
                PluginSource::Package(package) => loader.load(package)?,
            };
            let Some(rules) = manifest.rules else {
                tracing::debug!("plugin binding {key} exports no rules");
                continue;
            };
            let prefix = namespace_prefix(key);
            for (id, info) in rules {
                entries.insert(
                    qualify(&prefix, &id),
                    RuleMetadata::new(RuleSource::Plugin, info.deprecated, info.uid),
                );
            }
        }

        dedupe_aliases(&mut entries);

        Ok(Self { entries })
    }

    /// All catalog entries in id order.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, RuleMetadata> {
        &self.entries
    }

    /// Whether an id resolves in the catalog.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }
}

/// Drops bare aliases of plugin-qualified rules.
///
/// Two keys sharing an implementation fingerprint are the same rule; when
/// one of them is plugin-qualified, the bare spelling would double-count
/// it in "all available" totals.
fn dedupe_aliases(entries: &mut BTreeMap<String, RuleMetadata>) {
    let qualified_uids: Vec<String> = entries
        .iter()
        .filter(|(id, meta)| id.contains('/') && meta.uid.is_some())
        .filter_map(|(_, meta)| meta.uid.clone())
        .collect();

    entries.retain(|id, meta| {
        let is_bare_alias = !id.contains('/')
            && meta
                .uid
                .as_ref()
                .is_some_and(|uid| qualified_uids.contains(uid));
        if is_bare_alias {
            tracing::debug!("dropping bare alias {id} of a plugin-qualified rule");
        }
        !is_bare_alias
    });
}
