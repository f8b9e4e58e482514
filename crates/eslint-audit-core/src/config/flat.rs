//! Flat-format resolution: per-extension entry folding.

use std::collections::BTreeMap;

use crate::types::RuleConfig;

use super::dto::{FlatEntryDto, PluginSpecDto};
use super::{pattern_matches_file, representative_file, ConfigSnapshot, PluginSource};

/// Resolves a flat entry array into an effective snapshot.
///
/// One pass per requested extension (a single `.js`-representative pass
/// when the filter is empty). Within a pass, entries fold in array order
/// and later entries override earlier ones per rule; across passes the
/// per-extension maps are unioned, so a rule enabled by any matched
/// extension stays enabled. Plugin bindings come from matched entries
/// only.
pub(crate) fn resolve(entries: &[FlatEntryDto], exts: &[String]) -> ConfigSnapshot {
    let representatives: Vec<String> = if exts.is_empty() {
        vec![representative_file(".js")]
    } else {
        exts.iter().map(|e| representative_file(e)).collect()
    };

    let mut rules: BTreeMap<String, RuleConfig> = BTreeMap::new();
    let mut plugins: BTreeMap<String, PluginSource> = BTreeMap::new();

    for rep in &representatives {
        if globally_ignored(entries, rep) {
            tracing::debug!("{rep} is globally ignored, skipping pass");
            continue;
        }

        let mut pass_rules: BTreeMap<String, RuleConfig> = BTreeMap::new();
        for entry in entries {
            if !entry_applies(entry, rep) {
                continue;
            }
            for (key, spec) in &entry.plugins {
                plugins.insert(key.clone(), plugin_source(spec));
            }
            for (id, config) in &entry.rules {
                pass_rules.insert(id.clone(), config.clone());
            }
        }

        union_pass(&mut rules, pass_rules);
    }

    ConfigSnapshot::new(rules, plugins)
}

/// Whether an entry that only declares `ignores` cancels this pass.
fn globally_ignored(entries: &[FlatEntryDto], rep: &str) -> bool {
    entries.iter().any(|entry| {
        entry.is_global_ignore()
            && entry
                .ignores
                .iter()
                .any(|pattern| pattern_matches_file(pattern, rep))
    })
}

fn entry_applies(entry: &FlatEntryDto, rep: &str) -> bool {
    if entry.is_global_ignore() {
        return false;
    }
    if entry
        .ignores
        .iter()
        .any(|pattern| pattern_matches_file(pattern, rep))
    {
        return false;
    }
    entry.files.is_empty()
        || entry
            .files
            .iter()
            .any(|pattern| pattern_matches_file(pattern, rep))
}

fn plugin_source(spec: &PluginSpecDto) -> PluginSource {
    match spec {
        PluginSpecDto::Package(name) => PluginSource::Package(name.clone()),
        PluginSpecDto::Inline(manifest) => PluginSource::Inline(manifest.clone()),
    }
}

/// Unions one pass into the accumulated map. A rule already enabled stays
/// enabled; an off entry never shadows an enabled one from another pass.
fn union_pass(rules: &mut BTreeMap<String, RuleConfig>, pass: BTreeMap<String, RuleConfig>) {
    for (id, config) in pass {
        match rules.get(&id) {
            Some(existing) if existing.is_enabled() => {}
            _ => {
                rules.insert(id, config);
            }
        }
    }
}
