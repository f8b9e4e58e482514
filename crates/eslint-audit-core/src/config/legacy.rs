//! Legacy (eslintrc-style) resolution: extends chain + overrides merge.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::FinderError;
use crate::namespace::{namespace_prefix, plugin_package_name};
use crate::plugin::PluginLoader;
use crate::types::RuleConfig;

use super::dto::LegacyConfigDto;
use super::{pattern_matches_file, representative_file, ConfigSnapshot, PluginSource};

/// Resolves a legacy document into an effective snapshot.
///
/// Merge order per rule: extends chain (in order, depth first), then the
/// document's own rules, then matched overrides (in order). Later entries
/// win.
pub(crate) fn resolve(
    dto: LegacyConfigDto,
    config_dir: &Path,
    exts: &[String],
    loader: &dyn PluginLoader,
) -> Result<ConfigSnapshot, FinderError> {
    let mut rules = BTreeMap::new();
    let mut plugins = BTreeMap::new();
    let mut seen = Vec::new();
    merge_document(dto, config_dir, exts, loader, &mut rules, &mut plugins, &mut seen)?;
    Ok(ConfigSnapshot::new(rules, plugins))
}

/// Representative filenames for override matching.
///
/// The linter's default lint target is `.js`, so an empty filter still
/// matches `.js`-scoped overrides.
fn representatives(exts: &[String]) -> Vec<String> {
    if exts.is_empty() {
        vec![representative_file(".js")]
    } else {
        exts.iter().map(|e| representative_file(e)).collect()
    }
}

fn merge_document(
    dto: LegacyConfigDto,
    config_dir: &Path,
    exts: &[String],
    loader: &dyn PluginLoader,
    rules: &mut BTreeMap<String, RuleConfig>,
    plugins: &mut BTreeMap<String, PluginSource>,
    seen: &mut Vec<PathBuf>,
) -> Result<(), FinderError> {
    if let Some(extends) = &dto.extends {
        for entry in extends.entries() {
            merge_extends_entry(entry, config_dir, exts, loader, rules, plugins, seen)?;
        }
    }

    for short in &dto.plugins {
        bind_plugin(short, plugins);
    }

    rules.extend(dto.rules.clone());

    let reps = representatives(exts);
    for block in &dto.overrides {
        let matched = block
            .files
            .patterns()
            .iter()
            .any(|pattern| reps.iter().any(|rep| pattern_matches_file(pattern, rep)));
        if !matched {
            continue;
        }
        for short in &block.plugins {
            bind_plugin(short, plugins);
        }
        rules.extend(block.rules.clone());
    }

    Ok(())
}

fn bind_plugin(short: &str, plugins: &mut BTreeMap<String, PluginSource>) {
    let package = plugin_package_name(short);
    let key = namespace_prefix(&package);
    plugins.insert(key, PluginSource::Package(package));
}

fn merge_extends_entry(
    entry: &str,
    config_dir: &Path,
    exts: &[String],
    loader: &dyn PluginLoader,
    rules: &mut BTreeMap<String, RuleConfig>,
    plugins: &mut BTreeMap<String, PluginSource>,
    seen: &mut Vec<PathBuf>,
) -> Result<(), FinderError> {
    if let Some(preset_ref) = entry.strip_prefix("plugin:") {
        return merge_plugin_preset(preset_ref, loader, rules, plugins);
    }

    if entry.starts_with('.') || Path::new(entry).is_absolute() {
        let path = config_dir.join(entry);
        // A cyclic extends chain is a config error; break it silently
        // rather than recursing forever.
        if seen.contains(&path) {
            tracing::warn!("cyclic extends chain at {}", path.display());
            return Ok(());
        }
        seen.push(path.clone());

        let content = std::fs::read_to_string(&path).map_err(|source| FinderError::Io {
            path: path.clone(),
            source,
        })?;
        let parsed: LegacyConfigDto =
            serde_json::from_str(&content).map_err(|e| FinderError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;
        let parent_dir = path.parent().unwrap_or(config_dir).to_path_buf();
        return merge_document(parsed, &parent_dir, exts, loader, rules, plugins, seen);
    }

    // Bare presets (eslint:recommended etc.) need linter-internal tables
    // that no injected capability provides.
    tracing::warn!("skipping unresolvable extends entry: {entry}");
    Ok(())
}

fn merge_plugin_preset(
    preset_ref: &str,
    loader: &dyn PluginLoader,
    rules: &mut BTreeMap<String, RuleConfig>,
    plugins: &mut BTreeMap<String, PluginSource>,
) -> Result<(), FinderError> {
    let Some((short, preset)) = preset_ref.rsplit_once('/') else {
        tracing::warn!("malformed plugin preset reference: plugin:{preset_ref}");
        return Ok(());
    };

    let package = plugin_package_name(short);
    let manifest = loader.load(&package)?;
    bind_plugin(short, plugins);

    let Some(config) = manifest.configs.as_ref().and_then(|c| c.get(preset)) else {
        tracing::warn!("plugin {package} exports no `{preset}` config");
        return Ok(());
    };
    rules.extend(config.rules.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{PluginManifest, StaticPluginLoader};
    use crate::types::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn parse(json: &str) -> LegacyConfigDto {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn own_rules_form_the_snapshot() {
        let dto = parse(r#"{"rules": {"foo-rule": 2, "bar-rule": 0}}"#);
        let snapshot =
            resolve(dto, Path::new("."), &[], &StaticPluginLoader::default()).unwrap();

        assert_eq!(snapshot.rules().len(), 2);
        assert!(snapshot.rules().get("foo-rule").unwrap().is_enabled());
        assert!(!snapshot.rules().get("bar-rule").unwrap().is_enabled());
    }

    #[test]
    fn plugins_are_bound_by_namespace_key() {
        let dto = parse(r#"{"plugins": ["plugin", "@scope/scoped-plugin", "@scope"]}"#);
        let snapshot =
            resolve(dto, Path::new("."), &[], &StaticPluginLoader::default()).unwrap();

        let keys: Vec<&String> = snapshot.plugins().keys().collect();
        assert_eq!(keys, ["@scope", "@scope/scoped-plugin", "plugin"]);
        assert!(matches!(
            snapshot.plugins().get("plugin"),
            Some(PluginSource::Package(p)) if p == "eslint-plugin-plugin"
        ));
    }

    #[test]
    fn extends_chain_merges_with_later_winning() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("base.json"),
            r#"{"rules": {"foo-rule": 0, "bar-rule": 1}}"#,
        )
        .unwrap();

        let dto = parse(r#"{"extends": "./base.json", "rules": {"foo-rule": 2}}"#);
        let snapshot =
            resolve(dto, tmp.path(), &[], &StaticPluginLoader::default()).unwrap();

        assert_eq!(
            snapshot.rules().get("foo-rule").unwrap().severity(),
            Severity::Error
        );
        assert_eq!(
            snapshot.rules().get("bar-rule").unwrap().severity(),
            Severity::Warn
        );
    }

    #[test]
    fn extends_chain_is_recursive() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("grandparent.json"),
            r#"{"rules": {"baz-rule": 2}}"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("parent.json"),
            r#"{"extends": "./grandparent.json", "plugins": ["plugin"], "rules": {"bar-rule": 2}}"#,
        )
        .unwrap();

        let dto = parse(r#"{"extends": "./parent.json", "rules": {"foo-rule": 2}}"#);
        let snapshot =
            resolve(dto, tmp.path(), &[], &StaticPluginLoader::default()).unwrap();

        assert_eq!(snapshot.rules().len(), 3);
        assert!(snapshot.plugins().contains_key("plugin"));
    }

    #[test]
    fn cyclic_extends_terminates() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.json"),
            r#"{"extends": "./b.json", "rules": {"foo-rule": 2}}"#,
        )
        .unwrap();
        fs::write(tmp.path().join("b.json"), r#"{"extends": "./a.json"}"#).unwrap();

        let dto = parse(r#"{"extends": "./a.json"}"#);
        let snapshot =
            resolve(dto, tmp.path(), &[], &StaticPluginLoader::default()).unwrap();
        assert!(snapshot.rules().contains_key("foo-rule"));
    }

    #[test]
    fn plugin_preset_rules_are_merged() {
        let manifest: PluginManifest = serde_json::from_str(
            r#"{
                "rules": {"foo-rule": {}},
                "configs": {"recommended": {"rules": {"plugin/foo-rule": 2}}}
            }"#,
        )
        .unwrap();
        let loader = StaticPluginLoader::new([("eslint-plugin-plugin".to_string(), manifest)]);

        let dto = parse(r#"{"extends": "plugin:plugin/recommended"}"#);
        let snapshot = resolve(dto, Path::new("."), &[], &loader).unwrap();

        assert!(snapshot.rules().get("plugin/foo-rule").unwrap().is_enabled());
        assert!(snapshot.plugins().contains_key("plugin"));
    }

    #[test]
    fn bare_presets_are_skipped() {
        let dto = parse(r#"{"extends": "eslint:recommended", "rules": {"foo-rule": 2}}"#);
        let snapshot =
            resolve(dto, Path::new("."), &[], &StaticPluginLoader::default()).unwrap();
        assert_eq!(snapshot.rules().len(), 1);
    }

    #[test]
    fn preset_for_missing_plugin_is_fatal() {
        let dto = parse(r#"{"extends": "plugin:plugin/recommended"}"#);
        let result = resolve(dto, Path::new("."), &[], &StaticPluginLoader::default());
        assert!(matches!(result, Err(FinderError::PluginResolution { .. })));
    }

    #[test]
    fn overrides_apply_when_filter_matches() {
        let dto = parse(
            r#"{
                "rules": {"foo-rule": 2},
                "overrides": [
                    {"files": "*.json", "rules": {"bar-rule": 2}, "plugins": ["plugin"]},
                    {"files": ["*.md"], "rules": {"baz-rule": 2}}
                ]
            }"#,
        );
        let snapshot = resolve(
            dto,
            Path::new("."),
            &[".json".to_string()],
            &StaticPluginLoader::default(),
        )
        .unwrap();

        assert!(snapshot.rules().contains_key("bar-rule"));
        assert!(!snapshot.rules().contains_key("baz-rule"));
        assert!(snapshot.plugins().contains_key("plugin"));
    }

    #[test]
    fn overrides_without_filter_match_js() {
        let dto = parse(
            r#"{
                "overrides": [
                    {"files": "*.js", "rules": {"foo-rule": 2}},
                    {"files": "*.json", "rules": {"bar-rule": 2}}
                ]
            }"#,
        );
        let snapshot =
            resolve(dto, Path::new("."), &[], &StaticPluginLoader::default()).unwrap();

        assert!(snapshot.rules().contains_key("foo-rule"));
        assert!(!snapshot.rules().contains_key("bar-rule"));
    }
}
