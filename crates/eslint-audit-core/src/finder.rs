//! The rule classifier: six set queries over a built catalog + snapshot.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::{RuleCatalog, RuleMetadata, RuleSource};
use crate::config::{ConfigResolver, ConfigSnapshot};
use crate::engine::EngineCapabilities;
use crate::error::FinderError;
use crate::plugin::{NodeModulesLoader, PluginLoader};
use crate::registry::{BuiltinRegistry, RuleRegistry};
use crate::types::RuleConfig;

/// Options controlling classification.
#[derive(Debug, Clone, Default)]
pub struct FinderOptions {
    /// Leave the builtin registry out of the catalog.
    pub omit_core: bool,

    /// Include deprecated rules in the classification sets.
    pub include_deprecated: bool,

    /// Extension filter; entries may be given with or without a leading
    /// dot. Empty means the default lint target.
    pub ext: Vec<String>,

    /// Force the flat or legacy format; `None` lets the engine's
    /// capability decide.
    pub use_flat_config: Option<bool>,
}

/// Classifies every rule visible to a project's lint configuration.
///
/// Construction resolves the configuration and builds the catalog once;
/// every query is a pure, synchronous read after that. Build a new finder
/// per config file under inspection.
///
/// # Example
///
/// ```ignore
/// let finder = RuleFinder::builder()
///     .working_dir("./fixtures/project")
///     .config_file("eslint.json")
///     .build()?;
/// for rule in finder.unused_rules() {
///     println!("{rule}");
/// }
/// ```
#[derive(Debug)]
pub struct RuleFinder {
    catalog: RuleCatalog,
    snapshot: ConfigSnapshot,
    options: FinderOptions,
}

impl RuleFinder {
    /// Starts building a finder.
    #[must_use]
    pub fn builder() -> RuleFinderBuilder {
        RuleFinderBuilder::default()
    }

    /// Every rule id in the catalog, ascending.
    #[must_use]
    pub fn all_available_rules(&self) -> Vec<String> {
        self.catalog
            .entries()
            .iter()
            .filter(|(_, meta)| self.included(meta))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Catalog ids enabled (non-zero severity) by the configuration,
    /// ascending.
    #[must_use]
    pub fn current_rules(&self) -> Vec<String> {
        self.current_rules_detailed().into_keys().collect()
    }

    /// The enabled rules with their full severity + options tuples.
    #[must_use]
    pub fn current_rules_detailed(&self) -> BTreeMap<String, RuleConfig> {
        self.snapshot
            .rules()
            .iter()
            .filter(|(id, config)| {
                config.is_enabled()
                    && self
                        .catalog
                        .entries()
                        .get(id.as_str())
                        .is_some_and(|meta| self.included(meta))
            })
            .map(|(id, config)| (id.clone(), config.clone()))
            .collect()
    }

    /// Catalog ids supplied by plugins, ascending.
    #[must_use]
    pub fn plugin_rules(&self) -> Vec<String> {
        self.catalog
            .entries()
            .iter()
            .filter(|(_, meta)| meta.source == RuleSource::Plugin && self.included(meta))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Catalog ids flagged deprecated, ascending.
    ///
    /// Always reports deprecation, whatever `include_deprecated` says.
    #[must_use]
    pub fn deprecated_rules(&self) -> Vec<String> {
        self.catalog
            .entries()
            .iter()
            .filter(|(_, meta)| meta.deprecated)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Available rules the configuration does not enable, ascending.
    #[must_use]
    pub fn unused_rules(&self) -> Vec<String> {
        let current = self.current_rules_detailed();
        self.all_available_rules()
            .into_iter()
            .filter(|id| !current.contains_key(id))
            .collect()
    }

    fn included(&self, meta: &RuleMetadata) -> bool {
        self.options.include_deprecated || !meta.deprecated
    }
}

/// Builder for [`RuleFinder`].
///
/// Collaborators default to the real ones (bundled builtin registry,
/// `node_modules` manifest loader, probed engine capabilities); tests and
/// embedding hosts inject substitutes.
#[derive(Default)]
pub struct RuleFinderBuilder {
    working_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    options: FinderOptions,
    registry: Option<Box<dyn RuleRegistry>>,
    loader: Option<Box<dyn PluginLoader>>,
    engine: Option<EngineCapabilities>,
}

impl RuleFinderBuilder {
    /// Sets the project working directory (default: `.`).
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Sets an explicit configuration document path, absolute or relative
    /// to the working directory. Without one, the project's package entry
    /// point names the document.
    #[must_use]
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Sets the classification options.
    #[must_use]
    pub fn options(mut self, options: FinderOptions) -> Self {
        self.options = options;
        self
    }

    /// Substitutes the builtin rule registry.
    #[must_use]
    pub fn registry(mut self, registry: impl RuleRegistry + 'static) -> Self {
        self.registry = Some(Box::new(registry));
        self
    }

    /// Substitutes the plugin loader.
    #[must_use]
    pub fn plugin_loader(mut self, loader: impl PluginLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Substitutes the engine capabilities (skips the probe).
    #[must_use]
    pub fn engine(mut self, engine: EngineCapabilities) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Resolves the configuration, builds the catalog, and returns the
    /// finder.
    ///
    /// # Errors
    ///
    /// Propagates every [`FinderError`] of resolution and catalog
    /// construction; nothing is retried or degraded.
    pub fn build(self) -> Result<RuleFinder, FinderError> {
        let working_dir = self.working_dir.unwrap_or_else(|| PathBuf::from("."));
        let engine = self
            .engine
            .unwrap_or_else(|| EngineCapabilities::probe(&working_dir));
        let loader: Box<dyn PluginLoader> = self
            .loader
            .unwrap_or_else(|| Box::new(NodeModulesLoader::new(&working_dir)));
        let registry: Box<dyn RuleRegistry> = self
            .registry
            .unwrap_or_else(|| Box::new(BuiltinRegistry::bundled()));

        let resolver = ConfigResolver::new(&working_dir, &engine, loader.as_ref());
        let snapshot = resolver.resolve(self.config_file.as_deref(), &self.options)?;
        let catalog =
            RuleCatalog::build(&snapshot, registry.as_ref(), loader.as_ref(), &self.options)?;

        tracing::debug!(
            "catalog holds {} rules, snapshot configures {}",
            catalog.entries().len(),
            snapshot.rules().len()
        );

        Ok(RuleFinder {
            catalog,
            snapshot,
            options: self.options,
        })
    }
}

/// Builds a finder over a project directory with the default
/// collaborators.
///
/// # Errors
///
/// See [`RuleFinderBuilder::build`].
pub fn create_rule_finder(
    working_dir: impl Into<PathBuf>,
    specified_file: Option<&Path>,
    options: FinderOptions,
) -> Result<RuleFinder, FinderError> {
    let mut builder = RuleFinder::builder()
        .working_dir(working_dir)
        .options(options);
    if let Some(path) = specified_file {
        builder = builder.config_file(path);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{PluginManifest, StaticPluginLoader};
    use crate::registry::RuleInfo;
    use std::fs;
    use tempfile::TempDir;

    fn scenario_registry() -> BuiltinRegistry {
        BuiltinRegistry::from_rules([
            ("foo-rule".to_string(), RuleInfo::active()),
            ("bar-rule".to_string(), RuleInfo::active()),
            ("baz-rule".to_string(), RuleInfo::active()),
            ("old-rule".to_string(), RuleInfo::deprecated()),
        ])
    }

    fn finder_for(config: &str, options: FinderOptions) -> RuleFinder {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("eslint.json"), config).unwrap();
        RuleFinder::builder()
            .working_dir(tmp.path())
            .config_file("eslint.json")
            .options(options)
            .registry(scenario_registry())
            .plugin_loader(StaticPluginLoader::default())
            .engine(EngineCapabilities::legacy_only())
            .build()
            .unwrap()
    }

    #[test]
    fn classifies_current_and_unused() {
        let finder = finder_for(r#"{"rules": {"foo-rule": 2}}"#, FinderOptions::default());

        assert_eq!(finder.current_rules(), ["foo-rule"]);
        assert_eq!(finder.unused_rules(), ["bar-rule", "baz-rule"]);
        assert_eq!(
            finder.all_available_rules(),
            ["bar-rule", "baz-rule", "foo-rule"]
        );
    }

    #[test]
    fn deprecated_rules_hidden_unless_included() {
        let finder = finder_for(r#"{"rules": {}}"#, FinderOptions::default());
        assert_eq!(
            finder.all_available_rules(),
            ["bar-rule", "baz-rule", "foo-rule"]
        );

        let finder = finder_for(
            r#"{"rules": {}}"#,
            FinderOptions {
                include_deprecated: true,
                ..FinderOptions::default()
            },
        );
        assert_eq!(
            finder.all_available_rules(),
            ["bar-rule", "baz-rule", "foo-rule", "old-rule"]
        );
    }

    #[test]
    fn deprecated_query_ignores_the_option() {
        let finder = finder_for(r#"{"rules": {}}"#, FinderOptions::default());
        assert_eq!(finder.deprecated_rules(), ["old-rule"]);
    }

    #[test]
    fn detailed_keys_equal_current_set() {
        let finder = finder_for(
            r#"{"rules": {"foo-rule": [2, "always"], "bar-rule": 0}}"#,
            FinderOptions::default(),
        );

        let detailed = finder.current_rules_detailed();
        let keys: Vec<&String> = detailed.keys().collect();
        assert_eq!(keys, finder.current_rules().iter().collect::<Vec<_>>());
        assert_eq!(
            serde_json::to_value(detailed.get("foo-rule").unwrap()).unwrap(),
            serde_json::json!([2, "always"])
        );
    }

    #[test]
    fn available_is_disjoint_union_of_current_and_unused() {
        let finder = finder_for(
            r#"{"rules": {"foo-rule": 1, "bar-rule": 2}}"#,
            FinderOptions::default(),
        );

        let mut union = finder.current_rules();
        union.extend(finder.unused_rules());
        union.sort();
        assert_eq!(union, finder.all_available_rules());

        for id in finder.current_rules() {
            assert!(!finder.unused_rules().contains(&id));
        }
    }

    #[test]
    fn identical_inputs_build_identical_finders() {
        let config = r#"{"rules": {"foo-rule": 2, "bar-rule": 1}}"#;
        let a = finder_for(config, FinderOptions::default());
        let b = finder_for(config, FinderOptions::default());

        assert_eq!(a.all_available_rules(), b.all_available_rules());
        assert_eq!(a.current_rules(), b.current_rules());
        assert_eq!(a.unused_rules(), b.unused_rules());
        assert_eq!(a.current_rules_detailed(), b.current_rules_detailed());
    }

    #[test]
    fn omit_core_makes_available_equal_plugin_set() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("eslint.json"),
            r#"{"plugins": ["plugin"], "rules": {"plugin/foo-rule": 2}}"#,
        )
        .unwrap();

        let loader = StaticPluginLoader::new([(
            "eslint-plugin-plugin".to_string(),
            PluginManifest::with_rules([
                ("foo-rule".to_string(), RuleInfo::active()),
                ("bar-rule".to_string(), RuleInfo::active()),
            ]),
        )]);

        let finder = RuleFinder::builder()
            .working_dir(tmp.path())
            .config_file("eslint.json")
            .options(FinderOptions {
                omit_core: true,
                ..FinderOptions::default()
            })
            .registry(scenario_registry())
            .plugin_loader(loader)
            .engine(EngineCapabilities::legacy_only())
            .build()
            .unwrap();

        assert_eq!(finder.all_available_rules(), finder.plugin_rules());
        assert_eq!(
            finder.plugin_rules(),
            ["plugin/bar-rule", "plugin/foo-rule"]
        );
    }

    #[test]
    fn scoped_ids_sort_before_unscoped() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("eslint.json"),
            r#"{"plugins": ["@scope/scoped-plugin"]}"#,
        )
        .unwrap();

        let loader = StaticPluginLoader::new([(
            "@scope/eslint-plugin-scoped-plugin".to_string(),
            PluginManifest::with_rules([("foo-rule".to_string(), RuleInfo::active())]),
        )]);

        let finder = RuleFinder::builder()
            .working_dir(tmp.path())
            .config_file("eslint.json")
            .registry(scenario_registry())
            .plugin_loader(loader)
            .engine(EngineCapabilities::legacy_only())
            .build()
            .unwrap();

        let all = finder.all_available_rules();
        assert_eq!(all[0], "@scope/scoped-plugin/foo-rule");
    }
}
