//! Builtin rule registry capability.
//!
//! The classifier never hardcodes the core rule set; it reads it through
//! the [`RuleRegistry`] capability so hosts and tests can substitute their
//! own inventory. [`BuiltinRegistry::bundled`] ships a metadata snapshot of
//! the ESLint core rules.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Metadata the registry and plugin manifests know about a single rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleInfo {
    /// Whether the rule is deprecated in its owning registry.
    #[serde(default)]
    pub deprecated: bool,

    /// Stable identity of the underlying implementation.
    ///
    /// Re-exports of one implementation share a `uid`; the catalog uses it
    /// to drop bare aliases of plugin-qualified rules. Manifests that omit
    /// it never participate in dedup.
    #[serde(default)]
    pub uid: Option<String>,
}

impl RuleInfo {
    /// Metadata for an active rule with no identity fingerprint.
    #[must_use]
    pub fn active() -> Self {
        Self::default()
    }

    /// Metadata for a deprecated rule with no identity fingerprint.
    #[must_use]
    pub fn deprecated() -> Self {
        Self {
            deprecated: true,
            uid: None,
        }
    }

    /// Attaches an identity fingerprint.
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }
}

/// Read-only capability listing every rule a core registry provides.
pub trait RuleRegistry {
    /// Returns the full rule inventory, keyed by unqualified rule id.
    fn rules(&self) -> &BTreeMap<String, RuleInfo>;
}

/// The bundled snapshot of ESLint core rule metadata.
const BUILTIN_RULES_JSON: &str = include_str!("../data/builtin-rules.json");

/// Registry backed by an in-memory rule map.
#[derive(Debug, Clone, Default)]
pub struct BuiltinRegistry {
    rules: BTreeMap<String, RuleInfo>,
}

impl BuiltinRegistry {
    /// Loads the bundled core rule snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the embedded snapshot is malformed, which is a build
    /// defect rather than a runtime condition.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn bundled() -> Self {
        let rules: BTreeMap<String, RuleInfo> =
            serde_json::from_str(BUILTIN_RULES_JSON).expect("bundled rule snapshot is valid JSON");
        Self { rules }
    }

    /// Builds a registry from an explicit rule inventory.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (String, RuleInfo)>,
    {
        Self {
            rules: rules.into_iter().collect(),
        }
    }
}

impl RuleRegistry for BuiltinRegistry {
    fn rules(&self) -> &BTreeMap<String, RuleInfo> {
        &self.rules
    }
}
