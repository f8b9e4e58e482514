//! Lint engine capability probe.
//!
//! Which configuration format applies is a property of the installed
//! linting engine, not of the config file's shape. The probe inspects the
//! installed `eslint` package version; flat config evaluation shipped in
//! 8.21 and became the default in 9.

use std::path::Path;

/// What the project's linting engine is capable of evaluating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCapabilities {
    /// Whether the engine can evaluate flat configs.
    pub flat_config: bool,

    /// The detected engine version, when one was probed.
    pub version: Option<String>,
}

impl EngineCapabilities {
    /// Capabilities of an engine known to evaluate flat configs.
    #[must_use]
    pub fn flat_capable() -> Self {
        Self {
            flat_config: true,
            version: None,
        }
    }

    /// Capabilities of an engine limited to the legacy format.
    #[must_use]
    pub fn legacy_only() -> Self {
        Self {
            flat_config: false,
            version: None,
        }
    }

    /// Probes the engine installed for the project at `working_dir`.
    ///
    /// Reads the version of the nearest installed `eslint` package,
    /// walking ancestor directories like module resolution does. When no
    /// engine is installed the probe reports the legacy-only baseline.
    #[must_use]
    pub fn probe(working_dir: &Path) -> Self {
        let manifest = working_dir
            .ancestors()
            .map(|dir| dir.join("node_modules/eslint/package.json"))
            .find(|candidate| candidate.is_file());

        let Some(manifest) = manifest else {
            tracing::debug!(
                "no eslint package under {}, assuming legacy-only engine",
                working_dir.display()
            );
            return Self::legacy_only();
        };

        let version = std::fs::read_to_string(&manifest)
            .ok()
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .and_then(|pkg| pkg.get("version").and_then(|v| v.as_str().map(String::from)));

        let Some(version) = version else {
            tracing::warn!("unreadable engine manifest {}", manifest.display());
            return Self::legacy_only();
        };

        let flat_config = supports_flat_config(&version);
        tracing::debug!("probed eslint {} (flat config: {})", version, flat_config);
        Self {
            flat_config,
            version: Some(version),
        }
    }
}

/// Whether a version string names a flat-config-capable engine (>= 8.21).
fn supports_flat_config(version: &str) -> bool {
    let mut parts = version.split('.');
    let major: u32 = match parts.next().and_then(|p| p.parse().ok()) {
        Some(n) => n,
        None => return false,
    };
    let minor: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    major > 8 || (major == 8 && minor >= 21)
}
