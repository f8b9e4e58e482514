//! Config document location, format selection, and strategy dispatch.

use std::path::{Path, PathBuf};

use crate::engine::EngineCapabilities;
use crate::error::FinderError;
use crate::finder::FinderOptions;
use crate::plugin::PluginLoader;

use super::dto::{FlatDocumentDto, LegacyConfigDto};
use super::{flat, legacy, normalize_ext, ConfigSnapshot};

/// Which format strategy applies to a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Legacy,
    Flat,
}

/// Resolves a project's configuration document into a [`ConfigSnapshot`].
///
/// The working directory is explicit; nothing here consults or mutates
/// process-global state.
pub struct ConfigResolver<'a> {
    working_dir: &'a Path,
    engine: &'a EngineCapabilities,
    loader: &'a dyn PluginLoader,
}

impl<'a> ConfigResolver<'a> {
    /// Creates a resolver for the project at `working_dir`.
    #[must_use]
    pub fn new(
        working_dir: &'a Path,
        engine: &'a EngineCapabilities,
        loader: &'a dyn PluginLoader,
    ) -> Self {
        Self {
            working_dir,
            engine,
            loader,
        }
    }

    /// Resolves the configuration at `specified`, or the one named by the
    /// project's package entry point when no path is given.
    ///
    /// # Errors
    ///
    /// [`FinderError::UnsupportedFlatConfig`] when flat config is
    /// requested against a legacy-only engine;
    /// [`FinderError::ConfigNotFound`] when no path was given and no
    /// entry point resolves; IO/parse/plugin errors propagate verbatim.
    pub fn resolve(
        &self,
        specified: Option<&Path>,
        options: &FinderOptions,
    ) -> Result<ConfigSnapshot, FinderError> {
        let format = self.select_format(options.use_flat_config)?;
        let path = self.config_path(specified)?;
        tracing::debug!(
            "resolving {} as {:?} config",
            path.display(),
            format
        );

        let content = std::fs::read_to_string(&path).map_err(|source| FinderError::Io {
            path: path.clone(),
            source,
        })?;

        let exts: Vec<String> = options.ext.iter().map(|e| normalize_ext(e)).collect();

        match format {
            ConfigFormat::Legacy => {
                let dto: LegacyConfigDto =
                    serde_json::from_str(&content).map_err(|e| FinderError::Parse {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                let config_dir = path.parent().unwrap_or(self.working_dir);
                legacy::resolve(dto, config_dir, &exts, self.loader)
            }
            ConfigFormat::Flat => {
                let doc: FlatDocumentDto =
                    serde_json::from_str(&content).map_err(|e| FinderError::Parse {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                Ok(flat::resolve(&doc.into_entries(), &exts))
            }
        }
    }

    /// Picks the format strategy from the request and the engine's
    /// capability; the config file's shape never participates.
    fn select_format(&self, use_flat_config: Option<bool>) -> Result<ConfigFormat, FinderError> {
        match use_flat_config {
            Some(true) if !self.engine.flat_config => Err(FinderError::UnsupportedFlatConfig),
            Some(true) => Ok(ConfigFormat::Flat),
            Some(false) => Ok(ConfigFormat::Legacy),
            None if self.engine.flat_config => Ok(ConfigFormat::Flat),
            None => Ok(ConfigFormat::Legacy),
        }
    }

    fn config_path(&self, specified: Option<&Path>) -> Result<PathBuf, FinderError> {
        if let Some(path) = specified {
            return Ok(self.working_dir.join(path));
        }
        self.entry_point().ok_or_else(|| FinderError::ConfigNotFound {
            dir: self.working_dir.to_path_buf(),
        })
    }

    /// The project's package entry point (`package.json` `main`), the
    /// fallback location of the exported configuration object.
    fn entry_point(&self) -> Option<PathBuf> {
        let manifest = self.working_dir.join("package.json");
        let content = std::fs::read_to_string(&manifest).ok()?;
        let pkg: serde_json::Value = serde_json::from_str(&content).ok()?;
        let main = pkg.get("main")?.as_str()?;
        Some(self.working_dir.join(main))
    }
}
