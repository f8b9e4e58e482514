//! Failure taxonomy for configuration resolution and catalog construction.
//!
//! Every variant is fatal for the invocation that raised it; nothing is
//! retried and no partial catalog is ever returned.

use std::path::PathBuf;

/// Errors raised while resolving a configuration or building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// No config path was given and the project has no resolvable entry point.
    #[error("no lint configuration found under {}", dir.display())]
    ConfigNotFound {
        /// Directory the resolution started from.
        dir: PathBuf,
    },

    /// Flat config was requested against an engine that cannot evaluate it.
    #[error("This version of ESLint does not support flat config.")]
    UnsupportedFlatConfig,

    /// A plugin referenced by the configuration could not be loaded.
    #[error("cannot resolve plugin `{name}`: {reason}")]
    PluginResolution {
        /// Package name of the plugin that failed to resolve.
        name: String,
        /// Why resolution failed.
        reason: String,
    },

    /// A configuration document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A configuration document could not be decoded.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// Path of the offending document.
        path: PathBuf,
        /// Decoder error message.
        message: String,
    },
}
