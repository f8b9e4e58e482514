//! eslint-audit CLI tool.
//!
//! Usage:
//! ```bash
//! eslint-audit unused [OPTIONS] [CONFIG]
//! eslint-audit current [OPTIONS] [CONFIG]
//! eslint-audit diff <LEFT> <RIGHT>
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Audit which lint rules a project's ESLint configuration uses, misses,
/// or deprecates
#[derive(Parser)]
#[command(name = "eslint-audit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available rules the configuration does not enable
    Unused {
        #[command(flatten)]
        finder: FinderArgs,

        /// Exit non-zero when unused rules exist (for CI gates)
        #[arg(long)]
        fail_on_unused: bool,
    },

    /// List rules the configuration enables
    Current {
        #[command(flatten)]
        finder: FinderArgs,

        /// Include each rule's severity and options
        #[arg(long)]
        detailed: bool,
    },

    /// List plugin-supplied rules
    Plugins {
        #[command(flatten)]
        finder: FinderArgs,
    },

    /// List deprecated rules in the catalog
    Deprecated {
        #[command(flatten)]
        finder: FinderArgs,
    },

    /// List every rule available to the configuration
    All {
        #[command(flatten)]
        finder: FinderArgs,
    },

    /// Report rule drift between two configuration documents
    Diff {
        /// First configuration document
        left: PathBuf,

        /// Second configuration document
        right: PathBuf,

        #[command(flatten)]
        options: ClassifyArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Arguments shared by the listing subcommands.
#[derive(Args, Clone)]
struct FinderArgs {
    /// Configuration document; defaults to the project's package entry
    /// point
    config: Option<PathBuf>,

    #[command(flatten)]
    options: ClassifyArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

/// Classification options mirrored from the engine.
#[derive(Args, Clone)]
struct ClassifyArgs {
    /// Project working directory
    #[arg(long, default_value = ".")]
    cwd: PathBuf,

    /// Leave builtin rules out of the catalog
    #[arg(long)]
    omit_core: bool,

    /// Include deprecated rules in the classification sets
    #[arg(short = 'i', long)]
    include_deprecated: bool,

    /// Extension filter (repeatable; with or without a leading dot)
    #[arg(long)]
    ext: Vec<String>,

    /// Force flat-config resolution
    #[arg(long)]
    flat_config: bool,
}

impl ClassifyArgs {
    fn to_options(&self) -> eslint_audit_core::FinderOptions {
        eslint_audit_core::FinderOptions {
            omit_core: self.omit_core,
            include_deprecated: self.include_deprecated,
            ext: self.ext.clone(),
            use_flat_config: self.flat_config.then_some(true),
        }
    }
}

/// Output format for listings and diffs.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Unused {
            finder,
            fail_on_unused,
        } => commands::rules::run_unused(&finder, fail_on_unused),
        Commands::Current { finder, detailed } => {
            if detailed {
                commands::rules::run_detailed(&finder)
            } else {
                commands::rules::run(commands::rules::Listing::Current, &finder)
            }
        }
        Commands::Plugins { finder } => {
            commands::rules::run(commands::rules::Listing::Plugins, &finder)
        }
        Commands::Deprecated { finder } => {
            commands::rules::run(commands::rules::Listing::Deprecated, &finder)
        }
        Commands::All { finder } => commands::rules::run(commands::rules::Listing::All, &finder),
        Commands::Diff {
            left,
            right,
            options,
            format,
        } => commands::diff::run(&left, &right, &options, format, cli.verbose),
    }
}
