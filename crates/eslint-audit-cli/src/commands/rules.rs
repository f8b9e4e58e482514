//! Rule listing subcommands.

use anyhow::{Context, Result};
use eslint_audit_core::{RuleFinder, RuleFinderBuilder};

use crate::FinderArgs;

/// Which classification set a subcommand lists.
#[derive(Clone, Copy, Debug)]
pub enum Listing {
    /// Every available rule.
    All,
    /// Enabled rules.
    Current,
    /// Plugin-supplied rules.
    Plugins,
    /// Deprecated rules.
    Deprecated,
    /// Available-but-unused rules.
    Unused,
}

impl Listing {
    fn title(self) -> &'static str {
        match self {
            Self::All => "available rules",
            Self::Current => "current rules",
            Self::Plugins => "plugin rules",
            Self::Deprecated => "deprecated rules",
            Self::Unused => "unused rules",
        }
    }

    fn select(self, finder: &RuleFinder) -> Vec<String> {
        match self {
            Self::All => finder.all_available_rules(),
            Self::Current => finder.current_rules(),
            Self::Plugins => finder.plugin_rules(),
            Self::Deprecated => finder.deprecated_rules(),
            Self::Unused => finder.unused_rules(),
        }
    }
}

fn build_finder(args: &FinderArgs) -> Result<RuleFinder> {
    let mut builder: RuleFinderBuilder = RuleFinder::builder()
        .working_dir(&args.options.cwd)
        .options(args.options.to_options());
    if let Some(config) = &args.config {
        builder = builder.config_file(config);
    }
    builder
        .build()
        .context("failed to resolve the lint configuration")
}

/// Runs a listing subcommand.
pub fn run(listing: Listing, args: &FinderArgs) -> Result<()> {
    let finder = build_finder(args)?;
    let rules = listing.select(&finder);
    super::output::print_list(listing.title(), &rules, args.format)
}

/// Runs `unused`, optionally failing the process for CI gates.
pub fn run_unused(args: &FinderArgs, fail_on_unused: bool) -> Result<()> {
    let finder = build_finder(args)?;
    let rules = finder.unused_rules();
    super::output::print_list(Listing::Unused.title(), &rules, args.format)?;

    if fail_on_unused && !rules.is_empty() {
        tracing::info!("{} unused rules", rules.len());
        std::process::exit(1);
    }
    Ok(())
}

/// Runs `current --detailed`: each rule with its severity + options.
pub fn run_detailed(args: &FinderArgs) -> Result<()> {
    let finder = build_finder(args)?;
    let detailed = finder.current_rules_detailed();

    match args.format {
        crate::OutputFormat::Text => {
            println!("current rules ({})", detailed.len());
            for (rule, config) in &detailed {
                println!("  {rule}: {}", serde_json::to_string(config)?);
            }
        }
        crate::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&detailed)?);
        }
    }
    Ok(())
}
