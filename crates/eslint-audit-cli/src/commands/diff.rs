//! Config drift reporting between two configuration documents.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use eslint_audit_core::{array_diff, object_diff, RuleConfig, RuleFinder};

use crate::{ClassifyArgs, OutputFormat};

fn classify(config: &Path, options: &ClassifyArgs) -> Result<RuleFinder> {
    RuleFinder::builder()
        .working_dir(&options.cwd)
        .config_file(config)
        .options(options.to_options())
        .build()
        .with_context(|| format!("failed to resolve {}", config.display()))
}

/// Runs the diff subcommand over two configuration documents.
pub fn run(
    left: &Path,
    right: &Path,
    options: &ClassifyArgs,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let left_finder = classify(left, options)?;
    let right_finder = classify(right, options)?;

    let (only_left, only_right) =
        array_diff(&left_finder.current_rules(), &right_finder.current_rules());

    let changed = if verbose {
        object_diff(
            &left_finder.current_rules_detailed(),
            &right_finder.current_rules_detailed(),
        )
    } else {
        BTreeMap::new()
    };

    match format {
        OutputFormat::Text => {
            print_text(left, right, &only_left, &only_right, &changed)?;
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "onlyInLeft": only_left,
                "onlyInRight": only_right,
                "changed": changed
                    .iter()
                    .map(|(rule, (a, b))| {
                        (rule.clone(), serde_json::json!({"left": a, "right": b}))
                    })
                    .collect::<BTreeMap<String, serde_json::Value>>(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_text(
    left: &Path,
    right: &Path,
    only_left: &[String],
    only_right: &[String],
    changed: &BTreeMap<String, (RuleConfig, RuleConfig)>,
) -> Result<()> {
    let left_name = left.display();
    let right_name = right.display();

    println!("diff rules");

    println!("\nin {left_name} but not in {right_name}:");
    for rule in only_left {
        println!("  {rule}");
    }

    println!("\nin {right_name} but not in {left_name}:");
    for rule in only_right {
        println!("  {rule}");
    }

    if !changed.is_empty() {
        println!("\nrules configured differently:");
        for (rule, (a, b)) in changed {
            println!("  {rule}:");
            println!("    {left_name}: {}", serde_json::to_string(a)?);
            println!("    {right_name}: {}", serde_json::to_string(b)?);
        }
    }

    Ok(())
}
