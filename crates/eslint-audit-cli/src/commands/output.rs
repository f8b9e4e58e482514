//! Shared output rendering for rule listings.

use anyhow::Result;

use crate::OutputFormat;

/// Prints a rule listing in the selected format.
pub fn print_list(title: &str, rules: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{title} ({})", rules.len());
            for rule in rules {
                println!("  {rule}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rules)?);
        }
    }
    Ok(())
}
