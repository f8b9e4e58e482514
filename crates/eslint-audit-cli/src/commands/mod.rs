//! Subcommand implementations.

pub mod diff;
pub mod output;
pub mod rules;
