//! Subcommand implementations

pub mod plan;
pub mod unit;
