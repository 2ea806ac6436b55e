//! Plan command implementation
//!
//! Shows what `unit` would run for the resolved configuration.

use std::io::Write;

use anyhow::Result;

use crate::commands::unit;
use crate::config::TestkitConfig;

/// Write one line per planned step.
pub fn write_plan<W: Write>(config: &TestkitConfig, out: &mut W) -> Result<()> {
    let exclusion = config.variant.exclusion();
    writeln!(
        out,
        "# variant: {} (ignoring {})",
        exclusion,
        exclusion.ignored_package()
    )?;
    for step in unit::plan(config) {
        writeln!(out, "{}", step)?;
    }
    Ok(())
}
