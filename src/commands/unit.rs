//! Unit command implementation
//!
//! Lints the prepared driver checkout, then runs its unit tests with the
//! package that does not belong to the build variant skipped.

use tracing::info;

use crate::config::TestkitConfig;
use crate::error::Result;
use crate::runner::{run_steps, CommandExecutor, RunOutcome};
use crate::step::Step;

/// Build the ordered lint and unit-test steps for a configuration.
pub fn plan(config: &TestkitConfig) -> Vec<Step> {
    let exclusion = config.variant.exclusion();
    let cwd = config.driver_repo.as_path();

    vec![
        Step::new("lint", &config.npm, cwd).args(["run", "lint"]),
        Step::new("unit", &config.npm, cwd).args([
            "run".to_string(),
            "test::unit".to_string(),
            "--".to_string(),
            exclusion.filter_arg(),
        ]),
    ]
}

/// Run lint then unit tests, stopping at the first failure.
pub fn run<E: CommandExecutor>(config: &TestkitConfig, executor: &mut E) -> Result<RunOutcome> {
    let exclusion = config.variant.exclusion();
    info!(
        lite = config.variant.lite,
        deno = config.variant.deno,
        variant = %exclusion,
        ignored = exclusion.ignored_package(),
        "selected build variant"
    );

    run_steps(&plan(config), executor)
}
