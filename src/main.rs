//! driver-testkit CLI
//!
//! Runs the driver's lint and unit-test scripts inside the prepared checkout.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};

use driver_testkit::commands;
use driver_testkit::{ConfigOverrides, SystemExecutor, TestkitConfig, TestkitError};

#[derive(Parser)]
#[command(name = "driver-testkit")]
#[command(about = "Lint and unit-test the prepared driver checkout")]
struct Cli {
    /// Path to config file (default: <config dir>/driver-testkit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Driver checkout to run in (overrides DRIVER_REPO)
    #[arg(long, global = true)]
    driver_repo: Option<PathBuf>,

    /// Treat the build as the lite distribution
    #[arg(long, global = true)]
    lite: bool,

    /// Treat the build as the Deno runtime variant
    #[arg(long, global = true)]
    deno: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint, then run unit tests (default)
    Unit,
    /// Print the steps `unit` would run without running them
    Plan,
}

fn main() -> ExitCode {
    // Logs go to stderr so child output on stdout stays untouched
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => exit_code(code),
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<TestkitError>()
                .map_or(1, TestkitError::exit_code);
            exit_code(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let overrides = ConfigOverrides {
        driver_repo: cli.driver_repo,
        lite: cli.lite,
        deno: cli.deno,
    };
    let config = TestkitConfig::load(cli.config.as_deref(), &overrides)?;
    debug!(?config, "loaded config");

    match cli.command.unwrap_or(Commands::Unit) {
        Commands::Unit => {
            let outcome = commands::unit::run(&config, &mut SystemExecutor)?;
            Ok(outcome.exit_code())
        }
        Commands::Plan => {
            commands::plan::write_plan(&config, &mut std::io::stdout().lock())?;
            Ok(0)
        }
    }
}

/// Exit codes outside 0..=255 are truncated, but a failure never becomes 0.
fn exit_code(code: i32) -> ExitCode {
    match (code & 0xff) as u8 {
        0 if code != 0 => ExitCode::FAILURE,
        truncated => ExitCode::from(truncated),
    }
}
