//! driver-testkit library
//!
//! Lint and unit-test entry point for the JavaScript driver test container.

pub mod commands;
pub mod config;
pub mod error;
pub mod runner;
pub mod step;
pub mod variant;

pub use config::{ConfigOverrides, TestkitConfig};
pub use error::TestkitError;
pub use runner::{CommandExecutor, RunOutcome, SystemExecutor};
pub use variant::{BuildVariant, ExclusionTarget};
