//! Sequential step execution
//!
//! Steps run one after another in a shared working directory. The first
//! non-zero exit stops the run and becomes the run's own status.

use std::process::{Command, ExitStatus};

use tracing::{error, info};

use crate::error::{Result, TestkitError};
use crate::step::Step;

/// Result of running an ordered list of steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every step exited zero
    Success,
    /// A step exited non-zero; later steps were not run
    Failed { step: String, code: i32 },
}

impl RunOutcome {
    /// Exit code the whole invocation should report.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::Failed { code, .. } => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }
}

/// Seam between the runner and process spawning.
pub trait CommandExecutor {
    /// Run the step to completion and return its exit code.
    fn execute(&mut self, step: &Step) -> Result<i32>;
}

/// Spawns real child processes with inherited stdio.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&mut self, step: &Step) -> Result<i32> {
        let status = Command::new(&step.program)
            .args(&step.args)
            .current_dir(&step.cwd)
            .status()
            .map_err(|source| TestkitError::Spawn {
                program: step.program.clone(),
                source,
            })?;

        exit_code(&step.program, status)
    }
}

/// Translate an exit status into a code, treating signal deaths as errors.
fn exit_code(program: &str, status: ExitStatus) -> Result<i32> {
    if let Some(code) = status.code() {
        return Ok(code);
    }

    Err(TestkitError::Signaled {
        program: program.to_string(),
        code: signal_code(status),
    })
}

#[cfg(unix)]
fn signal_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map_or(1, |signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_code(_status: ExitStatus) -> i32 {
    1
}

/// Run steps in order, stopping at the first non-zero exit.
pub fn run_steps<E: CommandExecutor>(steps: &[Step], executor: &mut E) -> Result<RunOutcome> {
    for step in steps {
        info!(step = %step.name, command = %step.command_line(), cwd = %step.cwd.display(), "running step");

        let code = executor.execute(step)?;
        if code != 0 {
            error!(step = %step.name, code, "step failed");
            return Ok(RunOutcome::Failed {
                step: step.name.clone(),
                code,
            });
        }
    }

    Ok(RunOutcome::Success)
}


#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::testing::RecordingExecutor;
    use super::*;

    fn steps() -> Vec<Step> {
        let cwd = Path::new("/tmp");
        vec![
            Step::new("lint", "npm", cwd).args(["run", "lint"]),
            Step::new("unit", "npm", cwd).args(["run", "test::unit"]),
        ]
    }

    #[test]
    fn test_all_steps_succeed() {
        let mut executor = RecordingExecutor::default();
        let outcome = run_steps(&steps(), &mut executor).unwrap();

        assert_eq!(outcome, RunOutcome::Success);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(executor.names(), vec!["lint", "unit"]);
    }

    #[test]
    fn test_first_failure_short_circuits() {
        let mut executor = RecordingExecutor::default().with_code("lint", 3);
        let outcome = run_steps(&steps(), &mut executor).unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Failed {
                step: "lint".to_string(),
                code: 3
            }
        );
        assert_eq!(executor.names(), vec!["lint"]);
    }

    #[test]
    fn test_second_failure_reports_its_code() {
        let mut executor = RecordingExecutor::default().with_code("unit", 7);
        let outcome = run_steps(&steps(), &mut executor).unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome.exit_code(), 7);
        assert_eq!(executor.names(), vec!["lint", "unit"]);
    }

    #[test]
    fn test_empty_plan_succeeds() {
        let mut executor = RecordingExecutor::default();
        let outcome = run_steps(&[], &mut executor).unwrap();
        assert!(outcome.is_success());
        assert!(executor.executed.is_empty());
    }

    #[test]
    fn test_system_executor_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let step = Step::new("lint", "driver-testkit-no-such-program", dir.path());

        let err = SystemExecutor.execute(&step).unwrap_err();
        assert!(matches!(err, TestkitError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_executor_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let step = Step::new("unit", "sh", dir.path()).args(["-c", "exit 5"]);

        assert_eq!(SystemExecutor.execute(&step).unwrap(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_executor_runs_in_step_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let step = Step::new("unit", "sh", dir.path()).args(["-c", "touch ran-here"]);

        assert_eq!(SystemExecutor.execute(&step).unwrap(), 0);
        assert!(dir.path().join("ran-here").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_executor_maps_signal_death() {
        let dir = tempfile::tempdir().unwrap();
        let step = Step::new("unit", "sh", dir.path()).args(["-c", "kill -9 $$"]);

        let err = SystemExecutor.execute(&step).unwrap_err();
        assert_eq!(err.exit_code(), 137);
    }
}
