//! Step descriptors
//!
//! A step is one external command: program, arguments and the directory it
//! runs in.

use std::fmt;
use std::path::{Path, PathBuf};

/// A single external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Short label used in logs ("lint", "unit")
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Step {
    pub fn new(name: impl Into<String>, program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: vec![],
            cwd: cwd.to_path_buf(),
        }
    }

    /// Append arguments to the step
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The command line without the working directory.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cd {} && {}", self.cwd.display(), self.command_line())
    }
}
