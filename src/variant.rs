//! Build variant selection
//!
//! Maps the lite and Deno build predicates onto the package the unit-test
//! runner should skip.

use std::fmt;

/// Package name of the full driver distribution.
pub const FULL_PACKAGE: &str = "neo4j-driver";
/// Package name of the reduced (lite) driver distribution.
pub const LITE_PACKAGE: &str = "neo4j-driver-lite";

/// The two predicates describing the build under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildVariant {
    /// Reduced/lite distribution build
    pub lite: bool,
    /// Alternate runtime (Deno) build
    pub deno: bool,
}

impl BuildVariant {
    pub fn new(lite: bool, deno: bool) -> Self {
        Self { lite, deno }
    }

    /// Decide which package suite is skipped for this variant.
    ///
    /// Lite and Deno builds only ship the lite package, so the full package
    /// is skipped. Everything else skips the lite package.
    pub fn exclusion(&self) -> ExclusionTarget {
        if self.lite || self.deno {
            ExclusionTarget::Lite
        } else {
            ExclusionTarget::Full
        }
    }
}

/// Which distribution is under test, and therefore what gets skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionTarget {
    /// Lite distribution under test: the full package is ignored
    Lite,
    /// Full distribution under test: the lite package is ignored
    Full,
}

impl ExclusionTarget {
    /// Package the test runner should ignore.
    pub fn ignored_package(&self) -> &'static str {
        match self {
            ExclusionTarget::Lite => FULL_PACKAGE,
            ExclusionTarget::Full => LITE_PACKAGE,
        }
    }

    /// Filter argument handed to the unit-test runner.
    pub fn filter_arg(&self) -> String {
        format!("--ignore={}", self.ignored_package())
    }
}

impl fmt::Display for ExclusionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionTarget::Lite => write!(f, "lite"),
            ExclusionTarget::Full => write!(f, "full"),
        }
    }
}
