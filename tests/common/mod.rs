use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Fake `npm` that appends its arguments and cwd to `calls.log` next to
/// itself, then exits with `FAKE_LINT_EXIT` or `FAKE_UNIT_EXIT`.
const FAKE_NPM: &str = r#"#!/bin/sh
log="$(dirname "$0")/calls.log"
echo "$(pwd)|$*" >> "$log"
case "$2" in
  lint) exit "${FAKE_LINT_EXIT:-0}" ;;
  test::unit) exit "${FAKE_UNIT_EXIT:-0}" ;;
esac
exit 0
"#;

pub struct Sandbox {
    pub root: TempDir,
    pub driver_repo: PathBuf,
    pub npm: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let driver_repo = root.path().join("driver");
        fs::create_dir_all(&driver_repo).unwrap();

        let tools = root.path().join("tools");
        fs::create_dir_all(&tools).unwrap();
        let npm = tools.join("npm");
        fs::write(&npm, FAKE_NPM).unwrap();
        make_executable(&npm);

        Self {
            root,
            driver_repo,
            npm,
        }
    }

    /// The binary, isolated from the caller's environment and config file.
    pub fn command(&self) -> Command {
        let home = self.root.path().join("home");
        let mut cmd =
            Command::cargo_bin("driver-testkit").expect("Failed to find driver-testkit binary");
        cmd.env_remove("TEST_DRIVER_LITE")
            .env_remove("TEST_DRIVER_DENO")
            .env_remove("RUST_LOG")
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("DRIVER_REPO", &self.driver_repo)
            .env("TESTKIT_NPM", &self.npm);
        cmd
    }

    /// Recorded `(cwd, args)` pairs, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        let log = self.npm.with_file_name("calls.log");
        fs::read_to_string(log)
            .unwrap_or_default()
            .lines()
            .map(|line| {
                let (cwd, args) = line.split_once('|').unwrap();
                (cwd.to_string(), args.to_string())
            })
            .collect()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}
