use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::TestkitError;
use crate::variant::BuildVariant;

/// Where the build script leaves the prepared driver checkout.
pub const DEFAULT_DRIVER_REPO: &str = "/home/build/";
pub const DEFAULT_NPM: &str = "npm";

pub const ENV_DRIVER_REPO: &str = "DRIVER_REPO";
pub const ENV_NPM: &str = "TESTKIT_NPM";
pub const ENV_LITE: &str = "TEST_DRIVER_LITE";
pub const ENV_DENO: &str = "TEST_DRIVER_DENO";

/// Resolved testkit configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestkitConfig {
    /// Driver checkout every step runs in
    pub driver_repo: PathBuf,
    /// Program used for the lint and unit-test scripts
    pub npm: String,
    pub variant: BuildVariant,
}

/// Raw TOML file structure for `config.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    driver_repo: Option<PathBuf>,
    npm: Option<String>,
    lite: Option<bool>,
    deno: Option<bool>,
}

/// Values given on the command line. They win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub driver_repo: Option<PathBuf>,
    /// Force the lite predicate on
    pub lite: bool,
    /// Force the Deno predicate on
    pub deno: bool,
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("driver-testkit").join("config.toml"))
}

/// Whether an environment flag value counts as switched on.
pub fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "y" | "yes" | "on"
    )
}

impl TestkitConfig {
    /// Load configuration from file, environment variables and overrides.
    ///
    /// Priority: overrides, then environment variables, then the file, then
    /// built-in defaults. A missing file is fine; an unreadable or malformed
    /// one is an error.
    pub fn load(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let path = config_path.map(Path::to_path_buf).or_else(default_config_path);

        let file_config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?;
                toml::from_str::<ConfigFile>(&content)
                    .with_context(|| format!("failed to parse config: {}", path.display()))?
            }
            _ => ConfigFile::default(),
        };

        let config = Self::resolve(file_config, |key| std::env::var(key).ok(), overrides)?;
        Ok(config)
    }

    /// Merge file values with an environment lookup and overrides.
    fn resolve<F>(
        file_config: ConfigFile,
        env: F,
        overrides: &ConfigOverrides,
    ) -> std::result::Result<Self, TestkitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ConfigFile {
            driver_repo,
            npm,
            lite,
            deno,
        } = file_config;

        let driver_repo = overrides
            .driver_repo
            .clone()
            .or_else(|| env(ENV_DRIVER_REPO).map(PathBuf::from))
            .or(driver_repo)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DRIVER_REPO));
        let npm = env(ENV_NPM)
            .or(npm)
            .unwrap_or_else(|| DEFAULT_NPM.to_string());
        let lite = overrides.lite || flag(&env, ENV_LITE, lite);
        let deno = overrides.deno || flag(&env, ENV_DENO, deno);

        Self::build(driver_repo, npm, BuildVariant::new(lite, deno))
    }

    fn build(
        driver_repo: PathBuf,
        npm: String,
        variant: BuildVariant,
    ) -> std::result::Result<Self, TestkitError> {
        if driver_repo.as_os_str().is_empty() {
            return Err(TestkitError::InvalidConfig(format!(
                "driver_repo must not be empty (set in config file or {} env var)",
                ENV_DRIVER_REPO
            )));
        }
        if npm.trim().is_empty() {
            return Err(TestkitError::InvalidConfig(format!(
                "npm must not be empty (set in config file or {} env var)",
                ENV_NPM
            )));
        }

        Ok(Self {
            driver_repo,
            npm,
            variant,
        })
    }
}

/// An env var, when set, replaces the file value entirely.
fn flag<F>(env: &F, key: &str, file_value: Option<bool>) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    env(key)
        .map(|value| is_enabled(&value))
        .or(file_value)
        .unwrap_or(false)
}
