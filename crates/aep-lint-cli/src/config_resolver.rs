//! Configuration file resolution with global fallback.
//!
//! Priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/aep-lint.toml` or `.aep-lint.toml`
//! 3. `{global}/config.toml`, where `{global}` is `$AEP_LINT_CONFIG_DIR`
//!    or `~/.aep-lint/`
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use aep_lint_core::Config;

/// Environment variable overriding the global config directory.
pub const CONFIG_DIR_ENV: &str = "AEP_LINT_CONFIG_DIR";

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["aep-lint.toml", ".aep-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// An explicit path is taken even if missing, so the error names it.
    fn is_available(&self) -> bool {
        match self {
            Self::Explicit(_) | Self::Default => true,
            Self::Project(p) | Self::Global(p) => p.is_file(),
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };
        match self {
            Self::Global(_) => tracing::info!("Using global config: {}", path.display()),
            _ => tracing::debug!("Using config: {}", path.display()),
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Every place a config may live, highest priority first.
fn candidates<'a>(
    project_dir: &'a Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> impl Iterator<Item = ConfigSource> + 'a {
    let explicit = explicit.map(|p| ConfigSource::Explicit(p.to_path_buf()));
    let project = PROJECT_CONFIG_NAMES
        .iter()
        .map(move |name| ConfigSource::Project(project_dir.join(name)));
    let global = global_dir.map(|dir| ConfigSource::Global(dir.join(GLOBAL_CONFIG_NAME)));

    explicit
        .into_iter()
        .chain(project)
        .chain(global)
        .chain(std::iter::once(ConfigSource::Default))
}

fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    candidates(project_dir, explicit, global_dir)
        .find(ConfigSource::is_available)
        .unwrap_or(ConfigSource::Default)
}

/// Resolves the configuration source for a project.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir().as_deref())
}

/// Resolves and loads the configuration for a project.
///
/// # Errors
///
/// Returns an error if the resolved file cannot be read or parsed.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    resolve(project_dir, explicit).load()
}

/// Returns the global config directory: `$AEP_LINT_CONFIG_DIR` > `~/.aep-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".aep-lint"))
}
