//! User configuration in `~/.smush.yml` (or `~/.smush-<profile>.yml`).
//!
//! Keys keep the spelling users already have in their files:
//!
//! ```yaml
//! base branch: main
//! github owner: artefactual
//! github repo: smush
//! syntax check scripts:
//!   py: python -m py_compile {}
//! ```

use crate::error::{Error, Result};
use crate::types::{Platform, PlatformConfig};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Values from the configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Branch topic branches get merged into
    #[serde(rename = "base branch")]
    pub base_branch: Option<String>,
    /// Repository owner on the hosting platform
    #[serde(rename = "github owner", alias = "owner")]
    pub owner: Option<String>,
    /// Repository name on the hosting platform
    #[serde(rename = "github repo", alias = "repo")]
    pub repo: Option<String>,
    /// Hosting platform (defaults to GitHub)
    pub platform: Option<Platform>,
    /// Self-hosted API host, e.g. `gitlab.example.com`
    pub host: Option<String>,
    /// File extension to shell command; `{}` is replaced by the file path
    #[serde(rename = "syntax check scripts", default)]
    pub syntax_check_scripts: BTreeMap<String, String>,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--profile`
    pub profile: Option<String>,
    /// `--base-branch`
    pub base_branch: Option<String>,
    /// `--github-owner`
    pub owner: Option<String>,
    /// `--github-repo`
    pub repo: Option<String>,
}

/// Configuration after overrides, with a guaranteed base branch
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Branch topic branches get merged into
    pub base_branch: String,
    /// Platform settings, present when owner and repo are both known
    pub platform: Option<PlatformConfig>,
    /// Per-extension syntax check commands
    pub syntax_check_scripts: BTreeMap<String, String>,
}

/// Name of the config file for a profile, relative to the home directory.
pub fn config_filename(profile: Option<&str>) -> String {
    profile.map_or_else(|| ".smush.yml".to_string(), |p| format!(".smush-{p}.yml"))
}

/// Parse configuration from YAML text.
///
/// An empty document is an empty configuration.
pub fn parse_config(content: &str, path: &Path) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(content).map_err(|e| Error::ConfigInvalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and resolve configuration from `home`.
///
/// A missing file is only tolerated when `--base-branch` was given.
pub fn load_config_from(home: &Path, overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let filename = config_filename(overrides.profile.as_deref());
    let path: PathBuf = home.join(&filename);

    let file_config = if path.is_file() {
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(&path).map_err(|e| Error::ConfigInvalid {
            path: path.clone(),
            message: e.to_string(),
        })?;
        parse_config(&content, &path)?
    } else if overrides.base_branch.is_some() {
        debug!(path = %path.display(), "no config file, using command-line values");
        Config::default()
    } else {
        return Err(Error::ConfigNotFound(filename));
    };

    resolve(file_config, overrides, &filename)
}

/// Load configuration from the user's home directory.
pub fn load_config(overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
    load_config_from(&home, overrides)
}

fn resolve(config: Config, overrides: &ConfigOverrides, filename: &str) -> Result<ResolvedConfig> {
    let base_branch = overrides
        .base_branch
        .clone()
        .or(config.base_branch)
        .ok_or_else(|| Error::MissingBaseBranch(filename.to_string()))?;

    let owner = overrides.owner.clone().or(config.owner);
    let repo = overrides.repo.clone().or(config.repo);

    let platform = match (owner, repo) {
        (Some(owner), Some(repo)) => Some(PlatformConfig {
            platform: config.platform.unwrap_or(Platform::GitHub),
            owner,
            repo,
            host: config.host,
        }),
        _ => None,
    };

    Ok(ResolvedConfig {
        base_branch,
        platform,
        syntax_check_scripts: config.syntax_check_scripts,
    })
}
