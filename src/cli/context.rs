//! Shared command context
//!
//! Collects the setup every run needs: configuration and the git repository.

use smush::config::{ConfigOverrides, ResolvedConfig, load_config};
use smush::error::Result;
use smush::git::GitExecutor;
use smush::platform::{PlatformService, create_platform_service};

/// Configuration plus an open repository
///
/// The platform service is created on demand, since the PR check can be
/// skipped or have no repository configured.
pub struct CommandContext {
    /// Resolved configuration
    pub config: ResolvedConfig,
    /// Repository in the current directory
    pub git: GitExecutor,
}

impl CommandContext {
    /// Load configuration and open the repository in the current directory
    pub fn new(overrides: &ConfigOverrides) -> Result<Self> {
        let config = load_config(overrides)?;
        let git = GitExecutor::open_current()?;
        Ok(Self { config, git })
    }

    /// Base branch from configuration
    pub fn base_branch(&self) -> &str {
        &self.config.base_branch
    }

    /// Platform service, if owner and repo are configured
    pub fn platform(&self) -> Result<Option<Box<dyn PlatformService>>> {
        self.config
            .platform
            .as_ref()
            .map(create_platform_service)
            .transpose()
    }
}
