//! Platform service construction

use super::{GitHubService, GitLabService, PlatformService};
use crate::auth::{get_github_auth, get_gitlab_auth};
use crate::error::Result;
use crate::types::{Platform, PlatformConfig};
use tracing::debug;

/// Create the service for `config`, authenticating when a token is available.
///
/// Must be called from within the tokio runtime.
pub fn create_platform_service(config: &PlatformConfig) -> Result<Box<dyn PlatformService>> {
    let host = config.host.as_deref();

    match config.platform {
        Platform::GitHub => {
            let auth = get_github_auth(host);
            debug!(source = ?auth.as_ref().map(|a| a.source), "creating GitHub service");
            Ok(Box::new(GitHubService::new(
                auth.as_ref().map(|a| a.token.as_str()),
                config.owner.clone(),
                config.repo.clone(),
                config.host.clone(),
            )?))
        }
        Platform::GitLab => {
            let auth = get_gitlab_auth(host);
            debug!(source = ?auth.as_ref().map(|a| a.source), "creating GitLab service");
            Ok(Box::new(GitLabService::new(
                auth.map(|a| a.token),
                config.owner.clone(),
                config.repo.clone(),
                config.host.clone(),
            )?))
        }
    }
}
