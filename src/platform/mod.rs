//! Platform services for GitHub and GitLab
//!
//! Provides a unified interface for finding the open PR/MR of a topic branch.

mod factory;
mod github;
mod gitlab;

pub use factory::create_platform_service;
pub use github::GitHubService;
pub use gitlab::GitLabService;

use crate::error::{Error, Result};
use crate::types::{PlatformConfig, PullRequest};
use async_trait::async_trait;
use tracing::debug;

/// Platform service trait for PR/MR lookups
///
/// This trait abstracts GitHub and GitLab, so the merge check works the same
/// against either platform (or a mock in tests).
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Find the open PR/MR whose head (source) branch is `head_branch`
    async fn find_open_pr(&self, head_branch: &str) -> Result<Option<PullRequest>>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}

/// Make sure an open PR/MR exists for `topic` and that it targets `base`.
pub async fn verify_pull_request(
    platform: &dyn PlatformService,
    topic: &str,
    base: &str,
) -> Result<PullRequest> {
    let pr = platform
        .find_open_pr(topic)
        .await?
        .ok_or_else(|| Error::PullRequestNotFound(topic.to_string()))?;

    if pr.base_ref != base {
        debug!(pr_number = pr.number, base = %pr.base_ref, expected = base, "PR base mismatch");
        return Err(Error::PullRequestBaseMismatch {
            actual: pr.base_ref,
            expected: base.to_string(),
        });
    }

    debug!(pr_number = pr.number, "PR verified");
    Ok(pr)
}
