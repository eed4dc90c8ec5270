//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Platform, PlatformConfig, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// Page size for listing pull requests (GitHub maximum)
const PER_PAGE: u8 = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// Without a token, requests are anonymous and subject to GitHub's
    /// unauthenticated rate limit.
    pub fn new(
        token: Option<&str>,
        owner: String,
        repo: String,
        host: Option<String>,
    ) -> Result<Self> {
        let mut builder = Octocrab::builder();

        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }

        if let Some(ref h) = host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                platform: Platform::GitHub,
                owner,
                repo,
                host,
            },
        })
    }

    /// A 404 while listing means the repository is missing or private
    fn map_list_error(&self, err: octocrab::Error) -> Error {
        match &err {
            octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
                Error::RepositoryNotFound(self.config.slug())
            }
            _ => err.into(),
        }
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
    }
}

/// The last listed PR whose head ref is `head_branch`
fn last_for_head(
    prs: impl IntoIterator<Item = PullRequest>,
    head_branch: &str,
) -> Option<PullRequest> {
    prs.into_iter().filter(|pr| pr.head_ref == head_branch).last()
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn find_open_pr(&self, head_branch: &str) -> Result<Option<PullRequest>> {
        debug!(head_branch, "finding open PR");

        // Match on head ref across all open PRs so forks are found too
        let first_page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(PER_PAGE)
            .send()
            .await
            .map_err(|e| self.map_list_error(e))?;

        let prs = self.client.all_pages(first_page).await?;
        debug!(count = prs.len(), "listed open PRs");

        let result = last_for_head(prs.iter().map(pr_from_octocrab), head_branch);

        if let Some(ref pr) = result {
            debug!(pr_number = pr.number, base = %pr.base_ref, "found open PR");
        } else {
            debug!("no open PR found");
        }
        Ok(result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
