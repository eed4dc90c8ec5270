//! Mock platform service for testing

use async_trait::async_trait;
use smush::error::{Error, Result};
use smush::platform::PlatformService;
use smush::types::{Platform, PlatformConfig, PullRequest};
use std::collections::HashMap;
use std::sync::Mutex;

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable responses per branch
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    find_pr_responses: Mutex<HashMap<String, Option<PullRequest>>>,
    find_pr_calls: Mutex<Vec<String>>,
    error_on_find_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            find_pr_responses: Mutex::new(HashMap::new()),
            find_pr_calls: Mutex::new(Vec::new()),
            error_on_find_pr: Mutex::new(None),
        }
    }

    /// Make `find_open_pr` return an error
    pub fn fail_find_pr(&self, msg: &str) {
        *self.error_on_find_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Set the response for `find_open_pr` for a specific branch
    pub fn set_find_pr_response(&self, branch: &str, pr: Option<PullRequest>) {
        self.find_pr_responses
            .lock()
            .unwrap()
            .insert(branch.to_string(), pr);
    }

    /// Get all branches that `find_open_pr` was called with
    pub fn get_find_pr_calls(&self) -> Vec<String> {
        self.find_pr_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn find_open_pr(&self, head_branch: &str) -> Result<Option<PullRequest>> {
        self.find_pr_calls
            .lock()
            .unwrap()
            .push(head_branch.to_string());

        if let Some(msg) = self.error_on_find_pr.lock().unwrap().clone() {
            return Err(Error::GitHubApi(msg));
        }

        Ok(self
            .find_pr_responses
            .lock()
            .unwrap()
            .get(head_branch)
            .cloned()
            .flatten())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

/// GitHub config for `test/repo`
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::GitHub,
        owner: "test".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

/// Open PR from `head` into `base`
pub fn make_pr(number: u64, head: &str, base: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        base_ref: base.to_string(),
        head_ref: head.to_string(),
        title: format!("Merge {head}"),
    }
}
