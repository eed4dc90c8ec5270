//! Core types for smush

use serde::{Deserialize, Serialize};

/// A pull request / merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR/MR number
    pub number: u64,
    /// Web URL for the PR/MR
    pub html_url: String,
    /// Base (target) branch name
    pub base_ref: String,
    /// Head (source) branch name
    pub head_ref: String,
    /// PR/MR title
    pub title: String,
}

/// Hosting platform type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GitHub => write!(f, "GitHub"),
            Self::GitLab => write!(f, "GitLab"),
        }
    }
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Platform type
    pub platform: Platform,
    /// Repository owner (user, organization or GitLab group path)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com/gitlab.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// `owner/repo` as shown to users
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// The two branches a merge is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPair {
    /// Branch being merged into
    pub base: String,
    /// Branch being merged
    pub topic: String,
    /// Remote both branches are pushed to
    pub remote: String,
}

impl BranchPair {
    /// `base..topic`, the revision range of unmerged commits
    pub fn unmerged_range(&self) -> String {
        format!("{}..{}", self.base, self.topic)
    }
}
