//! Error types for smush

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by smush
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file is missing
    #[error("Unable to open ~/{0}: does it exist?")]
    ConfigNotFound(String),

    /// Configuration file exists but could not be read or parsed
    #[error("failed to load {}: {message}", path.display())]
    ConfigInvalid {
        /// Path of the offending file
        path: PathBuf,
        /// Parser or I/O message
        message: String,
    },

    /// No base branch in config or on the command line
    #[error("Please set \"base branch\" in {0} or specify via --base-branch.")]
    MissingBaseBranch(String),

    /// Home directory could not be determined
    #[error("could not determine home directory")]
    NoHomeDir,

    /// `git` executable is not on PATH
    #[error("git not found; is it installed and on PATH?")]
    GitNotFound,

    /// Working directory is not inside a git repository
    #[error("Not a valid git repository.")]
    NotARepository,

    /// A git command exited non-zero
    #[error("git {command} failed (exit code {exit_code}): {stderr}")]
    GitCommand {
        /// Subcommand and arguments that were run
        command: String,
        /// Captured standard error
        stderr: String,
        /// Process exit code (-1 when killed by a signal)
        exit_code: i32,
    },

    /// Base branch has no local checkout
    #[error("Base branch '{0}' not checked out locally.")]
    BaseBranchNotFound(String),

    /// Topic branch exists neither locally nor on the remote
    #[error("Topic branch '{0}' not found locally or on the remote.")]
    TopicBranchNotFound(String),

    /// Branch to create already exists
    #[error("Branch '{0}' already exists.")]
    BranchExists(String),

    /// Topic and base branch are identical
    #[error("Topic branch and base branch shouldn't be the same.")]
    SameBranch,

    /// Topic branch has nothing to merge
    #[error("No unmerged commits found.")]
    NoUnmergedCommits,

    /// Remote repository does not exist or is not visible
    #[error("Repository {0} not found.")]
    RepositoryNotFound(String),

    /// No open PR/MR for the topic branch
    #[error("Could not find pull request for this topic branch. Use --skip-pr-check option to skip.")]
    PullRequestNotFound(String),

    /// The open PR/MR targets a different branch
    #[error("The pull request's base is {actual}, not {expected}.")]
    PullRequestBaseMismatch {
        /// Base branch declared by the PR/MR
        actual: String,
        /// Base branch from configuration
        expected: String,
    },

    /// A planned git step failed
    #[error("Failed to {step}: {message}")]
    StepFailed {
        /// Step description
        step: String,
        /// Underlying error message
        message: String,
    },

    /// User declined a confirmation prompt
    #[error("Aborted.")]
    Aborted,

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitLab API error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything that should not happen in normal operation
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}
