//! Git operations
//!
//! `GitOps` is the seam between the merge workflow and the `git` binary,
//! so the workflow can run against a mock in tests.

mod executor;
mod interactive;

pub use executor::GitExecutor;

use crate::error::Result;
use std::path::PathBuf;

/// Remote used when a branch has no `branch.<name>.remote` setting
pub const DEFAULT_REMOTE: &str = "origin";

/// Git operations needed to check and merge a topic branch
pub trait GitOps {
    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Whether `refs/heads/<branch>` exists
    fn local_branch_exists(&self, branch: &str) -> Result<bool>;

    /// Whether `refs/remotes/<remote>/<branch>` exists
    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool>;

    /// Remote a branch tracks (`branch.<name>.remote`), `origin` if unset
    fn branch_remote(&self, branch: &str) -> Result<String>;

    /// Root of the working tree
    fn toplevel(&self) -> Result<PathBuf>;

    /// `git checkout <branch>`
    fn checkout(&self, branch: &str) -> Result<()>;

    /// `git checkout -b <branch>` from the current HEAD
    fn create_branch(&self, branch: &str) -> Result<()>;

    /// `git checkout -b <branch> <remote>/<branch>`
    fn checkout_from_remote(&self, branch: &str, remote: &str) -> Result<()>;

    /// `git pull --rebase` on the current branch
    fn pull_rebase(&self) -> Result<()>;

    /// `git rebase <onto>` on the current branch
    fn rebase(&self, onto: &str) -> Result<()>;

    /// `git rebase -i HEAD~<count>` with the user's editor
    fn rebase_interactive(&self, count: usize) -> Result<()>;

    /// `git push`, optionally with `--force`
    fn push(&self, force: bool) -> Result<()>;

    /// `git push -u <remote> <branch>`
    fn push_upstream(&self, remote: &str, branch: &str) -> Result<()>;

    /// `git merge --ff-only <branch>`
    fn merge_ff_only(&self, branch: &str) -> Result<()>;

    /// `git push <remote> :<branch>`
    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// `git branch -D <branch>`
    fn delete_local_branch(&self, branch: &str) -> Result<()>;

    /// Default-format `git log <base>..<topic>`
    fn unmerged_log(&self, base: &str, topic: &str) -> Result<String>;

    /// `git rev-list --count <base>..<topic>`
    fn unmerged_count(&self, base: &str, topic: &str) -> Result<usize>;

    /// Existing files touched by unmerged commits, absolute, first-seen order
    fn unmerged_files(&self, base: &str, topic: &str) -> Result<Vec<PathBuf>>;
}
