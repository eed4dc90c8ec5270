//! In-memory `GitOps` for testing branch selection and plan execution

use smush::error::{Error, Result};
use smush::git::GitOps;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

/// Mock repository state
///
/// Every mutating call is recorded as a git-like command line so tests can
/// assert on the exact sequence. Failures are injected per command prefix.
#[derive(Default)]
pub struct MockGit {
    current: Mutex<String>,
    local_branches: Mutex<HashSet<String>>,
    remote_branches: HashSet<(String, String)>,
    remotes: HashMap<String, String>,
    unmerged_count: usize,
    unmerged_log: String,
    calls: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl MockGit {
    /// Repository with `branches` checked out locally, on `current`
    pub fn new(current: &str, branches: &[&str]) -> Self {
        Self {
            current: Mutex::new(current.to_string()),
            local_branches: Mutex::new(branches.iter().map(ToString::to_string).collect()),
            ..Self::default()
        }
    }

    /// Add a branch that only exists on `remote`
    #[must_use]
    pub fn with_remote_branch(mut self, remote: &str, branch: &str) -> Self {
        self.remote_branches
            .insert((remote.to_string(), branch.to_string()));
        self
    }

    /// Make `branch` track `remote`
    #[must_use]
    pub fn with_tracking(mut self, branch: &str, remote: &str) -> Self {
        self.remotes.insert(branch.to_string(), remote.to_string());
        self
    }

    /// Set what `unmerged_count` / `unmerged_log` report
    #[must_use]
    pub fn with_unmerged(mut self, count: usize, log: &str) -> Self {
        self.unmerged_count = count;
        self.unmerged_log = log.to_string();
        self
    }

    /// Fail any recorded call starting with `prefix`
    #[must_use]
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.fail_on = Some(prefix.to_string());
        self
    }

    /// Recorded mutating calls, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Branch currently checked out
    pub fn current(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        if let Some(ref prefix) = self.fail_on
            && call.starts_with(prefix.as_str())
        {
            return Err(Error::GitCommand {
                command: call,
                stderr: "injected failure".to_string(),
                exit_code: 1,
            });
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl GitOps for MockGit {
    fn current_branch(&self) -> Result<String> {
        Ok(self.current())
    }

    fn local_branch_exists(&self, branch: &str) -> Result<bool> {
        Ok(self.local_branches.lock().unwrap().contains(branch))
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        Ok(self
            .remote_branches
            .contains(&(remote.to_string(), branch.to_string())))
    }

    fn branch_remote(&self, branch: &str) -> Result<String> {
        Ok(self
            .remotes
            .get(branch)
            .cloned()
            .unwrap_or_else(|| smush::git::DEFAULT_REMOTE.to_string()))
    }

    fn toplevel(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/repo"))
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.record(format!("checkout {branch}"))?;
        *self.current.lock().unwrap() = branch.to_string();
        Ok(())
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        self.record(format!("checkout -b {branch}"))?;
        self.local_branches
            .lock()
            .unwrap()
            .insert(branch.to_string());
        *self.current.lock().unwrap() = branch.to_string();
        Ok(())
    }

    fn checkout_from_remote(&self, branch: &str, remote: &str) -> Result<()> {
        self.record(format!("checkout -b {branch} {remote}/{branch}"))?;
        self.local_branches
            .lock()
            .unwrap()
            .insert(branch.to_string());
        *self.current.lock().unwrap() = branch.to_string();
        Ok(())
    }

    fn pull_rebase(&self) -> Result<()> {
        self.record("pull --rebase".to_string())
    }

    fn rebase(&self, onto: &str) -> Result<()> {
        self.record(format!("rebase {onto}"))
    }

    fn rebase_interactive(&self, count: usize) -> Result<()> {
        self.record(format!("rebase -i HEAD~{count}"))
    }

    fn push(&self, force: bool) -> Result<()> {
        self.record(if force { "push --force" } else { "push" }.to_string())
    }

    fn push_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push -u {remote} {branch}"))
    }

    fn merge_ff_only(&self, branch: &str) -> Result<()> {
        self.record(format!("merge --ff-only {branch}"))
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {remote} :{branch}"))
    }

    fn delete_local_branch(&self, branch: &str) -> Result<()> {
        self.record(format!("branch -D {branch}"))?;
        self.local_branches.lock().unwrap().remove(branch);
        Ok(())
    }

    fn unmerged_log(&self, _base: &str, _topic: &str) -> Result<String> {
        Ok(self.unmerged_log.clone())
    }

    fn unmerged_count(&self, _base: &str, _topic: &str) -> Result<usize> {
        Ok(self.unmerged_count)
    }

    fn unmerged_files(&self, _base: &str, _topic: &str) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
}
