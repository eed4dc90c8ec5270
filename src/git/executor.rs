//! git command executor
//!
//! Runs `git` as a child process and captures its output.

use super::{DEFAULT_REMOTE, GitOps};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

const GIT_COMMAND: &str = "git";
const NOT_A_REPO: &str = "not a git repository";

/// Executor for git commands
#[derive(Debug, Clone)]
pub struct GitExecutor {
    /// Directory git runs in (None = current directory)
    repo_path: Option<PathBuf>,
}

impl GitExecutor {
    /// Open the repository containing the current directory
    pub fn open_current() -> Result<Self> {
        Self::check(Self { repo_path: None })
    }

    /// Open the repository containing `path`
    pub fn open(path: &Path) -> Result<Self> {
        Self::check(Self {
            repo_path: Some(path.to_path_buf()),
        })
    }

    fn check(executor: Self) -> Result<Self> {
        executor.run(&["rev-parse", "--git-dir"])?;
        Ok(executor)
    }

    pub(super) fn command(&self) -> Command {
        let mut cmd = Command::new(GIT_COMMAND);
        if let Some(ref path) = self.repo_path {
            cmd.arg("-C").arg(path);
        }
        cmd
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!(?args, "running git");
        self.command().args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::GitNotFound
            } else {
                Error::Io(e)
            }
        })
    }

    /// Run a git command, returning stdout on success
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.contains(NOT_A_REPO) {
            return Err(Error::NotARepository);
        }

        Err(Error::GitCommand {
            command: args.join(" "),
            stderr,
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    /// Run a yes/no query: exit 0 is yes, exit 1 is no, anything else fails
    fn probe(&self, args: &[&str]) -> Result<bool> {
        let output = self.output(args)?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            code => Err(Error::GitCommand {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                exit_code: code.unwrap_or(-1),
            }),
        }
    }
}

/// Unique, non-empty lines in first-seen order
fn unique_paths(name_only_log: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    name_only_log
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .collect()
}

impl GitOps for GitExecutor {
    fn current_branch(&self) -> Result<String> {
        Ok(self
            .run(&["rev-parse", "--abbrev-ref", "HEAD"])?
            .trim()
            .to_string())
    }

    fn local_branch_exists(&self, branch: &str) -> Result<bool> {
        let reference = format!("refs/heads/{branch}");
        self.probe(&["show-ref", "--verify", "--quiet", &reference])
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        let reference = format!("refs/remotes/{remote}/{branch}");
        self.probe(&["show-ref", "--verify", "--quiet", &reference])
    }

    fn branch_remote(&self, branch: &str) -> Result<String> {
        let key = format!("branch.{branch}.remote");
        let output = self.output(&["config", "--get", &key])?;
        let remote = String::from_utf8_lossy(&output.stdout).trim().to_string();

        if output.status.success() && !remote.is_empty() {
            Ok(remote)
        } else {
            debug!(branch, "no tracked remote, using default");
            Ok(DEFAULT_REMOTE.to_string())
        }
    }

    fn toplevel(&self) -> Result<PathBuf> {
        Ok(PathBuf::from(
            self.run(&["rev-parse", "--show-toplevel"])?.trim(),
        ))
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch]).map(drop)
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", "-b", branch]).map(drop)
    }

    fn checkout_from_remote(&self, branch: &str, remote: &str) -> Result<()> {
        let start = format!("{remote}/{branch}");
        self.run(&["checkout", "-b", branch, &start]).map(drop)
    }

    fn pull_rebase(&self) -> Result<()> {
        self.run(&["pull", "--rebase"]).map(drop)
    }

    fn rebase(&self, onto: &str) -> Result<()> {
        self.run(&["rebase", onto]).map(drop)
    }

    fn rebase_interactive(&self, count: usize) -> Result<()> {
        let status = self.rebase_interactive_status(count)?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::GitCommand {
                command: format!("rebase -i HEAD~{count}"),
                stderr: String::new(),
                exit_code: status.code().unwrap_or(-1),
            })
        }
    }

    fn push(&self, force: bool) -> Result<()> {
        if force {
            self.run(&["push", "--force"]).map(drop)
        } else {
            self.run(&["push"]).map(drop)
        }
    }

    fn push_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", "-u", remote, branch]).map(drop)
    }

    fn merge_ff_only(&self, branch: &str) -> Result<()> {
        self.run(&["merge", "--ff-only", branch]).map(drop)
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!(":{branch}");
        self.run(&["push", remote, &refspec]).map(drop)
    }

    fn delete_local_branch(&self, branch: &str) -> Result<()> {
        self.run(&["branch", "-D", branch]).map(drop)
    }

    fn unmerged_log(&self, base: &str, topic: &str) -> Result<String> {
        let range = format!("{base}..{topic}");
        // log.decorate and log.showSignature would otherwise leak into the parsed text
        self.run(&[
            "log",
            "--no-color",
            "--no-decorate",
            "--no-show-signature",
            "--pretty=medium",
            &range,
        ])
    }

    fn unmerged_count(&self, base: &str, topic: &str) -> Result<usize> {
        let range = format!("{base}..{topic}");
        let output = self.run(&["rev-list", "--count", &range])?;
        output
            .trim()
            .parse()
            .map_err(|e| Error::Internal(format!("unexpected rev-list output {output:?}: {e}")))
    }

    fn unmerged_files(&self, base: &str, topic: &str) -> Result<Vec<PathBuf>> {
        let range = format!("{base}..{topic}");
        let root = self.toplevel()?;
        let log = self.run(&["log", "--name-only", "--format=", &range])?;

        Ok(unique_paths(&log)
            .into_iter()
            .map(|name| root.join(name))
            .filter(|path| path.is_file())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_paths_keeps_first_seen_order() {
        let log = "src/b.rs\nsrc/a.rs\n\nsrc/b.rs\nREADME.md\n";
        assert_eq!(unique_paths(log), vec!["src/b.rs", "src/a.rs", "README.md"]);
    }

    #[test]
    fn test_unique_paths_empty() {
        assert!(unique_paths("\n\n").is_empty());
    }

    fn git(dir: &Path, args: &[&str]) -> String {
        let output = Command::new(GIT_COMMAND)
            .arg("-C")
            .arg(dir)
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(args)
            .output()
            .unwrap();
        assert!(output.status.success(), "git {args:?} failed");
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    #[test]
    fn test_unmerged_log_ignores_decoration_and_signature_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path();
        git(dir, &["init", "-q"]);
        git(dir, &["config", "log.decorate", "short"]);
        git(dir, &["config", "log.showSignature", "true"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
        git(dir, &["commit", "-q", "--allow-empty", "-m", "Initial commit"]);
        git(dir, &["branch", "-M", "main"]);
        git(dir, &["checkout", "-q", "-b", "topic"]);
        git(dir, &["commit", "-q", "--allow-empty", "-m", "Fix bug"]);
        let sha = git(dir, &["rev-parse", "topic"]);

        let executor = GitExecutor::open(dir).unwrap();
        let log = executor.unmerged_log("main", "topic").unwrap();
        let records = crate::lint::parse_log(&log);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hash, sha);
        assert_eq!(records[0].header, "Fix bug");
        assert!(records[0].violations.is_empty());
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = GitExecutor::open(temp.path());

        // Either git is missing or the directory is not a repository
        assert!(matches!(
            result,
            Err(Error::NotARepository | Error::GitNotFound)
        ));
    }
}
