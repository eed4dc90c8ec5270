//! Interactive git commands
//!
//! These spawn git with inherited stdio so the user's editor can take over
//! the terminal, unlike the captured-output commands in executor.rs.

use super::executor::GitExecutor;
use crate::error::{Error, Result};
use std::process::{ExitStatus, Stdio};
use tracing::debug;

impl GitExecutor {
    /// Run `git rebase -i HEAD~<count>` interactively
    pub(super) fn rebase_interactive_status(&self, count: usize) -> Result<ExitStatus> {
        let base = format!("HEAD~{count}");
        debug!(%base, "starting interactive rebase");

        self.command()
            .args(["rebase", "-i", &base])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::GitNotFound
                } else {
                    Error::Io(e)
                }
            })
    }
}
