//! Authentication for GitHub and GitLab
//!
//! Supports CLI-based auth (gh, glab) and environment variables. A missing
//! token is not an error: requests go out anonymously, which is enough for
//! public repositories.

mod github;
mod gitlab;

pub use github::get_github_auth;
pub use gitlab::get_gitlab_auth;

use std::process::Command;
use tracing::debug;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh or glab)
    Cli,
    /// Token from environment variable
    EnvVar,
}

/// A resolved API token
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    /// The token itself
    pub token: String,
    /// Where it came from
    pub source: AuthSource,
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// First non-empty value among `vars`
fn token_from_env(vars: &[&str]) -> Option<AuthToken> {
    vars.iter().find_map(|var| {
        std::env::var(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|token| {
                debug!(var, "using token from environment");
                AuthToken {
                    token,
                    source: AuthSource::EnvVar,
                }
            })
    })
}

/// Token printed by `<program> auth token`, if the tool is installed and logged in
fn token_from_cli(program: &str, host: Option<&str>) -> Option<AuthToken> {
    let mut cmd = Command::new(program);
    cmd.args(["auth", "token"]);
    if let Some(h) = host {
        cmd.args(["--hostname", h]);
    }

    let output = cmd.output().ok()?;
    if !output.status.success() {
        debug!(program, "CLI auth unavailable");
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return None;
    }
    debug!(program, "using token from CLI");
    Some(AuthToken {
        token,
        source: AuthSource::Cli,
    })
}
