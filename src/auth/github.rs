//! GitHub token lookup

use super::{AuthToken, token_from_cli, token_from_env};

/// Environment variables checked, in order
const GITHUB_TOKEN_VARS: &[&str] = &["GH_TOKEN", "GITHUB_TOKEN"];

/// Find a GitHub token: environment first, then `gh auth token`.
///
/// `host` is passed to `gh` for GitHub Enterprise.
pub fn get_github_auth(host: Option<&str>) -> Option<AuthToken> {
    token_from_env(GITHUB_TOKEN_VARS).or_else(|| token_from_cli("gh", host))
}
