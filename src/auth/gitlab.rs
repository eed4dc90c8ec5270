//! GitLab token lookup

use super::{AuthToken, token_from_cli, token_from_env};

/// Environment variables checked, in order
const GITLAB_TOKEN_VARS: &[&str] = &["GITLAB_TOKEN", "GL_TOKEN"];

/// Find a GitLab token: environment first, then `glab auth token`.
pub fn get_gitlab_auth(host: Option<&str>) -> Option<AuthToken> {
    token_from_env(GITLAB_TOKEN_VARS).or_else(|| token_from_cli("glab", host))
}
