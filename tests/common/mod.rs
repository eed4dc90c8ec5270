//! Shared test utilities

#![allow(dead_code)]

mod mock_git;
mod mock_platform;

pub use mock_git::MockGit;
pub use mock_platform::{MockPlatformService, github_config, make_pr};
