//! Branch resolution before planning

use crate::error::{Error, Result};
use crate::git::GitOps;
use crate::types::BranchPair;
use tracing::debug;

/// Which topic branch to work on and how to get it locally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSelection {
    /// Base, topic and the remote they live on
    pub branches: BranchPair,
    /// Topic was not given and defaults to the checked-out branch
    pub from_current_branch: bool,
    /// Topic exists only on the remote and must be checked out from it
    pub needs_remote_checkout: bool,
}

/// Resolve the topic branch against `base`.
///
/// `base` must have a local checkout. Without an explicit `topic`, the
/// checked-out branch is used. The remote is the one `base` tracks.
pub fn select_topic_branch(
    git: &dyn GitOps,
    base: &str,
    topic: Option<&str>,
) -> Result<TopicSelection> {
    if !git.local_branch_exists(base)? {
        return Err(Error::BaseBranchNotFound(base.to_string()));
    }

    let (topic, from_current_branch) = match topic {
        Some(t) => (t.to_string(), false),
        None => (git.current_branch()?, true),
    };

    if topic == base {
        return Err(Error::SameBranch);
    }

    let remote = git.branch_remote(base)?;
    let needs_remote_checkout = if git.local_branch_exists(&topic)? {
        false
    } else if git.remote_branch_exists(&remote, &topic)? {
        true
    } else {
        return Err(Error::TopicBranchNotFound(topic));
    };

    debug!(%base, %topic, %remote, from_current_branch, needs_remote_checkout, "selected topic branch");
    Ok(TopicSelection {
        branches: BranchPair {
            base: base.to_string(),
            topic,
            remote,
        },
        from_current_branch,
        needs_remote_checkout,
    })
}

/// Number of commits on topic but not on base; zero is an error.
pub fn count_unmerged(git: &dyn GitOps, branches: &BranchPair) -> Result<usize> {
    let count = git.unmerged_count(&branches.base, &branches.topic)?;
    debug!(range = %branches.unmerged_range(), count, "counted unmerged commits");
    if count == 0 {
        return Err(Error::NoUnmergedCommits);
    }
    Ok(count)
}
