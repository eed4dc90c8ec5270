//! Merge planning - pure functions for creating merge plans
//!
//! No I/O happens here: the branches are passed in and the result is a list
//! of git steps, which makes the sequencing easy to unit test.

use crate::types::BranchPair;

/// A single git operation in a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStep {
    /// `git checkout <branch>`
    CheckoutBranch {
        /// Branch to check out
        branch: String,
    },
    /// `git checkout -b <branch>` from the checked-out branch
    CreateBranch {
        /// Branch to create
        branch: String,
    },
    /// `git push -u <remote> <branch>`
    PushUpstream {
        /// Remote to push to
        remote: String,
        /// Branch to push and track
        branch: String,
    },
    /// `git pull --rebase` on the checked-out branch
    PullRebase {
        /// Branch being updated (for display)
        branch: String,
    },
    /// `git rebase <onto>` on the checked-out branch
    RebaseOnto {
        /// Branch being rebased (for display)
        branch: String,
        /// Upstream to rebase onto
        onto: String,
    },
    /// `git push --force` of the checked-out branch
    ForcePush {
        /// Branch being pushed (for display)
        branch: String,
    },
    /// `git merge --ff-only <branch>` into the checked-out branch
    MergeFastForward {
        /// Branch being merged
        branch: String,
        /// Branch receiving the merge (for display)
        into: String,
    },
    /// `git push` of the checked-out branch
    PushBranch {
        /// Branch being pushed (for display)
        branch: String,
    },
    /// `git push <remote> :<branch>`
    DeleteRemoteBranch {
        /// Remote holding the branch
        remote: String,
        /// Branch to delete
        branch: String,
    },
    /// `git branch -D <branch>`
    DeleteLocalBranch {
        /// Branch to delete
        branch: String,
    },
}

impl std::fmt::Display for MergeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckoutBranch { branch } => write!(f, "check out '{branch}'"),
            Self::CreateBranch { branch } => write!(f, "create branch '{branch}'"),
            Self::PushUpstream { remote, branch } => {
                write!(f, "push '{branch}' to '{remote}'")
            }
            Self::PullRebase { branch } => write!(f, "update '{branch}' (pull --rebase)"),
            Self::RebaseOnto { branch, onto } => write!(f, "rebase '{branch}' onto '{onto}'"),
            Self::ForcePush { branch } => write!(f, "force-push '{branch}'"),
            Self::MergeFastForward { branch, into } => {
                write!(f, "fast-forward '{into}' to '{branch}'")
            }
            Self::PushBranch { branch } => write!(f, "push '{branch}'"),
            Self::DeleteRemoteBranch { remote, branch } => {
                write!(f, "delete remote branch '{remote}/{branch}'")
            }
            Self::DeleteLocalBranch { branch } => write!(f, "delete local branch '{branch}'"),
        }
    }
}

/// Options for merge planning
#[derive(Debug, Clone, Default)]
pub struct MergePlanOptions {
    /// Also delete the local topic branch after merging
    pub delete_local: bool,
}

/// An ordered list of git steps
///
/// Created by `create_update_plan()` / `create_merge_plan()` (pure) and run
/// by `execute_plan()` (effectful).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// Steps in execution order
    pub steps: Vec<MergeStep>,
}

impl MergePlan {
    /// Check if the plan has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// Plan creating a topic branch from base and publishing it
#[must_use]
pub fn create_topic_plan(branches: &BranchPair) -> MergePlan {
    MergePlan {
        steps: vec![
            MergeStep::CheckoutBranch {
                branch: branches.base.clone(),
            },
            MergeStep::CreateBranch {
                branch: branches.topic.clone(),
            },
            MergeStep::PushUpstream {
                remote: branches.remote.clone(),
                branch: branches.topic.clone(),
            },
        ],
    }
}

/// Plan bringing base up to date and rebasing the topic branch onto it
///
/// The rebased topic is force-pushed so the hosting platform sees the
/// commits that will land on base and marks the PR as merged.
#[must_use]
pub fn create_update_plan(branches: &BranchPair) -> MergePlan {
    MergePlan {
        steps: vec![
            MergeStep::CheckoutBranch {
                branch: branches.base.clone(),
            },
            MergeStep::PullRebase {
                branch: branches.base.clone(),
            },
            MergeStep::CheckoutBranch {
                branch: branches.topic.clone(),
            },
            MergeStep::RebaseOnto {
                branch: branches.topic.clone(),
                onto: branches.base.clone(),
            },
            MergeStep::ForcePush {
                branch: branches.topic.clone(),
            },
        ],
    }
}

/// Plan fast-forwarding base to the topic branch and cleaning up
#[must_use]
pub fn create_merge_plan(branches: &BranchPair, options: &MergePlanOptions) -> MergePlan {
    let mut steps = vec![
        MergeStep::CheckoutBranch {
            branch: branches.base.clone(),
        },
        MergeStep::MergeFastForward {
            branch: branches.topic.clone(),
            into: branches.base.clone(),
        },
        MergeStep::PushBranch {
            branch: branches.base.clone(),
        },
        MergeStep::DeleteRemoteBranch {
            remote: branches.remote.clone(),
            branch: branches.topic.clone(),
        },
    ];

    if options.delete_local {
        steps.push(MergeStep::DeleteLocalBranch {
            branch: branches.topic.clone(),
        });
    }

    MergePlan { steps }
}
