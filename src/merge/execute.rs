//! Plan execution - effectful operations
//!
//! Takes a `MergePlan` (created by the pure planning functions) and runs its
//! steps against a `GitOps` implementation.

use crate::error::{Error, Result};
use crate::git::GitOps;
use crate::merge::plan::{MergePlan, MergeStep};
use tracing::debug;

/// Receives progress updates while a plan runs
pub trait ProgressCallback {
    /// Called before a step runs
    fn on_step(&self, step: &MergeStep);

    /// Called after a step succeeded
    fn on_step_done(&self, _step: &MergeStep) {}
}

/// Result of plan execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanExecutionResult {
    /// Steps that completed, in order
    pub completed_steps: Vec<MergeStep>,
    /// Step that failed (if any)
    pub failed_step: Option<MergeStep>,
    /// Error message from the failed step (if any)
    pub error_message: Option<String>,
}

impl PlanExecutionResult {
    /// Check if every planned step succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed_step.is_none()
    }

    /// Check if at least one step ran before a failure
    #[must_use]
    pub const fn has_progress(&self) -> bool {
        !self.completed_steps.is_empty()
    }

    /// Turn a failed run into an error
    pub fn into_result(self) -> Result<Vec<MergeStep>> {
        match self.failed_step {
            None => Ok(self.completed_steps),
            Some(step) => Err(Error::StepFailed {
                step: step.to_string(),
                message: self.error_message.unwrap_or_default(),
            }),
        }
    }
}

fn apply_step(step: &MergeStep, git: &dyn GitOps) -> Result<()> {
    match step {
        MergeStep::CheckoutBranch { branch } => git.checkout(branch),
        MergeStep::CreateBranch { branch } => git.create_branch(branch),
        MergeStep::PushUpstream { remote, branch } => git.push_upstream(remote, branch),
        MergeStep::PullRebase { .. } => git.pull_rebase(),
        MergeStep::RebaseOnto { onto, .. } => git.rebase(onto),
        MergeStep::ForcePush { .. } => git.push(true),
        MergeStep::MergeFastForward { branch, .. } => git.merge_ff_only(branch),
        MergeStep::PushBranch { .. } => git.push(false),
        MergeStep::DeleteRemoteBranch { remote, branch } => {
            git.delete_remote_branch(remote, branch)
        }
        MergeStep::DeleteLocalBranch { branch } => git.delete_local_branch(branch),
    }
}

/// Execute the plan (EFFECTFUL)
///
/// Steps run in order and execution stops at the first failure; the result
/// records what completed, which step failed and why.
pub fn execute_plan(
    plan: &MergePlan,
    git: &dyn GitOps,
    progress: &dyn ProgressCallback,
) -> PlanExecutionResult {
    let mut result = PlanExecutionResult::default();

    for step in &plan.steps {
        progress.on_step(step);
        debug!(%step, "executing step");

        match apply_step(step, git) {
            Ok(()) => {
                progress.on_step_done(step);
                result.completed_steps.push(step.clone());
            }
            Err(e) => {
                debug!(%step, error = %e, "step failed");
                result.failed_step = Some(step.clone());
                result.error_message = Some(e.to_string());
                break;
            }
        }
    }

    result
}
