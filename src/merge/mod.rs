//! Merge engine for topic branches
//!
//! Three-phase pattern:
//! 1. Gather - resolve branches (`select_topic_branch`) and run checks
//! 2. Plan - create a `MergePlan` (pure, testable)
//! 3. Execute - run the plan's git operations (effectful)

mod branches;
mod execute;
mod plan;

pub use branches::{TopicSelection, count_unmerged, select_topic_branch};
pub use execute::{PlanExecutionResult, ProgressCallback, execute_plan};
pub use plan::{
    MergePlan, MergePlanOptions, MergeStep, create_merge_plan, create_topic_plan, create_update_plan,
};
