//! smush: automate merging a topic branch into its base branch.
//!
//! The workflow checks that the topic branch has unmerged commits, reports
//! commit message style problems, verifies an open PR/MR targets the right
//! base, then fast-forwards the base branch and deletes the topic branch.
//!
//! The commit message checker in [`lint`] is pure and usable on its own:
//!
//! ```
//! let report = smush::lint::check_log(
//!     "commit abc123\nAuthor: A\nDate:   D\n\n    Fix bug\n",
//! );
//! assert_eq!(report, "No style errors found.\n");
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod git;
pub mod lint;
pub mod merge;
pub mod platform;
pub mod syntax;
pub mod types;
