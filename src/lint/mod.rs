//! Commit message style checking
//!
//! Works on the default-format output of `git log`:
//! 1. Parse - split log text into `CommitRecord`s (validated as they close)
//! 2. Validate - apply the subject/body style rules to one record
//! 3. Summarize - render every violation into a console report
//!
//! Everything here is pure: text in, records and report text out.

mod parser;
mod rules;
mod summary;

pub use parser::parse_log;
pub use rules::{StyleViolation, validate};
pub use summary::summarize;

/// Indentation `git log` puts in front of every message line
pub const MESSAGE_INDENT_WIDTH: usize = 4;

/// Longest allowed subject line, in characters
pub const SUBJECT_MAX_LEN: usize = 50;

/// Longest allowed body line, in characters
pub const BODY_LINE_MAX_LEN: usize = 72;

/// One commit as extracted from `git log` output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit hash, verbatim from the `commit` line
    pub hash: String,
    /// Author, verbatim from the `Author:` line (empty if absent)
    pub author: String,
    /// Date, verbatim from the `Date:` line (empty if absent)
    pub date: String,
    /// First message line with indentation stripped (empty if absent)
    pub header: String,
    /// Remaining non-blank message lines, indentation stripped
    pub body: Vec<String>,
    /// A body line followed the subject without a separating blank line
    pub had_premature_body: bool,
    /// Style violations, in rule order
    pub violations: Vec<StyleViolation>,
}

impl CommitRecord {
    /// Whether any style rule flagged this commit
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Parse `git log` output and render the style report in one go.
pub fn check_log(log_text: &str) -> String {
    summarize(&parse_log(log_text))
}
