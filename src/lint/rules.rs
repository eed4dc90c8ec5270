//! Commit message style rules

use super::{BODY_LINE_MAX_LEN, CommitRecord, SUBJECT_MAX_LEN};

/// A single style problem found in a commit message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleViolation {
    /// Subject line is longer than [`SUBJECT_MAX_LEN`]
    SubjectTooLong,
    /// Body starts directly after the subject line
    MissingBlankLine,
    /// A body line is longer than [`BODY_LINE_MAX_LEN`]
    BodyLineTooLong {
        /// 1-based index among the body lines
        line: usize,
    },
}

impl std::fmt::Display for StyleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubjectTooLong => {
                write!(f, "Subject line exceeds {SUBJECT_MAX_LEN} characters.")
            }
            Self::MissingBlankLine => {
                write!(f, "If multi-line, needs blank line after subject line.")
            }
            Self::BodyLineTooLong { line } => {
                write!(f, "Body line {line} exceeds {BODY_LINE_MAX_LEN} characters.")
            }
        }
    }
}

/// Check one commit against the style rules.
///
/// Violations come back in rule order: subject length, blank line after
/// subject, then body line lengths by line index. Pure, so validating the
/// same record twice gives the same answer.
pub fn validate(record: &CommitRecord) -> Vec<StyleViolation> {
    let mut violations = Vec::new();

    if record.header.chars().count() > SUBJECT_MAX_LEN {
        violations.push(StyleViolation::SubjectTooLong);
    }

    if record.had_premature_body {
        violations.push(StyleViolation::MissingBlankLine);
    }

    violations.extend(
        record
            .body
            .iter()
            .enumerate()
            .filter(|(_, line)| line.chars().count() > BODY_LINE_MAX_LEN)
            .map(|(idx, _)| StyleViolation::BodyLineTooLong { line: idx + 1 }),
    );

    violations
}
