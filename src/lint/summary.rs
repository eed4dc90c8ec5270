//! Console report of style violations

use super::CommitRecord;
use std::fmt::Write;

/// Report emitted when no commit has a violation
pub const NO_ERRORS: &str = "No style errors found.\n";

/// Render the violations of every commit into a console report.
///
/// Each offending commit gets a block:
///
/// ```text
/// Style error(s) found in commit <hash>:
///
///     <violation>
///
/// ```
///
/// With no violations at all the report is [`NO_ERRORS`].
pub fn summarize(records: &[CommitRecord]) -> String {
    let mut summary = String::new();

    for record in records.iter().filter(|r| r.has_violations()) {
        // Writing to a String cannot fail
        let _ = writeln!(summary, "Style error(s) found in commit {}:", record.hash);
        summary.push('\n');
        for violation in &record.violations {
            let _ = writeln!(summary, "    {violation}");
        }
        summary.push('\n');
    }

    if summary.is_empty() {
        summary.push_str(NO_ERRORS);
    }

    summary
}
