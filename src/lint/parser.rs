//! Split default-format `git log` output into commit records

use super::{CommitRecord, MESSAGE_INDENT_WIDTH, validate};

const COMMIT_PREFIX: &str = "commit ";
const AUTHOR_PREFIX: &str = "Author: ";
const DATE_PREFIX: &str = "Date:   ";
const MERGE_PREFIX: &str = "Merge: ";

/// Collects the lines of one commit until the next boundary.
#[derive(Debug, Default)]
struct RecordBuilder {
    hash: String,
    author: String,
    date: String,
    header: Option<String>,
    body: Vec<String>,
    had_premature_body: bool,
    /// Blank lines seen since the `commit` line
    blank_lines: usize,
}

impl RecordBuilder {
    fn new(hash: &str) -> Self {
        Self {
            hash: hash.to_string(),
            ..Self::default()
        }
    }

    fn push_line(&mut self, line: &str) {
        if let Some(author) = line.strip_prefix(AUTHOR_PREFIX) {
            self.author = author.to_string();
        } else if let Some(date) = line.strip_prefix(DATE_PREFIX) {
            self.date = date.to_string();
        } else if line.starts_with(MERGE_PREFIX) {
            // Parent list of a merge commit, not part of the message
        } else if line.trim().is_empty() {
            self.blank_lines += 1;
        } else if self.header.is_none() {
            self.header = Some(strip_indent(line).to_string());
        } else {
            // Only the blank line that precedes the subject has been seen
            if self.blank_lines == 1 {
                self.had_premature_body = true;
            }
            self.body.push(strip_indent(line).to_string());
        }
    }

    fn finish(self) -> CommitRecord {
        let mut record = CommitRecord {
            hash: self.hash,
            author: self.author,
            date: self.date,
            header: self.header.unwrap_or_default(),
            body: self.body,
            had_premature_body: self.had_premature_body,
            violations: Vec::new(),
        };
        record.violations = validate(&record);
        record
    }
}

/// Drop the message indentation `git log` adds.
///
/// Lines shorter than the indent strip to an empty string.
fn strip_indent(line: &str) -> &str {
    line.char_indices()
        .nth(MESSAGE_INDENT_WIDTH)
        .map_or("", |(idx, _)| &line[idx..])
}

/// Parse `git log` output into validated commit records, in input order.
///
/// Lines before the first `commit` line are ignored. Records are validated
/// once, when the next `commit` line or the end of input closes them.
pub fn parse_log(log_text: &str) -> Vec<CommitRecord> {
    let mut records = Vec::new();
    let mut current: Option<RecordBuilder> = None;

    for line in log_text.lines() {
        if let Some(hash) = line.strip_prefix(COMMIT_PREFIX) {
            if let Some(finished) = current.replace(RecordBuilder::new(hash)) {
                records.push(finished.finish());
            }
        } else if let Some(builder) = current.as_mut() {
            builder.push_line(line);
        }
    }

    records.extend(current.map(RecordBuilder::finish));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::StyleViolation;

    const TWO_COMMITS: &str = "\
commit 1111111111111111111111111111111111111111
Author: Ada Lovelace <ada@example.com>
Date:   Mon Jan 6 10:00:00 2025 +0000

    Add engine notes

    The analytical engine gets a proper README with
    usage examples.

commit 2222222222222222222222222222222222222222
Author: Charles Babbage <charles@example.com>
Date:   Sun Jan 5 09:00:00 2025 +0000

    Initial commit
";

    #[test]
    fn test_strip_indent() {
        assert_eq!(strip_indent("    Fix bug"), "Fix bug");
        assert_eq!(strip_indent("      nested"), "  nested");
    }

    #[test]
    fn test_strip_indent_short_line_is_empty() {
        assert_eq!(strip_indent("  x"), "");
        assert_eq!(strip_indent("abcd"), "");
        assert_eq!(strip_indent(""), "");
    }

    #[test]
    fn test_strip_indent_counts_characters_not_bytes() {
        assert_eq!(strip_indent("éééé café"), " café");
    }

    #[test]
    fn test_parse_metadata_fields() {
        let records = parse_log(TWO_COMMITS);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hash, "1111111111111111111111111111111111111111");
        assert_eq!(records[0].author, "Ada Lovelace <ada@example.com>");
        assert_eq!(records[0].date, "Mon Jan 6 10:00:00 2025 +0000");
        assert_eq!(records[1].author, "Charles Babbage <charles@example.com>");
    }

    #[test]
    fn test_parse_header_and_body() {
        let records = parse_log(TWO_COMMITS);

        assert_eq!(records[0].header, "Add engine notes");
        assert_eq!(
            records[0].body,
            vec![
                "The analytical engine gets a proper README with",
                "usage examples.",
            ]
        );
        assert!(!records[0].had_premature_body);
        assert_eq!(records[1].header, "Initial commit");
        assert!(records[1].body.is_empty());
    }

    #[test]
    fn test_parse_detects_missing_blank_line() {
        let log = "commit abc\nAuthor: A\nDate:   D\n\n    Subject\n    Body right away\n";
        let records = parse_log(log);

        assert!(records[0].had_premature_body);
        assert_eq!(records[0].body, vec!["Body right away"]);
        assert_eq!(
            records[0].violations,
            vec![StyleViolation::MissingBlankLine]
        );
    }

    #[test]
    fn test_blank_counter_resets_per_commit() {
        // The trailing blank line of the first commit must not hide the
        // missing separator in the second.
        let log = "commit a\nAuthor: A\nDate:   D\n\n    One\n\n    Body\n\n\
                   commit b\nAuthor: B\nDate:   D\n\n    Two\n    Body\n";
        let records = parse_log(log);

        assert!(!records[0].had_premature_body);
        assert!(records[1].had_premature_body);
    }

    #[test]
    fn test_commit_without_message_is_kept() {
        let records = parse_log("commit abc\nAuthor: A\nDate:   D\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header, "");
        assert!(records[0].body.is_empty());
        assert!(records[0].violations.is_empty());
    }

    #[test]
    fn test_lines_before_first_commit_are_ignored() {
        let records = parse_log("warning: something\n\n    stray\ncommit abc\n\n    Real\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header, "Real");
    }

    #[test]
    fn test_merge_line_is_not_the_subject() {
        let log = "commit abc\nMerge: 111 222\nAuthor: A\nDate:   D\n\n    Merge branch 'x'\n";
        let records = parse_log(log);

        assert_eq!(records[0].header, "Merge branch 'x'");
    }

    #[test]
    fn test_no_commit_lines_yields_nothing() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("just some text\n\nmore text").is_empty());
    }
}
