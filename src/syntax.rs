//! Per-extension syntax checks on unmerged files
//!
//! Commands come from the `syntax check scripts` config map and run through
//! `sh -c`, with `{}` replaced by the file path.

use crate::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Placeholder replaced by the file path in a check command
const PATH_PLACEHOLDER: &str = "{}";

/// Outcome of checking a set of files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxCheckReport {
    /// Files a script was run against
    pub checked: Vec<PathBuf>,
    /// `Error found in <path>` for every failing file
    pub errors: Vec<String>,
}

/// Script for `path`, looked up by extension
pub fn script_for<'a>(path: &Path, scripts: &'a BTreeMap<String, String>) -> Option<&'a str> {
    let extension = path.extension()?.to_str()?;
    scripts.get(extension).map(String::as_str)
}

/// Fill the path into a command template
pub fn render_command(template: &str, path: &Path) -> String {
    template.replace(PATH_PLACEHOLDER, &path.to_string_lossy())
}

/// Run the matching script against every file that has one.
///
/// A script exiting non-zero marks the file as failing; only a failure to
/// spawn the shell is an error.
pub fn run_syntax_checks(
    files: &[PathBuf],
    scripts: &BTreeMap<String, String>,
) -> Result<SyntaxCheckReport> {
    let mut report = SyntaxCheckReport::default();

    for path in files {
        let Some(template) = script_for(path, scripts) else {
            continue;
        };

        let command = render_command(template, path);
        debug!(path = %path.display(), %command, "running syntax check");

        let status = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .stdout(Stdio::null())
            .status()?;

        report.checked.push(path.clone());
        if !status.success() {
            report
                .errors
                .push(format!("Error found in {}", path.display()));
        }
    }

    Ok(report)
}
