//! Freshness checking of report entries against the current file.

use std::path::Path;

use crate::error;
use crate::lines::{SourceLine, char_range, split_lines};
use crate::report::{MatchEntry, Report};

/// Result of checking a single report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// The recorded span no longer exists in the file.
    Broken(&'static str),
    /// The text at the recorded span still equals `include`.
    Fresh,
    /// The span exists but holds different text.
    Stale,
}

/// Check one report entry against the file's current lines.
pub fn compare_entry_against_lines(lines: &[SourceLine], entry: &MatchEntry) -> CheckResult {
    let Some(line) = entry.line.checked_sub(1).and_then(|idx| return lines.get(idx)) else {
        return CheckResult::Broken("line out of range");
    };
    let Some(range) = char_range(&line.body, entry.position, entry.length) else {
        return CheckResult::Broken("span exceeds line");
    };
    if line.body.get(range) == Some(entry.include.as_str()) {
        return CheckResult::Fresh;
    } else {
        return CheckResult::Stale;
    }
}

/// Load a report and the input file, and check every entry in report order.
///
/// # Errors
///
/// Returns `Error::ReportUnreadable` if the report cannot be loaded,
/// `Error::FileNotFound` if the input is missing, or `Error::Io`.
pub fn check_report(input: &Path, report_path: &Path) -> Result<Vec<(MatchEntry, CheckResult)>, error::Error> {
    let report = Report::read(report_path)?;
    let content = match std::fs::read_to_string(input) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(error::Error::FileNotFound { path: input.to_path_buf() });
        },
        Err(e) => return Err(error::Error::Io(e)),
        Ok(c) => c,
    };
    let lines = split_lines(&content);

    return Ok(report
        .entries
        .into_iter()
        .map(|entry| {
            let result = compare_entry_against_lines(&lines, &entry);
            return (entry, result);
        })
        .collect());
}
