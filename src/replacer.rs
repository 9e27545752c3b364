//! Apply the replacements recorded in a JSON report back to the scanned file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::lines::{SourceLine, char_range, join_lines, split_lines};
use crate::report::{MatchEntry, Report};

/// What one replace run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceSummary {
    /// Number of replacements written into the file.
    pub applied: usize,
    /// Where the original file was moved, if anything was applied.
    pub backup: Option<PathBuf>,
    /// Entries on an existing line that could not be placed. Entries naming a
    /// line the file does not have are dropped without being counted.
    pub skipped: usize,
}

/// A replacement already spliced into a line, in the report's original
/// coordinates. Later entries on the same line shift by its net length change.
struct AppliedEdit {
    /// Original end offset (exclusive).
    end: usize,
    /// Character count of the inserted text.
    inserted: usize,
    /// Original start offset.
    start: usize,
}

impl AppliedEdit {
    /// Whether the original span `[start, end)` intersects this edit.
    const fn overlaps(&self, start: usize, end: usize) -> bool {
        return start < self.end && self.start < end;
    }
}

/// Apply `report_path` to `input`.
///
/// When at least one replacement lands, the original is renamed to
/// `<input>.bak` and the edited text is written to `input`. Otherwise the
/// input is left untouched and no backup is created.
///
/// # Errors
///
/// Returns `Error::ReportUnreadable` if the report cannot be loaded,
/// `Error::FileNotFound` if the input is missing, `Error::BackupExists` if
/// `<input>.bak` is already present, or `Error::Io` on read/write failure.
pub fn apply(input: &Path, report_path: &Path) -> Result<ReplaceSummary, Error> {
    let report = Report::read(report_path)?;
    let content = match std::fs::read_to_string(input) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound { path: input.to_path_buf() });
        },
        Err(e) => return Err(Error::Io(e)),
        Ok(c) => c,
    };

    let mut lines = split_lines(&content);
    let mut summary = apply_entries(&mut lines, &report.entries);
    if summary.applied == 0 {
        return Ok(summary);
    }

    let backup = backup_path(input);
    if backup.try_exists()? {
        return Err(Error::BackupExists { path: backup });
    }
    std::fs::rename(input, &backup)?;
    std::fs::write(input, join_lines(&lines))?;
    info!(input = %input.display(), backup = %backup.display(), applied = summary.applied, "replacements written");

    summary.backup = Some(backup);
    return Ok(summary);
}

/// Splice every entry with a non-empty `replace` into `lines`, in entry order.
///
/// Entries on a line already edited are re-offset by the net length change of
/// earlier edits that end at or before their start. Entries whose line does
/// not exist are ignored; entries that overlap an earlier edit or whose span
/// no longer fits the line are skipped and counted.
pub fn apply_entries(lines: &mut [SourceLine], entries: &[MatchEntry]) -> ReplaceSummary {
    let mut edits: HashMap<usize, Vec<AppliedEdit>> = HashMap::new();
    let mut summary = ReplaceSummary::default();

    for entry in entries.iter().filter(|e| return !e.replace.is_empty()) {
        let Some(idx) = entry.line.checked_sub(1) else {
            debug!(line = entry.line, "line 0 does not exist, skipping");
            continue;
        };
        let Some(line) = lines.get_mut(idx) else {
            debug!(line = entry.line, "line out of range, skipping");
            continue;
        };
        let line_edits = edits.entry(idx).or_default();
        match splice_entry(line, line_edits, entry) {
            Some(edit) => {
                line_edits.push(edit);
                summary.applied = summary.applied.saturating_add(1);
            },
            None => summary.skipped = summary.skipped.saturating_add(1),
        }
    }

    return summary;
}

/// Replace one entry's span in `line`, returning the edit on success.
fn splice_entry(line: &mut SourceLine, prior: &[AppliedEdit], entry: &MatchEntry) -> Option<AppliedEdit> {
    let Some(end) = entry.position.checked_add(entry.length) else {
        warn!(line = entry.line, position = entry.position, "span overflows, skipping");
        return None;
    };
    if prior.iter().any(|e| return e.overlaps(entry.position, end)) {
        warn!(line = entry.line, position = entry.position, "span overlaps an earlier replacement, skipping");
        return None;
    }

    let (added, removed) = prior
        .iter()
        .filter(|e| return e.end <= entry.position)
        .fold((0_usize, 0_usize), |(added, removed), e| {
            return (
                added.saturating_add(e.inserted),
                removed.saturating_add(e.end.saturating_sub(e.start)),
            );
        });
    let Some(adjusted) = entry.position.checked_add(added).and_then(|p| return p.checked_sub(removed)) else {
        warn!(line = entry.line, position = entry.position, "span moved before line start, skipping");
        return None;
    };

    let Some(range) = char_range(&line.body, adjusted, entry.length) else {
        warn!(
            line = entry.line,
            position = entry.position,
            length = entry.length,
            "span exceeds the current line, skipping"
        );
        return None;
    };
    let (Some(prefix), Some(current), Some(suffix)) = (
        line.body.get(..range.start),
        line.body.get(range.clone()),
        line.body.get(range.end..),
    ) else {
        return None;
    };

    if current != entry.include {
        warn!(line = entry.line, expected = %entry.include, found = %current, "text at span changed since the scan");
    }
    debug!(line = entry.line, position = adjusted, replace = %entry.replace, "replacing");
    line.body = format!("{prefix}{}{suffix}", entry.replace);

    return Some(AppliedEdit { end, inserted: entry.replace.chars().count(), start: entry.position });
}

/// `<input>.bak`, next to the input.
pub fn backup_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".bak");
    return PathBuf::from(name);
}
