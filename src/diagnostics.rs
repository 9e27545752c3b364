use crate::config::CONFIG_FILE;
use crate::error::Error;

/// ANSI bold for headings.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened, and
/// where a fix exists, how to apply it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::BackupExists { path } => render_backup_exists(path),
        Error::FileNotFound { path } => format!("\
# Error: File Not Found

`{}` does not exist.
", path.display()),
        Error::ReportUnreadable { path, reason } => render_report_unreadable(path, reason),
        Error::TomlDe(err) => format!("\
# Error: Invalid Config

`{CONFIG_FILE}` could not be parsed: {err}

## Fix

Supported keys are `mode` (`phrases` or `whole_line`), `format` (`text` or `json`), and `suffix`.
"),
        _ => render_generic(e),
    }
}

/// Variants without a dedicated fix section.
fn render_generic(e: &Error) -> String {
    match e {
        Error::Io(err) => format!("\
# Error: I/O

{err}
"),
        Error::JsonSer(err) => format!("\
# Error: JSON Serialization

{err}
"),
        Error::Pattern(err) => format!("\
# Error: Invalid Pattern

{err}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_backup_exists(path: &std::path::Path) -> String {
    format!("\
# Error: Backup Exists

`{}` already exists, so the original cannot be archived. Nothing was changed.

## Fix

Move or delete the old backup, then run the replace again.
", path.display())
}

fn render_report_unreadable(path: &std::path::Path, reason: &str) -> String {
    format!("\
# Error: Report Unreadable

`{}` could not be loaded: {reason}

## Fix

Generate a JSON report first, fill in the `replace` fields, then apply it:

    cyrscan scan <input_file> --json
    cyrscan scan <input_file> --replace
", path.display())
}
