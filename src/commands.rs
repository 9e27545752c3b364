//! Core CLI commands for cyrscan: scan (report or replace) and check.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::info;

use crate::config;
use crate::error;
use crate::freshness::{CheckResult, check_report};
use crate::replacer;
use crate::report;
use crate::types::{ReportFormat, ScanMode};

/// Switches accepted by `scan`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanFlags {
    /// Force whole-line mode.
    pub all_line: bool,
    /// Force the JSON report format.
    pub json: bool,
    /// Consume the report instead of producing it.
    pub replace: bool,
}

/// Report entries whose span no longer holds the recorded text.
///
/// # Errors
///
/// Returns errors from config loading, report reading, or input reading.
pub fn check(input: &Path, report_path: Option<&Path>) -> Result<ExitCode, error::Error> {
    ensure_input_exists(input)?;
    let config = config::Config::load(Path::new("."))?;
    let report_path = report_path.map_or_else(
        || return default_output_path(input, &config.suffix, ReportFormat::Json),
        Path::to_path_buf,
    );

    let results = check_report(input, &report_path)?;
    let mut stale_count = 0_usize;
    let mut broken_count = 0_usize;

    for (entry, result) in &results {
        match result {
            CheckResult::Broken(reason) => {
                broken_count = broken_count.saturating_add(1);
                println!("BROKEN  {}:{} ({reason})", entry.line, entry.position);
            },
            CheckResult::Fresh => {},
            CheckResult::Stale => {
                stale_count = stale_count.saturating_add(1);
                println!("STALE   {}:{} '{}'", entry.line, entry.position, entry.include);
            },
        }
    }

    if broken_count > 0 || stale_count > 0 {
        println!();
        println!("{broken_count} broken, {stale_count} stale");
        return Ok(ExitCode::from(1));
    }
    let total = results.len();
    println!("All {total} entries fresh");
    return Ok(ExitCode::SUCCESS);
}

/// `<dir>/<stem><suffix>.<ext>` for the given input and format.
pub fn default_output_path(input: &Path, suffix: &str, format: ReportFormat) -> PathBuf {
    let mut name = input.file_stem().map_or_else(OsString::new, std::ffi::OsStr::to_os_string);
    name.push(suffix);
    name.push(".");
    name.push(format.extension());
    return input.with_file_name(name);
}

/// Fail with `FileNotFound` before anything else touches the filesystem.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `input` does not exist.
fn ensure_input_exists(input: &Path) -> Result<(), error::Error> {
    if input.exists() {
        return Ok(());
    }
    return Err(error::Error::FileNotFound { path: input.to_path_buf() });
}

/// Apply a JSON report to `input` and print what happened.
///
/// # Errors
///
/// Returns errors from the replacer.
fn replace(input: &Path, report_path: &Path) -> Result<(), error::Error> {
    info!(input = %input.display(), report = %report_path.display(), "applying replacements");
    let summary = replacer::apply(input, report_path)?;
    for line in summary_lines(&summary) {
        println!("{line}");
    }
    return Ok(());
}

/// `"1 <one>"` or `"<n> <many>"`.
fn count_noun(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        return format!("1 {one}");
    }
    return format!("{n} {many}");
}

/// Stdout lines describing a replace run.
fn summary_lines(summary: &replacer::ReplaceSummary) -> Vec<String> {
    let mut lines = Vec::new();
    match &summary.backup {
        Some(backup) => lines.push(format!(
            "Applied {}. Backup: {}",
            count_noun(summary.applied, "replacement", "replacements"),
            backup.display()
        )),
        None => lines.push("No replacements to apply.".to_string()),
    }
    if summary.skipped > 0 {
        lines.push(format!("{} skipped", count_noun(summary.skipped, "entry", "entries")));
    }
    return lines;
}

/// Scan `input` and write a report, or with `replace` set, apply a report to it.
///
/// Mode and format come from `.cyrscan.toml` unless a flag forces them.
///
/// # Errors
///
/// Returns errors from config loading, scanning, report I/O, or replacement.
pub fn scan(input: &Path, output: Option<&Path>, flags: ScanFlags) -> Result<(), error::Error> {
    ensure_input_exists(input)?;
    let config = config::Config::load(Path::new("."))?;

    if flags.replace {
        let report_path = output.map_or_else(
            || return default_output_path(input, &config.suffix, ReportFormat::Json),
            Path::to_path_buf,
        );
        return replace(input, &report_path);
    }

    let mode = if flags.all_line { ScanMode::WholeLine } else { config.mode };
    let format = if flags.json { ReportFormat::Json } else { config.format };
    let output = output.map_or_else(
        || return default_output_path(input, &config.suffix, format),
        Path::to_path_buf,
    );

    info!(input = %input.display(), output = %output.display(), ?mode, ?format, "scanning");
    let report = report::generate(input, &output, mode, format)?;

    println!("Report saved: {}", output.display());
    println!("Mode: {}", mode.description());
    println!("{} entries", report.entries.len());
    return Ok(());
}
