//! Report building and persistence: one in-memory `Report`, two serializers.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::lines::split_lines;
use crate::scanner::Scanner;
use crate::types::{ReportFormat, ScanMode};

/// Width of the rule under the text report header.
const RULE_WIDTH: usize = 60;

/// A single located span of Cyrillic text, plus the user's requested replacement.
/// Field order is the key order of every JSON entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEntry {
    /// One-based line number within the source file.
    pub line: usize,
    /// Zero-based character offset within the line.
    pub position: usize,
    /// Character count of the matched text.
    pub length: usize,
    /// The matched text, for human review.
    pub include: String,
    /// Replacement text; empty means "leave as is".
    #[serde(default)]
    pub replace: String,
}

/// Every entry found in one scan. Entries stay in discovery order: file
/// order first, then left to right within a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The ordered list of entries.
    #[serde(default)]
    pub entries: Vec<MatchEntry>,
    /// Base name of the scanned file.
    pub filename: String,
    /// Scan policy that produced every entry.
    pub mode: ScanMode,
}

impl Report {
    /// Scan `content` line by line and collect every match as an entry.
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` if the scanner cannot be built.
    pub fn build(filename: &str, content: &str, mode: ScanMode) -> Result<Self, Error> {
        let scanner = Scanner::new(mode)?;
        let mut entries = Vec::new();

        for (idx, line) in split_lines(content).iter().enumerate() {
            let line_no = idx.saturating_add(1);
            for found in scanner.scan(&line.body) {
                debug!(line = line_no, position = found.position, text = %found.text, "match");
                entries.push(MatchEntry {
                    line: line_no,
                    position: found.position,
                    length: found.length,
                    include: found.text,
                    replace: String::new(),
                });
            }
        }

        return Ok(Self { entries, filename: filename.to_string(), mode });
    }

    /// Read `input` as UTF-8 and build its report.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileNotFound` if `input` is missing, `Error::Io` for
    /// other read failures (including invalid UTF-8), or `Error::Pattern`.
    pub fn from_file(input: &Path, mode: ScanMode) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(input) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound { path: input.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        let filename = input
            .file_name()
            .map_or_else(|| return input.display().to_string(), |n| return n.to_string_lossy().into_owned());
        return Self::build(&filename, &content, mode);
    }

    /// Parse a JSON report.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the content is not a valid report.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        return serde_json::from_str(content);
    }

    /// Read and parse a JSON report from disk.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReportUnreadable` if the file is missing, unreadable,
    /// or not a valid report.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            let reason = if e.kind() == std::io::ErrorKind::NotFound {
                "file not found".to_string()
            } else {
                e.to_string()
            };
            return Error::ReportUnreadable { path: path.to_path_buf(), reason };
        })?;
        return Self::parse(&content).map_err(|e| {
            return Error::ReportUnreadable { path: path.to_path_buf(), reason: e.to_string() };
        });
    }

    /// Render the human-readable listing.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Cyrillic content report for file: {}", self.filename);
        let _ = writeln!(out, "Mode: {}", self.mode.description());
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push_str("\n\n");
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "Line {}, position {}: '{}'",
                entry.line,
                entry.position,
                escape_control_chars(&entry.include)
            );
        }
        return out;
    }

    /// Render the JSON document with one compact entry per line, so the file
    /// diffs cleanly and each entry line parses on its own.
    ///
    /// # Errors
    ///
    /// Returns `Error::JsonSer` if any value fails to serialize.
    pub fn render_json(&self) -> Result<String, Error> {
        let mut out = String::from("{\n");
        let _ = writeln!(out, "\"filename\": {},", serde_json::to_string(&self.filename)?);
        let _ = writeln!(out, "\"mode\": {},", serde_json::to_string(&self.mode)?);
        out.push_str("\"entries\": [\n");
        let rendered = self
            .entries
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        if !rendered.is_empty() {
            out.push_str(&rendered.join(",\n"));
            out.push('\n');
        }
        out.push_str("]\n}\n");
        return Ok(out);
    }

    /// Serialize in the requested format.
    ///
    /// # Errors
    ///
    /// Returns `Error::JsonSer` if JSON serialization fails.
    pub fn serialize(&self, format: ReportFormat) -> Result<String, Error> {
        return match format {
            ReportFormat::Json => self.render_json(),
            ReportFormat::Text => Ok(self.render_text()),
        };
    }

    /// Write the report to disk in the requested format.
    ///
    /// # Errors
    ///
    /// Returns `Error::JsonSer` if serialization fails,
    /// or `Error::Io` if the file cannot be written.
    pub fn write(&self, path: &Path, format: ReportFormat) -> Result<(), Error> {
        let content = self.serialize(format)?;
        std::fs::write(path, content)?;
        return Ok(());
    }
}

/// Escape newline, tab, and carriage return so each entry stays on one line.
fn escape_control_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    return out;
}

/// Scan `input` and write its report to `output`.
///
/// # Errors
///
/// Returns errors from reading the input, scanning, or writing the report.
pub fn generate(input: &Path, output: &Path, mode: ScanMode, format: ReportFormat) -> Result<Report, Error> {
    let report = Report::from_file(input, mode)?;
    report.write(output, format)?;
    return Ok(report);
}
