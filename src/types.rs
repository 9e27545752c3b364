/// Core domain types for cyrscan matches, scan modes, and report formats.
use serde::{Deserialize, Serialize};

/// A located run of Cyrillic text within one line.
/// Offsets count characters, not bytes, so they survive a round trip through
/// any UTF-8 aware editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Number of characters in the matched text.
    pub length: usize,
    /// Zero-based character offset of the match within its line.
    pub position: usize,
    /// The matched text itself.
    pub text: String,
}

/// Output format of a generated report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// JSON document that the replacer can consume.
    Json,
    /// Human-readable listing, one entry per line.
    #[default]
    Text,
}

impl ReportFormat {
    /// File extension used for default output paths.
    pub const fn extension(self) -> &'static str {
        return match self {
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        };
    }
}

/// Matching policy applied to every line of a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Cyrillic words, with words separated by a single space merged.
    #[default]
    Phrases,
    /// One span from the first to the last Cyrillic letter of the line.
    WholeLine,
}

impl ScanMode {
    /// Human-readable description printed in text reports and summaries.
    pub const fn description(self) -> &'static str {
        return match self {
            ScanMode::Phrases => "separate phrases",
            ScanMode::WholeLine => "whole line between Cyrillic characters",
        };
    }
}
