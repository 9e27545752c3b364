use regex::Regex;

use crate::error::Error;
use crate::lines::char_count_before;
use crate::types::{Match, ScanMode};

/// One Cyrillic letter: the basic block plus both forms of "yo".
const CYRILLIC_LETTER: &str = "[а-яА-ЯёЁ]";

/// Finds Cyrillic text in single lines under a fixed [`ScanMode`].
/// The pattern is compiled once and reused for every line of a file.
#[derive(Debug)]
pub struct Scanner {
    /// Policy deciding how matches are grouped.
    mode: ScanMode,
    /// Compiled pattern for `mode`.
    pattern: Regex,
}

impl Scanner {
    /// Compile the pattern for `mode`.
    ///
    /// `Phrases` matches runs of letters joined by exactly one space.
    /// `WholeLine` matches from the first letter to the last; the optional
    /// tail lets a line with a single letter still produce a one-character match.
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` if the regex fails to compile.
    pub fn new(mode: ScanMode) -> Result<Self, Error> {
        let source = match mode {
            ScanMode::Phrases => format!("{CYRILLIC_LETTER}+(?: {CYRILLIC_LETTER}+)*"),
            ScanMode::WholeLine => format!("{CYRILLIC_LETTER}(?:.*{CYRILLIC_LETTER})?"),
        };
        return Ok(Self { mode, pattern: Regex::new(&source)? });
    }

    /// Scan one line (without its terminator) and return matches left to right.
    pub fn scan(&self, line: &str) -> Vec<Match> {
        let limit = match self.mode {
            ScanMode::Phrases => usize::MAX,
            ScanMode::WholeLine => 1,
        };
        return self
            .pattern
            .find_iter(line)
            .take(limit)
            .map(|m| {
                return Match {
                    length: m.as_str().chars().count(),
                    position: char_count_before(line, m.start()),
                    text: m.as_str().to_string(),
                };
            })
            .collect();
    }
}
