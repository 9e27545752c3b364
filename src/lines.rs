//! Line splitting and character-offset arithmetic shared by scan, replace, and check.

use std::ops::Range;

/// One line of a source file with its terminator kept aside, so a file can be
/// reassembled byte for byte after edits to the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line content without the terminator.
    pub body: String,
    /// `"\n"`, `"\r\n"`, or empty for an unterminated final line.
    pub terminator: &'static str,
}

/// Split file content into lines, keeping each line's terminator.
pub fn split_lines(content: &str) -> Vec<SourceLine> {
    return content
        .split_inclusive('\n')
        .map(|segment| {
            if let Some(body) = segment.strip_suffix("\r\n") {
                return SourceLine { body: body.to_string(), terminator: "\r\n" };
            }
            if let Some(body) = segment.strip_suffix('\n') {
                return SourceLine { body: body.to_string(), terminator: "\n" };
            }
            return SourceLine { body: segment.to_string(), terminator: "" };
        })
        .collect();
}

/// Reassemble lines produced by [`split_lines`].
pub fn join_lines(lines: &[SourceLine]) -> String {
    let capacity = lines
        .iter()
        .map(|l| return l.body.len().saturating_add(l.terminator.len()))
        .fold(0_usize, usize::saturating_add);
    let mut out = String::with_capacity(capacity);
    for line in lines {
        out.push_str(&line.body);
        out.push_str(line.terminator);
    }
    return out;
}

/// Byte index of the character at `char_idx`. The index one past the last
/// character maps to `s.len()`; anything further is `None`.
pub fn byte_index(s: &str, char_idx: usize) -> Option<usize> {
    return s
        .char_indices()
        .map(|(i, _)| return i)
        .chain(std::iter::once(s.len()))
        .nth(char_idx);
}

/// Convert a character span into a byte range of `s`.
/// Returns `None` when the span runs past the end of the string.
pub fn char_range(s: &str, position: usize, length: usize) -> Option<Range<usize>> {
    let end = position.checked_add(length)?;
    let start_byte = byte_index(s, position)?;
    let end_byte = byte_index(s, end)?;
    return Some(start_byte..end_byte);
}

/// Number of characters in `s` before byte offset `byte`.
pub fn char_count_before(s: &str, byte: usize) -> usize {
    return s.get(..byte).map_or(0, |prefix| return prefix.chars().count());
}
