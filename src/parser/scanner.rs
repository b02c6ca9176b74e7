//! Line-by-line heading scanner.
//!
//! Classifies every line of a document as a fence delimiter, a structural
//! heading, or plain content. Fence state is threaded through the scan as a
//! value, so a heading-looking line inside a fenced code block is never
//! treated as structure.

use super::utils::{get_heading_level, is_fence_delimiter};

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Opens or closes a fenced code block (` ``` ` or `~~~`).
    FenceDelimiter,
    /// `# ` title line; `text` is everything after the marker.
    Level1Heading { text: &'a str },
    /// `## ` section line; `text` is everything after the marker.
    Level2Heading { text: &'a str },
    /// Any other ATX heading outside a code block.
    OtherHeading { level: usize },
    /// Ordinary text, blank lines, and everything inside a fence.
    Content,
}

/// Fenced-code-block state carried across lines.
///
/// Fences do not nest: every delimiter line toggles the state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FenceState {
    in_code_block: bool,
}

impl FenceState {
    /// Advance over one line.
    ///
    /// Returns the state for the next line and whether this line sits
    /// outside any code block (and is not itself a fence), i.e. whether it
    /// may be read as a heading.
    pub fn step(self, line: &str) -> (Self, bool) {
        if is_fence_delimiter(line) {
            return (
                Self {
                    in_code_block: !self.in_code_block,
                },
                false,
            );
        }
        (self, !self.in_code_block)
    }

    /// Advance over one line and classify it.
    pub fn classify(self, line: &str) -> (Self, LineKind<'_>) {
        let (next, structural) = self.step(line);
        if !structural {
            let kind = if next != self {
                LineKind::FenceDelimiter
            } else {
                LineKind::Content
            };
            return (next, kind);
        }

        let kind = if let Some(text) = line.strip_prefix("# ") {
            LineKind::Level1Heading { text }
        } else if let Some(text) = line.strip_prefix("## ") {
            LineKind::Level2Heading { text }
        } else if let Some(level) = get_heading_level(line) {
            LineKind::OtherHeading { level }
        } else {
            LineKind::Content
        };
        (next, kind)
    }
}

/// One classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    /// Zero-based line index.
    pub index: usize,
    /// Byte offset of the first character of the line.
    pub offset: usize,
    /// The line exactly as it appears in the source, without its `\n`.
    pub text: &'a str,
    pub kind: LineKind<'a>,
}

/// Scan a document line by line.
///
/// Lines are split on `\n` only, so a trailing newline yields a final empty
/// line and `\r` stays part of the line text. Joining the `text` of every
/// scanned line with `\n` reproduces the input.
pub fn scan_lines(content: &str) -> impl Iterator<Item = ScannedLine<'_>> {
    content
        .split('\n')
        .enumerate()
        .scan((FenceState::default(), 0), |(state, offset), (index, text)| {
            let (next, kind) = state.classify(text);
            let line = ScannedLine {
                index,
                offset: *offset,
                text,
                kind,
            };
            *state = next;
            *offset += text.len() + 1;
            Some(line)
        })
}
