//! Utility functions for markdown line handling.
//!
//! Shared helper functions used across the parser and sections modules.

/// Deepest heading level markdown allows.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Shallowest heading level.
pub const MIN_HEADING_LEVEL: usize = 1;

/// Split an ATX heading line into its level and the remainder after the hashes.
///
/// A heading is 1-6 `#` characters at the very start of the line followed by
/// at least one whitespace character. The remainder keeps that whitespace so
/// the line can be rebuilt exactly with a different number of hashes.
///
/// # Examples
///
/// ```
/// # use mdtree::parser::utils::split_heading;
/// assert_eq!(split_heading("## Section"), Some((2, " Section")));
/// assert_eq!(split_heading("#NoSpace"), None);
/// assert_eq!(split_heading("  ## Indented"), None);
/// assert_eq!(split_heading("####### Too many"), None);
/// ```
pub fn split_heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&hashes) {
        return None;
    }

    let rest = &line[hashes..];
    match rest.chars().next() {
        Some(ch) if ch.is_whitespace() => Some((hashes, rest)),
        _ => None,
    }
}

/// Extract the heading level from a line of markdown text.
///
/// Returns `Some(level)` if the line is a valid heading (1-6 #'s followed by whitespace),
/// or `None` otherwise.
///
/// # Examples
///
/// ```
/// # use mdtree::parser::utils::get_heading_level;
/// assert_eq!(get_heading_level("# Title"), Some(1));
/// assert_eq!(get_heading_level("## Section"), Some(2));
/// assert_eq!(get_heading_level("not a heading"), None);
/// assert_eq!(get_heading_level("#NoSpace"), None);
/// ```
pub fn get_heading_level(line: &str) -> Option<usize> {
    split_heading(line).map(|(level, _)| level)
}

/// Whether a line opens or closes a fenced code block.
///
/// Leading and trailing whitespace is ignored; the fence marker is three
/// backticks or three tildes.
pub fn is_fence_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// The line break a document uses: `\r\n` when it contains one, `\n` otherwise.
pub fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") { "\r\n" } else { "\n" }
}
