//! Markdown parsing and document structure extraction.
//!
//! Two views of a document live here. The line [`scanner`] classifies raw
//! lines and is what the explode/assemble pipeline splits on, because it
//! keeps every byte of the source. [`parse_markdown`] produces the heading
//! list (inline markup stripped) that titles, tables of contents and section
//! extraction are built from; heading parsing is delegated to
//! `turbovault-parser` for code-block awareness.

pub mod adjust;
mod document;
pub mod links;
pub mod scanner;
pub mod slug;
pub mod utils;

pub use adjust::adjust_heading_levels;
pub use document::{Document, Heading, HeadingTree, SectionText};
pub use links::{LinkTarget, TocEntry, extract_toc_entries};
pub use scanner::{FenceState, LineKind, ScannedLine, scan_lines};
pub use slug::slugify;

use crate::error::{Error, Result};
use std::path::Path;

/// Parse a markdown file and extract its structure.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse_markdown(&content))
}

/// Parse markdown content and extract headings with byte offsets.
pub fn parse_markdown(content: &str) -> Document {
    let headings = turbovault_parser::parse_headings(content)
        .into_iter()
        .map(|h| Heading {
            level: h.level as usize,
            text: h.text,
            offset: h.position.offset,
        })
        .collect();

    Document::new(content.to_string(), headings)
}
