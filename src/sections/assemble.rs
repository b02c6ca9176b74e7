//! Section joiner: rebuild one document from `index.md` and its section files.

use super::INDEX_FILENAME;
use super::fs::{read_to_string, write_atomic};
use crate::error::{Error, Result};
use crate::parser::utils::line_ending;
use crate::parser::{LineKind, adjust_heading_levels, extract_toc_entries, scan_lines};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

/// List depth of a section link in the index: nested one level under the
/// title item. Deeper links are sub-section anchors.
pub const SECTION_LINK_DEPTH: usize = 2;

/// A section file referenced from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRef {
    /// Path relative to the index directory
    pub filename: String,
    /// Link text in the index
    pub title: String,
}

/// A referenced section that could not be read.
#[derive(Debug)]
pub struct SkippedSection {
    pub section: SectionRef,
    pub error: Error,
}

/// A reassembled document.
#[derive(Debug)]
pub struct Assembly {
    pub title: String,
    pub content: String,
    pub included: Vec<SectionRef>,
    pub skipped: Vec<SkippedSection>,
}

/// Section files listed in an index, in order, each file once.
///
/// Only `./`-relative links sitting at [`SECTION_LINK_DEPTH`] count; the
/// title link above them and sub-section anchors below them do not.
pub fn section_references(index: &str) -> Vec<SectionRef> {
    let mut seen = HashSet::new();
    extract_toc_entries(index)
        .into_iter()
        .filter(|entry| entry.depth == SECTION_LINK_DEPTH)
        .filter_map(|entry| {
            let filename = entry.local_file()?;
            seen.insert(filename.clone()).then(|| SectionRef {
                filename,
                title: entry.text,
            })
        })
        .collect()
}

/// Text of the first `# ` line of an index, verbatim apart from a
/// trailing `\r`.
fn index_title(index: &str) -> Option<String> {
    scan_lines(index).find_map(|line| match line.kind {
        LineKind::Level1Heading { text } => {
            Some(text.strip_suffix('\r').unwrap_or(text).to_string())
        }
        _ => None,
    })
}

/// Rebuild the document exploded into `input_dir`.
///
/// Section files that cannot be read are logged, listed in
/// [`Assembly::skipped`] and left out.
///
/// # Errors
///
/// Fails when `index.md` is missing or unreadable, has no level-1 heading,
/// or references no section files.
pub fn assemble(input_dir: &Path) -> Result<Assembly> {
    let index_path = input_dir.join(INDEX_FILENAME);
    let index = std::fs::read_to_string(&index_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::IndexNotFound {
            dir: input_dir.to_path_buf(),
        },
        _ => Error::io(&index_path, e),
    })?;

    let title = index_title(&index).ok_or(Error::NoMainTitle)?;

    let references = section_references(&index);
    if references.is_empty() {
        return Err(Error::NoSectionFiles);
    }

    let eol = line_ending(&index);
    let mut content = format!("# {title}{eol}");
    let mut included = Vec::new();
    let mut skipped = Vec::new();

    for section in references {
        match read_to_string(&input_dir.join(&section.filename)) {
            Ok(text) => {
                // In CRLF input the previous section already ends with `\r`.
                content.push_str(if content.ends_with('\r') { "\n" } else { eol });
                content.push_str(&adjust_heading_levels(&text, 1));
                included.push(section);
            }
            Err(error) => {
                log::warn!("could not read {}, skipping: {error}", section.filename);
                skipped.push(SkippedSection { section, error });
            }
        }
    }

    Ok(Assembly {
        title,
        content,
        included,
        skipped,
    })
}

/// Assemble `input_dir` and write the document to `output_file`.
pub fn assemble_to_file(input_dir: &Path, output_file: &Path) -> Result<Assembly> {
    let assembly = assemble(input_dir)?;
    write_atomic(output_file, &assembly.content)?;
    Ok(assembly)
}
