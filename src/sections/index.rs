//! Table-of-contents generation for exploded documents and for `toc`.

use super::explode::SectionFile;
use crate::parser::utils::line_ending;
use crate::parser::{Document, Heading, LineKind, scan_lines, slugify};

const FALLBACK_TITLE: &str = "Table of Contents";

/// Build `index.md` for a set of section files.
///
/// The title is the first `# ` line of `content`, taken verbatim. Every
/// section file gets one link, in order; when the document has a title,
/// deeper headings inside a section link into its file by anchor. The index
/// uses the same line break as `content`.
pub fn generate_index(doc: &Document, content: &str, files: &[SectionFile]) -> String {
    let title = scan_lines(content).find_map(|line| match line.kind {
        LineKind::Level1Heading { text } => Some(text.strip_suffix('\r').unwrap_or(text)),
        _ => None,
    });

    let mut lines = index_header(title.unwrap_or(FALLBACK_TITLE));
    for file in files {
        let (label, nested) = section_headings(doc, file);
        lines.push(format!(
            "  - [{}](./{})",
            escape_link_text(&label),
            file.filename
        ));

        if title.is_none() {
            continue;
        }
        for heading in nested {
            if heading.level <= 2 {
                log::warn!(
                    "heading {:?} inside section {} is not a section of its own",
                    heading.text,
                    file.filename
                );
                continue;
            }
            lines.push(format!(
                "{}- [{}](./{}#{})",
                "  ".repeat(heading.level - 1),
                escape_link_text(&heading.text),
                file.filename,
                slugify(&heading.text)
            ));
        }
    }

    let eol = line_ending(content);
    let mut index = lines.join(eol);
    index.push_str(eol);
    index
}

fn index_header(title: &str) -> Vec<String> {
    vec![
        format!("# {title}"),
        String::new(),
        "## Table of Contents".to_string(),
        String::new(),
        format!("- [{}](#table-of-contents)", escape_link_text(title.trim())),
    ]
}

/// The display text of a section and the parsed headings nested in it.
///
/// Sections are matched to parsed headings by byte position, so inline
/// markup, trailing spaces or `\r` in the heading line do not matter.
fn section_headings<'d>(doc: &'d Document, file: &SectionFile) -> (String, Vec<&'d Heading>) {
    let span = &file.source_span;
    let label = doc
        .headings
        .iter()
        .find(|h| h.offset == span.start && h.level == 2)
        .map_or_else(|| file.heading_text.trim().to_string(), |h| h.text.clone());
    let nested = doc
        .headings
        .iter()
        .filter(|h| h.offset > span.start && h.offset < span.end)
        .collect();
    (label, nested)
}

/// Backslash-escape characters that would change how link text parses.
fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']' | '`' | '*' | '_' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A nested list of anchor links for every heading up to `max_level`.
///
/// Returns `None` when no heading qualifies.
pub fn generate_toc(doc: &Document, max_level: usize) -> Option<String> {
    let entries: Vec<String> = doc
        .headings
        .iter()
        .filter(|h| h.level <= max_level)
        .map(|h| {
            format!(
                "{}- [{}](#{})",
                "  ".repeat(h.level - 1),
                h.text,
                slugify(&h.text)
            )
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries.join("\n"))
    }
}
