//! Section splitter: one markdown document in, one file per `##` section out.

use super::fs::{ensure_dir, read_to_string, write_atomic};
use super::index::generate_index;
use super::INDEX_FILENAME;
use crate::error::{Error, Result};
use crate::parser::{LineKind, ScannedLine, adjust_heading_levels, parse_markdown, scan_lines, slugify};
use std::collections::HashSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// A contiguous run of lines headed by a `## ` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Raw text after `## `
    pub heading_text: &'a str,
    /// Line index of the `## ` line
    pub start_line: usize,
    /// Last line index belonging to the section
    pub end_line: usize,
    /// Byte range of the section in the source, heading line included
    pub span: Range<usize>,
    /// Lines after the heading, verbatim
    pub body_lines: Vec<&'a str>,
}

/// One section rendered as a standalone file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFile {
    pub heading_text: String,
    pub filename: String,
    pub content: String,
    /// Where the section came from in the source document
    pub source_span: Range<usize>,
}

impl SectionFile {
    /// Promote the section heading to `#` and lift every nested heading one level.
    pub fn from_section(section: &Section<'_>) -> Self {
        let title = format!("# {}", section.heading_text);
        let content = if section.body_lines.is_empty() {
            title
        } else {
            let body = adjust_heading_levels(&section.body_lines.join("\n"), -1);
            format!("{title}\n{body}")
        };

        Self {
            heading_text: section.heading_text.to_string(),
            filename: format!("{}.md", slugify(section.heading_text)),
            content,
            source_span: section.span.clone(),
        }
    }
}

/// The result of exploding a document, before anything touches disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exploded {
    pub sections: Vec<SectionFile>,
    /// Contents of `index.md`
    pub index: String,
}

#[derive(Default)]
struct SplitState<'a> {
    sections: Vec<Section<'a>>,
    current: Option<Section<'a>>,
}

impl<'a> SplitState<'a> {
    fn close(&mut self, end_line: usize) {
        if let Some(mut section) = self.current.take() {
            section.end_line = end_line;
            self.sections.push(section);
        }
    }

    fn push(mut self, line: ScannedLine<'a>) -> Self {
        match line.kind {
            LineKind::Level1Heading { .. } => {
                self.close(line.index.saturating_sub(1));
            }
            LineKind::Level2Heading { text } => {
                self.close(line.index.saturating_sub(1));
                log::debug!("section {:?} opens at line {}", text, line.index);
                self.current = Some(Section {
                    heading_text: text,
                    start_line: line.index,
                    end_line: line.index,
                    span: line.offset..line.offset + line.text.len(),
                    body_lines: Vec::new(),
                });
            }
            _ => {
                if let Some(section) = self.current.as_mut() {
                    section.body_lines.push(line.text);
                    section.span.end = line.offset + line.text.len();
                }
            }
        }
        self
    }

    fn finish(mut self, last_line: usize) -> Vec<Section<'a>> {
        self.close(last_line);
        self.sections
    }
}

/// Partition a document into its `##` sections.
///
/// Content before the first `##` heading and anything following a `# `
/// heading up to the next `##` belongs to no section and is dropped.
pub fn split_sections(content: &str) -> Vec<Section<'_>> {
    let last_line = content.split('\n').count() - 1;
    scan_lines(content)
        .fold(SplitState::default(), SplitState::push)
        .finish(last_line)
}

/// Split a document into section files and build its index.
///
/// # Errors
///
/// Returns [`Error::NoSections`] when the document has no `##` heading.
pub fn explode(source_name: &str, content: &str) -> Result<Exploded> {
    let sections = split_sections(content);
    if sections.is_empty() {
        return Err(Error::NoSections {
            source_name: source_name.to_string(),
        });
    }

    let files: Vec<SectionFile> = sections.iter().map(SectionFile::from_section).collect();

    let mut seen = HashSet::new();
    for file in &files {
        if file.filename == ".md" {
            log::warn!("heading {:?} has an empty slug", file.heading_text);
        }
        if !seen.insert(file.filename.as_str()) {
            log::warn!(
                "{} is produced by more than one section; the later one wins",
                file.filename
            );
        }
    }

    let doc = parse_markdown(content);
    let index = generate_index(&doc, content, &files);

    Ok(Exploded {
        sections: files,
        index,
    })
}

/// Write every section file, then `index.md`, into `output_dir`.
///
/// The directory is created when missing. Files are written one at a time
/// in document order and the first failure aborts the rest.
pub fn write_exploded(exploded: &Exploded, output_dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(output_dir)?;

    let mut written = Vec::with_capacity(exploded.sections.len() + 1);
    for file in &exploded.sections {
        let path = output_dir.join(&file.filename);
        write_atomic(&path, &file.content)?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }

    let index_path = output_dir.join(INDEX_FILENAME);
    write_atomic(&index_path, &exploded.index)?;
    written.push(index_path);

    Ok(written)
}

/// The name a source file is reported under: its file name, or the whole
/// path when it has none.
pub fn source_name(source: &Path) -> String {
    source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string())
}

/// Read `source`, explode it and write the result into `output_dir`.
///
/// Nothing is written when the source cannot be read or has no sections.
pub fn explode_file(source: &Path, output_dir: &Path) -> Result<Exploded> {
    let content = read_to_string(source)?;
    let exploded = explode(&source_name(source), &content)?;
    write_exploded(&exploded, output_dir)?;
    Ok(exploded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCENARIO_A: &str = "# Title\n\n## Alpha\nBody A\n\n### Sub\nNested\n\n## Beta\nBody B\n";

    #[test]
    fn test_split_sections_boundaries() {
        let sections = split_sections(SCENARIO_A);
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].heading_text, "Alpha");
        assert_eq!(sections[0].start_line, 2);
        assert_eq!(sections[0].end_line, 7);
        assert_eq!(&SCENARIO_A[sections[0].span.clone()], "## Alpha\nBody A\n\n### Sub\nNested\n");
        assert_eq!(sections[0].body_lines, vec!["Body A", "", "### Sub", "Nested", ""]);

        assert_eq!(sections[1].heading_text, "Beta");
        assert_eq!(sections[1].start_line, 8);
        assert_eq!(sections[1].end_line, 10);
        assert_eq!(sections[1].body_lines, vec!["Body B", ""]);
    }

    #[test]
    fn test_section_files_flatten_headings() {
        let exploded = explode("doc.md", SCENARIO_A).unwrap();
        assert_eq!(exploded.sections.len(), 2);

        assert_eq!(exploded.sections[0].filename, "alpha.md");
        assert_eq!(
            exploded.sections[0].content,
            "# Alpha\nBody A\n\n## Sub\nNested\n"
        );
        assert_eq!(exploded.sections[1].filename, "beta.md");
        assert_eq!(exploded.sections[1].content, "# Beta\nBody B\n");
    }

    #[test]
    fn test_index_for_scenario_a() {
        let exploded = explode("doc.md", SCENARIO_A).unwrap();
        assert_eq!(
            exploded.index,
            "# Title\n\n## Table of Contents\n\n\
             - [Title](#table-of-contents)\n\
             \x20 - [Alpha](./alpha.md)\n\
             \x20   - [Sub](./alpha.md#sub)\n\
             \x20 - [Beta](./beta.md)\n"
        );
    }

    #[test]
    fn test_fenced_heading_stays_in_section() {
        let md = "# T\n\n## Real\n```md\n## Fake Heading\n### Also fake\n```\n";
        let exploded = explode("doc.md", md).unwrap();
        assert_eq!(exploded.sections.len(), 1);
        assert_eq!(
            exploded.sections[0].content,
            "# Real\n```md\n## Fake Heading\n### Also fake\n```\n"
        );
    }

    #[test]
    fn test_level_one_heading_closes_section() {
        let md = "# One\n## A\na\n# Two\ndropped\n## B\nb";
        let sections = split_sections(md);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].body_lines, vec!["a"]);
        assert_eq!(sections[0].end_line, 2);
        assert_eq!(sections[1].body_lines, vec!["b"]);
    }

    #[test]
    fn test_heading_without_body() {
        let exploded = explode("doc.md", "# T\n\n## Last").unwrap();
        assert_eq!(exploded.sections[0].content, "# Last");
    }

    #[test]
    fn test_no_sections_is_an_error() {
        let err = explode("flat.md", "# Title\n\nJust text\n### Deep\n").unwrap_err();
        assert!(matches!(err, Error::NoSections { ref source_name } if source_name == "flat.md"));
    }

    #[test]
    fn test_deep_headings_are_clamped() {
        let md = "## S\n###### Six\n";
        let exploded = explode("doc.md", md).unwrap();
        assert_eq!(exploded.sections[0].content, "# S\n##### Six\n");
    }

    #[test]
    fn test_explode_file_writes_everything() {
        let src_dir = tempfile::tempdir().unwrap();
        let source = src_dir.path().join("doc.md");
        std::fs::write(&source, SCENARIO_A).unwrap();

        let out = src_dir.path().join("out").join("nested");
        let exploded = explode_file(&source, &out).unwrap();

        assert_eq!(exploded.sections.len(), 2);
        assert_eq!(
            std::fs::read_to_string(out.join("alpha.md")).unwrap(),
            "# Alpha\nBody A\n\n## Sub\nNested\n"
        );
        assert!(out.join("beta.md").is_file());
        assert_eq!(
            std::fs::read_to_string(out.join(INDEX_FILENAME)).unwrap(),
            exploded.index
        );
    }

    #[test]
    fn test_explode_file_without_sections_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("flat.md");
        std::fs::write(&source, "# Only a title\n").unwrap();

        let out = dir.path().join("out");
        assert!(explode_file(&source, &out).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_source_name_is_file_name() {
        assert_eq!(source_name(Path::new("docs/guide.md")), "guide.md");
        assert_eq!(source_name(Path::new("/")), "/");
    }

    #[test]
    fn test_explode_file_unreadable_source() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let err = explode_file(&dir.path().join("missing.md"), &out).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!out.exists());
    }
}
