//! Pulling individual sections out of a document.

use super::fs::{ensure_dir, write_atomic};
use crate::error::{Error, Result};
use crate::parser::{Document, SectionText, slugify};
use std::path::{Path, PathBuf};

/// A section copied out of its document, heading line included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    pub heading_text: String,
    pub level: usize,
    pub markdown: String,
}

impl From<SectionText<'_>> for ExtractedSection {
    fn from(section: SectionText<'_>) -> Self {
        Self {
            heading_text: section.heading.text.clone(),
            level: section.heading.level,
            markdown: section.markdown.to_string(),
        }
    }
}

impl ExtractedSection {
    /// `{slug}.md`
    pub fn filename(&self) -> String {
        format!("{}.md", slugify(&self.heading_text))
    }

    /// `NN-{slug}.md`, numbered from 1.
    pub fn numbered_filename(&self, position: usize) -> String {
        format!("{position:02}-{}", self.filename())
    }

    /// Write the section as `filename` inside `dir`, creating `dir` if needed.
    pub fn write_to(&self, dir: &Path, filename: &str) -> Result<PathBuf> {
        ensure_dir(dir)?;
        let path = dir.join(filename);
        write_atomic(&path, &self.markdown)?;
        Ok(path)
    }
}

/// The section whose heading matches `heading`, ignoring case.
///
/// # Errors
///
/// Returns [`Error::SectionNotFound`] with up to three similar headings.
pub fn extract_section(doc: &Document, heading: &str) -> Result<ExtractedSection> {
    doc.find_section(heading)
        .map(ExtractedSection::from)
        .ok_or_else(|| Error::SectionNotFound {
            heading: heading.to_string(),
            suggestions: doc
                .suggestions(heading)
                .into_iter()
                .map(|h| h.text.clone())
                .collect(),
        })
}

/// Every section at `level`, in document order.
pub fn extract_all_sections(doc: &Document, level: usize) -> Vec<ExtractedSection> {
    doc.sections_at_level(level)
        .into_iter()
        .map(ExtractedSection::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    const DOC: &str = "# Guide\n\n## Installation\nsteps\n\n### Linux\napt\n\n## Usage\nrun it\n";

    #[test]
    fn test_extract_section_case_insensitive() {
        let doc = parse_markdown(DOC);
        let section = extract_section(&doc, "installation").unwrap();
        assert_eq!(section.heading_text, "Installation");
        assert_eq!(section.level, 2);
        assert_eq!(section.markdown, "## Installation\nsteps\n\n### Linux\napt");
        assert_eq!(section.filename(), "installation.md");
    }

    #[test]
    fn test_extract_section_suggests() {
        let doc = parse_markdown(DOC);
        match extract_section(&doc, "Install guide") {
            Err(Error::SectionNotFound { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["Installation".to_string()]);
            }
            other => panic!("expected SectionNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_all_sections() {
        let doc = parse_markdown(DOC);
        let sections = extract_all_sections(&doc, 2);
        let names: Vec<_> = sections.iter().map(|s| s.heading_text.as_str()).collect();
        assert_eq!(names, vec!["Installation", "Usage"]);
        assert_eq!(sections[1].numbered_filename(2), "02-usage.md");
        assert!(extract_all_sections(&doc, 5).is_empty());
    }

    #[test]
    fn test_write_to_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let doc = parse_markdown(DOC);
        let section = extract_section(&doc, "Usage").unwrap();

        let out = dir.path().join("sections");
        let path = section.write_to(&out, &section.filename()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "## Usage\nrun it");
    }
}
