//! Error types for explode/assemble operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while splitting or reassembling a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No sections found at level 2 in {source_name}")]
    NoSections { source_name: String },

    #[error("index.md not found in {}", .dir.display())]
    IndexNotFound { dir: PathBuf },

    #[error("No main title found in index.md")]
    NoMainTitle,

    #[error("No section files found in TOC")]
    NoSectionFiles,

    #[error("Section \"{heading}\" not found{}", format_suggestions(.suggestions))]
    SectionNotFound {
        heading: String,
        suggestions: Vec<String>,
    },
}

impl Error {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let quoted: Vec<String> = suggestions.iter().map(|s| format!("\"{s}\"")).collect();
    format!(" (did you mean {}?)", quoted.join(", "))
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_not_found_lists_suggestions() {
        let err = Error::SectionNotFound {
            heading: "Instal".to_string(),
            suggestions: vec!["Installation".to_string(), "Install Notes".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Section \"Instal\" not found (did you mean \"Installation\", \"Install Notes\"?)"
        );
    }

    #[test]
    fn test_section_not_found_without_suggestions() {
        let err = Error::SectionNotFound {
            heading: "Zzz".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "Section \"Zzz\" not found");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = Error::io(
            "docs/missing.md",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("docs/missing.md"));
        assert!(err.to_string().contains("gone"));
    }
}
