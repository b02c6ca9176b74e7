//! # mdtree
//!
//! Split markdown documents into per-section files and put them back together.
//!
//! A document made of one `#` title followed by `##` sections is exploded
//! into one file per section, each promoted so its heading becomes `#`, plus
//! an `index.md` table of contents linking every section and sub-section.
//! Assembling that directory yields the original document again.
//!
//! ## Features
//!
//! - Code-fence-aware heading scanning and heading-level shifting
//! - Explode / assemble with lossless round trips
//! - Section extraction by heading text or level
//! - Heading lists, heading trees and tables of contents
//! - Local link checking, optionally following linked markdown files
//!
//! ## Example
//!
//! ```rust
//! use mdtree::sections::explode;
//!
//! let markdown = "# Guide\n\n## Install\nRun it.\n\n### Linux\napt\n\n## Usage\nUse it.\n";
//!
//! let exploded = explode("guide.md", markdown).unwrap();
//! assert_eq!(exploded.sections[0].filename, "install.md");
//! assert_eq!(exploded.sections[0].content, "# Install\nRun it.\n\n## Linux\napt\n");
//! assert!(exploded.index.contains("  - [Usage](./usage.md)"));
//! ```

/// Link checking for a markdown file and, optionally, the files it links to.
pub mod check;

/// Configuration module for persisting user preferences.
///
/// Provides defaults for the table-of-contents depth, the extraction level
/// and the heading list format.
pub mod config;

/// Error types shared by the parser and sections modules.
pub mod error;

/// Parser module for markdown documents.
///
/// Provides the line scanner, heading-level adjustment, slugs, link
/// extraction and the parsed heading list.
pub mod parser;

/// Section module for explode, assemble and extraction.
///
/// Everything that reads or writes section files lives here.
pub mod sections;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use parser::{Document, Heading, HeadingTree, parse_file, parse_markdown};
pub use sections::{Assembly, Exploded, assemble, explode};
