//! Splitting documents into section files and joining them back.
//!
//! [`explode`] turns a document shaped as one `#` title followed by `##`
//! sections into one file per section plus an `index.md` table of contents.
//! [`assemble`] reads that index and rebuilds the document. For such
//! documents `assemble(explode(doc))` reproduces `doc` byte for byte.
//!
//! Concurrent runs against the same directory are not coordinated.

pub mod assemble;
pub mod explode;
pub mod extract;
pub mod fs;
pub mod index;

/// Name of the generated table of contents inside an exploded directory.
pub const INDEX_FILENAME: &str = "index.md";

pub use assemble::{Assembly, SectionRef, SkippedSection, assemble, assemble_to_file, section_references};
pub use explode::{
    Exploded, Section, SectionFile, explode, explode_file, source_name, split_sections,
    write_exploded,
};
pub use extract::{ExtractedSection, extract_all_sections, extract_section};
pub use index::{generate_index, generate_toc};
