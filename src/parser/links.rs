//! Link extraction.
//!
//! Walks the parsed markdown event stream instead of matching text, so a
//! link's list nesting depth comes from the document structure rather than
//! from how many spaces precede its bullet.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;

/// The different types of link targets supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Internal anchor link to a heading in the current document (e.g., `#installation`)
    Anchor(String),

    /// Relative file path, optionally with an anchor (e.g., `./docs/api.md#usage`)
    RelativeFile {
        path: PathBuf,
        anchor: Option<String>,
    },

    /// External URL (e.g., `https://example.com`)
    External(String),

    /// E-mail address, bare or as a `mailto:` link
    Email(String),
}

fn is_email(dest: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap())
        .is_match(dest)
}

impl LinkTarget {
    /// Classify a link destination as written in the markdown source.
    pub fn from_destination(dest: &str) -> Self {
        if let Some(anchor) = dest.strip_prefix('#') {
            return LinkTarget::Anchor(anchor.to_string());
        }
        if let Some(address) = dest.strip_prefix("mailto:") {
            return LinkTarget::Email(address.to_string());
        }
        if is_email(dest) {
            return LinkTarget::Email(dest.to_string());
        }
        if dest.contains("://") {
            return LinkTarget::External(dest.to_string());
        }
        match dest.split_once('#') {
            Some((path, anchor)) => LinkTarget::RelativeFile {
                path: PathBuf::from(path),
                anchor: Some(anchor.to_string()),
            },
            None => LinkTarget::RelativeFile {
                path: PathBuf::from(dest),
                anchor: None,
            },
        }
    }

    /// Get a string representation of the link target for display
    pub fn as_str(&self) -> String {
        match self {
            LinkTarget::Anchor(a) => format!("#{a}"),
            LinkTarget::RelativeFile { path, anchor } => match anchor {
                Some(a) => format!("{}#{a}", path.display()),
                None => path.display().to_string(),
            },
            LinkTarget::External(url) => url.clone(),
            LinkTarget::Email(address) => format!("mailto:{address}"),
        }
    }
}

/// A link found in a markdown list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Display text of the link
    pub text: String,
    pub target: LinkTarget,
    /// List nesting depth of the item holding the link; 0 outside any list.
    pub depth: usize,
}

impl TocEntry {
    /// The file a `./`-relative link points at, without the `./` prefix.
    pub fn local_file(&self) -> Option<String> {
        let LinkTarget::RelativeFile { path, .. } = &self.target else {
            return None;
        };
        let file = path.strip_prefix(".").ok()?;
        if file.as_os_str().is_empty() {
            return None;
        }
        Some(file.to_string_lossy().into_owned())
    }
}

/// Extract every link from markdown content with its list depth.
///
/// Links inside code blocks and inline code are not links and are skipped.
pub fn extract_toc_entries(content: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<(String, usize, String)> = None;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::List(_)) => depth += 1,
            Event::End(TagEnd::List(_)) => depth = depth.saturating_sub(1),
            Event::Start(Tag::Link { dest_url, .. }) => {
                current = Some((dest_url.to_string(), depth, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, label)) = current.as_mut() {
                    label.push_str(&text);
                }
            }
            Event::End(TagEnd::Link) => {
                if let Some((dest, depth, text)) = current.take() {
                    entries.push(TocEntry {
                        text,
                        target: LinkTarget::from_destination(&dest),
                        depth,
                    });
                }
            }
            _ => {}
        }
    }

    entries
}

/// Every distinct link destination in a document, inline links first in
/// source order, then reference definitions in source order.
///
/// Definitions count even when nothing refers to them. Empty destinations
/// are dropped.
pub fn extract_link_targets(content: &str) -> Vec<LinkTarget> {
    let mut parser = Parser::new(content);
    let mut destinations: Vec<String> = parser
        .by_ref()
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) => Some(dest_url.to_string()),
            _ => None,
        })
        .collect();

    let mut definitions: Vec<_> = parser.reference_definitions().iter().collect();
    definitions.sort_by_key(|(_, def)| def.span.start);
    destinations.extend(definitions.into_iter().map(|(_, def)| def.dest.to_string()));

    let mut seen = HashSet::new();
    destinations
        .into_iter()
        .filter(|dest| !dest.is_empty() && seen.insert(dest.clone()))
        .map(|dest| LinkTarget::from_destination(&dest))
        .collect()
}
