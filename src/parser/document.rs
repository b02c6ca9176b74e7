//! Parsed document with its heading list and heading hierarchy.

use indextree::{Arena, NodeId};
use serde::Serialize;

/// A heading found in a markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: usize,
    /// Heading text with inline markup stripped
    pub text: String,
    /// Byte offset of the heading line in the source
    #[serde(skip)]
    pub offset: usize,
}

/// A markdown document and the headings it contains, in source order.
///
/// Headings inside fenced code blocks are not part of the list.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub headings: Vec<Heading>,
}

/// A heading together with the markdown that belongs to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionText<'a> {
    pub heading: &'a Heading,
    /// From the heading line up to the next heading of the same or a
    /// higher level, trailing whitespace removed.
    pub markdown: &'a str,
}

impl Document {
    pub fn new(content: String, headings: Vec<Heading>) -> Self {
        Self { content, headings }
    }

    /// Headings whose text contains `pattern`, ignoring case.
    pub fn filter_headings(&self, pattern: &str) -> Vec<&Heading> {
        let pattern = pattern.to_lowercase();
        self.headings
            .iter()
            .filter(|h| h.text.to_lowercase().contains(&pattern))
            .collect()
    }

    pub fn headings_at_level(&self, level: usize) -> Vec<&Heading> {
        self.headings.iter().filter(|h| h.level == level).collect()
    }

    /// Up to three headings that look like what the user meant by `query`.
    ///
    /// A heading qualifies when it contains the first three characters of
    /// the query, ignoring case.
    pub fn suggestions(&self, query: &str) -> Vec<&Heading> {
        let prefix: String = query.to_lowercase().chars().take(3).collect();
        self.headings
            .iter()
            .filter(|h| h.text.to_lowercase().contains(&prefix))
            .take(3)
            .collect()
    }

    /// Markdown of the section headed by `headings[index]`.
    pub fn section_at(&self, index: usize) -> Option<SectionText<'_>> {
        let heading = self.headings.get(index)?;
        let end = self.headings[index + 1..]
            .iter()
            .find(|h| h.level <= heading.level)
            .map_or(self.content.len(), |h| h.offset);

        Some(SectionText {
            heading,
            markdown: self.content[heading.offset..end].trim_end(),
        })
    }

    /// The first section whose heading matches `text`, ignoring case.
    pub fn find_section(&self, text: &str) -> Option<SectionText<'_>> {
        let wanted = text.to_lowercase();
        let index = self
            .headings
            .iter()
            .position(|h| h.text.to_lowercase() == wanted)?;
        self.section_at(index)
    }

    /// Every section at `level`, in document order.
    pub fn sections_at_level(&self, level: usize) -> Vec<SectionText<'_>> {
        self.headings
            .iter()
            .enumerate()
            .filter(|(_, h)| h.level == level)
            .filter_map(|(i, _)| self.section_at(i))
            .collect()
    }

    /// Build the heading hierarchy.
    pub fn build_tree(&self) -> HeadingTree {
        let mut arena = Arena::new();
        let mut roots = Vec::new();
        let mut stack: Vec<(usize, NodeId)> = Vec::new();

        for heading in &self.headings {
            while stack
                .last()
                .is_some_and(|(level, _)| *level >= heading.level)
            {
                stack.pop();
            }

            let node = arena.new_node(heading.clone());
            match stack.last() {
                Some((_, parent)) => parent.append(node, &mut arena),
                None => roots.push(node),
            }
            stack.push((heading.level, node));
        }

        HeadingTree { arena, roots }
    }
}

/// Headings arranged by nesting: each heading owns the deeper headings that
/// follow it until a heading of the same or a higher level.
#[derive(Debug, Clone)]
pub struct HeadingTree {
    arena: Arena<Heading>,
    roots: Vec<NodeId>,
}

impl HeadingTree {
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn heading(&self, id: NodeId) -> &Heading {
        self.arena[id].get()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Render the whole tree with box-drawing characters, one heading per line.
    pub fn render_box_tree(&self) -> String {
        let mut out = String::new();
        for (i, root) in self.roots.iter().enumerate() {
            let is_last = i == self.roots.len() - 1;
            self.render_node(*root, "", is_last, &mut out);
        }
        out
    }

    fn render_node(&self, id: NodeId, prefix: &str, is_last: bool, out: &mut String) {
        let connector = if is_last { "└── " } else { "├── " };
        let heading = self.heading(id);
        out.push_str(&format!(
            "{prefix}{connector}{} {}\n",
            "#".repeat(heading.level),
            heading.text
        ));

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children: Vec<NodeId> = self.children(id).collect();
        for (i, child) in children.iter().enumerate() {
            self.render_node(*child, &child_prefix, i == children.len() - 1, out);
        }
    }
}
