//! Link checking for markdown files.
//!
//! Relative links are resolved against the directory of the file that
//! contains them and must point at something that exists. With recursion
//! enabled, linked markdown files are checked too, each file at most once.
//! Anchors, e-mail addresses and external URLs are reported but not fetched.

use crate::error::{Error, Result};
use crate::parser::links::{LinkTarget, extract_link_targets};
use crate::sections::fs::read_to_string;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Outcome of checking one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// The target file or directory exists
    Found,
    /// The target path does not exist
    Missing,
    /// E-mail link, not checked
    Email,
    /// Network URL, not checked
    External,
}

impl LinkStatus {
    pub fn is_broken(&self) -> bool {
        matches!(self, LinkStatus::Missing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedLink {
    pub target: LinkTarget,
    pub status: LinkStatus,
}

/// The links of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Number of distinct link destinations, anchors included
    pub total: usize,
    /// Checked links in source order; in-document anchors are left out
    pub links: Vec<CheckedLink>,
}

impl FileReport {
    pub fn broken(&self) -> impl Iterator<Item = &CheckedLink> {
        self.links.iter().filter(|l| l.status.is_broken())
    }
}

/// Check the links of `path`, following linked `.md` files when `recursive`.
///
/// Reports come back in visiting order: a file first, then the files it
/// links to, depth first.
///
/// # Errors
///
/// Fails when a file to check cannot be read.
pub fn check_links(path: &Path, recursive: bool) -> Result<Vec<FileReport>> {
    let mut visited = HashSet::new();
    let mut reports = Vec::new();
    check_file(path, recursive, &mut visited, &mut reports)?;
    Ok(reports)
}

fn check_file(
    path: &Path,
    recursive: bool,
    visited: &mut HashSet<PathBuf>,
    reports: &mut Vec<FileReport>,
) -> Result<()> {
    let resolved = std::fs::canonicalize(path).map_err(|e| Error::io(path, e))?;
    if !visited.insert(resolved.clone()) {
        return Ok(());
    }

    let content = read_to_string(&resolved)?;
    let targets = extract_link_targets(&content);
    let base = resolved.parent().unwrap_or(Path::new("."));

    let mut report = FileReport {
        path: path.to_path_buf(),
        total: targets.len(),
        links: Vec::new(),
    };
    let mut follow = Vec::new();

    for target in targets {
        let status = match &target {
            LinkTarget::Anchor(_) => continue,
            LinkTarget::Email(_) => LinkStatus::Email,
            LinkTarget::External(_) => LinkStatus::External,
            LinkTarget::RelativeFile { path: relative, .. } => {
                let linked = base.join(relative);
                if linked.exists() {
                    if recursive && is_markdown_file(&linked) {
                        follow.push(linked);
                    }
                    LinkStatus::Found
                } else {
                    log::debug!("{} links to missing {}", path.display(), linked.display());
                    LinkStatus::Missing
                }
            }
        };
        report.links.push(CheckedLink { target, status });
    }

    reports.push(report);
    for linked in follow {
        check_file(&linked, recursive, visited, reports)?;
    }
    Ok(())
}

fn is_markdown_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn statuses(report: &FileReport) -> Vec<(String, LinkStatus)> {
        report
            .links
            .iter()
            .map(|l| (l.target.as_str(), l.status.clone()))
            .collect()
    }

    #[test]
    fn test_classifies_links() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("other.md"), "# Other\n").unwrap();
        fs::write(
            dir.path().join("doc.md"),
            "# Doc\n\n[top](#doc) [other](./other.md#intro) [gone](missing.md)\n\
             [web](https://example.com) <me@example.com> [mail](mailto:me@example.com)\n\n\
             [def]: ./other.md\n",
        )
        .unwrap();

        let reports = check_links(&dir.path().join("doc.md"), false).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].total, 7);
        assert_eq!(
            statuses(&reports[0]),
            vec![
                ("./other.md#intro".to_string(), LinkStatus::Found),
                ("missing.md".to_string(), LinkStatus::Missing),
                ("https://example.com".to_string(), LinkStatus::External),
                ("mailto:me@example.com".to_string(), LinkStatus::Email),
                ("mailto:me@example.com".to_string(), LinkStatus::Email),
                ("./other.md".to_string(), LinkStatus::Found),
            ]
        );
        assert_eq!(reports[0].broken().count(), 1);
    }

    #[test]
    fn test_recursive_follows_markdown_once() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("a.md"), "[b](sub/b.md) [img](sub)\n").unwrap();
        fs::write(sub.join("b.md"), "[back](../a.md) [c](c.md)\n").unwrap();

        let reports = check_links(&dir.path().join("a.md"), true).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].path.ends_with("a.md"));
        assert!(reports[1].path.ends_with("b.md"));
        assert_eq!(
            statuses(&reports[1]),
            vec![
                ("../a.md".to_string(), LinkStatus::Found),
                ("c.md".to_string(), LinkStatus::Missing),
            ]
        );
    }

    #[test]
    fn test_non_recursive_stays_in_one_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "[b](b.md)\n").unwrap();
        fs::write(dir.path().join("b.md"), "[nowhere](nowhere.md)\n").unwrap();

        let reports = check_links(&dir.path().join("a.md"), false).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].broken().count(), 0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_links(&dir.path().join("absent.md"), false).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
