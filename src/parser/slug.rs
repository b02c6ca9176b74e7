//! Slug generation for section filenames and in-document anchors.

use regex::Regex;
use std::sync::OnceLock;

/// Generate a filename- and URL-safe slug from heading text.
///
/// Lowercases the text, drops every character outside ASCII letters and
/// digits, CJK ideographs, Hiragana, Katakana, Hangul, whitespace and `-`,
/// then turns whitespace runs into single hyphens and trims hyphens from
/// both ends. Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use mdtree::parser::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Setup & Install!"), "setup-install");
/// assert_eq!(slugify("インストール 手順"), "インストール-手順");
/// ```
pub fn slugify(text: &str) -> String {
    static PATTERNS: OnceLock<(Regex, Regex, Regex)> = OnceLock::new();
    let (disallowed, whitespace, hyphens) = PATTERNS.get_or_init(|| {
        (
            Regex::new(
                r"[^a-z0-9\x{4e00}-\x{9fff}\x{3040}-\x{309f}\x{30a0}-\x{30ff}\x{ac00}-\x{d7af}\s-]",
            )
            .unwrap(),
            Regex::new(r"\s+").unwrap(),
            Regex::new(r"-+").unwrap(),
        )
    });

    let lowered = text.to_lowercase();
    let kept = disallowed.replace_all(&lowered, "");
    let dashed = whitespace.replace_all(&kept, "-");
    let collapsed = hyphens.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}
