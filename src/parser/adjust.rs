//! Heading-level shifting.

use super::scanner::FenceState;
use super::utils::{MAX_HEADING_LEVEL, MIN_HEADING_LEVEL, split_heading};

/// Shift every heading in `content` by `delta` levels.
///
/// A positive `delta` adds hashes (deeper), a negative one removes them.
/// Headings whose shifted level would leave 1..=6 are kept as they are.
/// Lines inside fenced code blocks and non-heading lines pass through
/// unchanged.
///
/// # Examples
///
/// ```
/// # use mdtree::parser::adjust::adjust_heading_levels;
/// assert_eq!(adjust_heading_levels("### Sub\ntext", -1), "## Sub\ntext");
/// assert_eq!(adjust_heading_levels("###### Deep", 1), "###### Deep");
/// ```
pub fn adjust_heading_levels(content: &str, delta: isize) -> String {
    let mut state = FenceState::default();
    let mut adjusted = Vec::new();

    for line in content.split('\n') {
        let (next, structural) = state.step(line);
        state = next;

        adjusted.push(if structural {
            shift_line(line, delta)
        } else {
            line.to_string()
        });
    }

    adjusted.join("\n")
}

fn shift_line(line: &str, delta: isize) -> String {
    let Some((level, rest)) = split_heading(line) else {
        return line.to_string();
    };

    let shifted = level.checked_add_signed(delta);
    match shifted {
        Some(new_level) if (MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&new_level) => {
            format!("{}{}", "#".repeat(new_level), rest)
        }
        _ => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decrement_flattens_section() {
        let body = "intro\n\n### Sub\ntext\n#### Deeper\n";
        assert_eq!(
            adjust_heading_levels(body, -1),
            "intro\n\n## Sub\ntext\n### Deeper\n"
        );
    }

    #[test]
    fn test_increment_restores_depth() {
        let section = "# Alpha\nBody\n## Sub\n";
        assert_eq!(
            adjust_heading_levels(section, 1),
            "## Alpha\nBody\n### Sub\n"
        );
    }

    #[test]
    fn test_level_clamp() {
        assert_eq!(adjust_heading_levels("###### Six", 1), "###### Six");
        assert_eq!(adjust_heading_levels("# One", -1), "# One");
        assert_eq!(adjust_heading_levels("## Two", -5), "## Two");
    }

    #[test]
    fn test_fenced_headings_untouched() {
        let md = "### Real\n```\n### Fake Heading\n```\n~~~md\n## Also fake\n~~~\n### Real again";
        assert_eq!(
            adjust_heading_levels(md, -1),
            "## Real\n```\n### Fake Heading\n```\n~~~md\n## Also fake\n~~~\n## Real again"
        );
    }

    #[test]
    fn test_non_headings_pass_through() {
        let md = "#hashtag\n  ## indented\nplain\n####### seven";
        assert_eq!(adjust_heading_levels(md, 1), md);
        assert_eq!(adjust_heading_levels(md, -1), md);
    }

    #[test]
    fn test_round_trip_in_range() {
        let md = "## Two\n### Three\n#### Four\n##### Five\n###### Six\n";
        let flattened = adjust_heading_levels(md, -1);
        assert_eq!(adjust_heading_levels(&flattened, 1), md);
    }

    #[test]
    fn test_preserves_heading_spacing() {
        assert_eq!(adjust_heading_levels("###\tTabbed  ", -1), "##\tTabbed  ");
    }
}
