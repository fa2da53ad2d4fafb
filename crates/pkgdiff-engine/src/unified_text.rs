//! Unified diff text from two file contents.

use similar::TextDiff;

pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Render a line-based unified diff with `a/` and `b/` headers.
///
/// Pass an empty string for a side that does not exist. Identical inputs
/// render as an empty string (no headers, no hunks).
pub fn unified_text(
    old_path: &str,
    new_path: &str,
    old: &str,
    new: &str,
    context: usize,
) -> String {
    let old_header = format!("a/{}", old_path);
    let new_header = format!("b/{}", new_path);
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(context)
        .header(&old_header, &new_header)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_is_empty() {
        assert_eq!(unified_text("a.js", "a.js", "x\n", "x\n", 3), "");
    }

    #[test]
    fn test_headers_and_hunk() {
        let text = unified_text("a.js", "a.js", "one\ntwo\n", "one\nthree\n", 3);
        assert!(text.starts_with("--- a/a.js\n+++ b/a.js\n@@ "));
        assert!(text.contains("\n-two\n"));
        assert!(text.contains("\n+three\n"));
    }

    #[test]
    fn test_added_file_from_empty() {
        let text = unified_text("new.js", "new.js", "", "a\nb\n", 3);
        assert!(text.contains("+a\n+b\n"));
        assert!(!text.contains("\n-"));
    }
}
