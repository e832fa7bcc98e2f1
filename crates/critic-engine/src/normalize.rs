//! Text canonicalization for matching
//!
//! Reviewer-quoted snippets and live node text both pass through
//! `normalize` before comparison, so matching is robust to markup noise and
//! whitespace differences. Normalized text is only ever compared, never
//! displayed or written back to the page.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Canonical form of a string: comments stripped, tags replaced by a single
/// space (preserving tag-separated word boundaries), whitespace runs
/// collapsed, ends trimmed. Idempotent; whitespace-only input yields "".
pub fn normalize(raw: &str) -> String {
    let no_comments = HTML_COMMENT.replace_all(raw, "");
    let no_tags = HTML_TAG.replace_all(&no_comments, " ");
    WHITESPACE_RUN.replace_all(&no_tags, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_strips_tags_and_collapses_whitespace() {
        assert_eq!(normalize("<b>Hello</b>   world"), "Hello world");
    }

    #[test]
    fn test_tag_boundary_becomes_word_boundary() {
        assert_eq!(normalize("one<br>two"), "one two");
    }

    #[test]
    fn test_strips_comments_entirely() {
        assert_eq!(normalize("keep <!-- drop\nthis --> this"), "keep this");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(normalize("   \n\t "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(normalize("The quick brown fox"), "The quick brown fox");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in ".{0,200}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_output_has_no_whitespace_runs(s in ".{0,200}") {
            let out = normalize(&s);
            prop_assert!(!out.contains("  "));
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
