//! Filtered traversal of visible text nodes

use crate::normalize::normalize;
use crate::page::PageDom;

/// Text nodes the engine is allowed to match against, in document order.
///
/// Rejects nodes without a parent element, nodes under an excluded ancestor
/// (script/style/noscript and the engine's own overlay), and nodes whose
/// normalized content is empty. Each call is an independent traversal.
pub fn visible_text_nodes<'a, P: PageDom>(
    page: &'a P,
    exclusion_selector: &'a str,
) -> impl Iterator<Item = P::Node> + 'a {
    page.text_nodes().filter(move |node| {
        if page.is_excluded(node, exclusion_selector) {
            return false;
        }
        match page.node_text(node) {
            Some(text) => !normalize(&text).is_empty(),
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakePage;

    #[test]
    fn test_skips_excluded_and_blank_nodes() {
        let page = FakePage::new()
            .with_text("First paragraph")
            .with_excluded_text("var x = 1;")
            .with_text("   \n  ")
            .with_text("Second paragraph");

        let texts: Vec<String> = visible_text_nodes(&page, "script")
            .map(|n| page.node_text(&n).unwrap())
            .collect();
        assert_eq!(texts, vec!["First paragraph", "Second paragraph"]);
    }

    #[test]
    fn test_traversal_restarts_fresh() {
        let page = FakePage::new().with_text("only");
        assert_eq!(visible_text_nodes(&page, "script").count(), 1);
        assert_eq!(visible_text_nodes(&page, "script").count(), 1);
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let page = FakePage::new();
        assert_eq!(visible_text_nodes(&page, "script").count(), 0);
    }
}
