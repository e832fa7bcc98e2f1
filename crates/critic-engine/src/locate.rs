//! Locating normalized targets inside live text nodes
//!
//! Matching is per-node: a target split across two text nodes (for example
//! by an inline element boundary) is not found. Extending this to
//! cross-node matching would change which pages match at all, so the
//! limitation stands until that behavior is decided.

use crate::normalize::normalize;
use crate::page::PageDom;
use crate::walker::visible_text_nodes;

/// A located match: node position plus UTF-16 code-unit offsets within it,
/// the unit DOM ranges count in.
///
/// Spans are re-derived on every projection pass and never persisted; any
/// layout change can invalidate them.
#[derive(Debug, Clone)]
pub struct LocatedSpan<N> {
    pub node: N,
    pub start: usize,
    pub end: usize,
}

/// Offsets of `target` within `normalized` in UTF-16 code units, given the
/// byte offset `find` produced
fn utf16_span(normalized: &str, byte_start: usize, target: &str) -> (usize, usize) {
    let start = normalized[..byte_start].encode_utf16().count();
    (start, start + target.encode_utf16().count())
}

/// Every node whose normalized text contains `normalized_target`, one span
/// per node. The same phrase can legitimately appear several times on a
/// page, so callers get all of them. Empty targets match nothing.
///
/// Offsets are UTF-16 code units into the node's *normalized* text applied
/// directly to the raw node. When the raw text contains collapsible
/// whitespace the resulting range drifts by the collapsed amount; this
/// approximation is kept as-is because correcting it changes which
/// rectangles existing pages produce.
pub fn locate_all<P: PageDom>(
    page: &P,
    exclusion_selector: &str,
    normalized_target: &str,
) -> Vec<LocatedSpan<P::Node>> {
    if normalized_target.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    for node in visible_text_nodes(page, exclusion_selector) {
        let Some(raw) = page.node_text(&node) else {
            continue;
        };
        let normalized = normalize(&raw);
        if let Some(found) = normalized.find(normalized_target) {
            let (start, end) = utf16_span(&normalized, found, normalized_target);
            spans.push(LocatedSpan { node, start, end });
        }
    }
    spans
}

/// First containing node wins
pub fn locate_first<P: PageDom>(
    page: &P,
    exclusion_selector: &str,
    normalized_target: &str,
) -> Option<LocatedSpan<P::Node>> {
    if normalized_target.is_empty() {
        return None;
    }

    visible_text_nodes(page, exclusion_selector).find_map(|node| {
        let raw = page.node_text(&node)?;
        let normalized = normalize(&raw);
        normalized.find(normalized_target).map(|found| {
            let (start, end) = utf16_span(&normalized, found, normalized_target);
            LocatedSpan { node, start, end }
        })
    })
}
