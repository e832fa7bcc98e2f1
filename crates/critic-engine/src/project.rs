//! Projecting located spans into page-absolute rectangles

use crate::locate::LocatedSpan;
use crate::page::PageDom;
use critic_types::Rect;

/// Rectangles covering the span, in page-absolute coordinates.
///
/// A span wrapped over several visual lines produces one rectangle per
/// line. Zero rectangles is a valid outcome (the range currently has no
/// layout box, e.g. a hidden ancestor) and is treated upstream as a
/// transient not-found, never an error.
pub fn project<P: PageDom>(page: &P, span: &LocatedSpan<P::Node>) -> Vec<Rect> {
    let scroll = page.scroll_offset();
    page.range_rects(&span.node, span.start, span.end)
        .into_iter()
        .map(|rect| rect.translate(scroll))
        .collect()
}
