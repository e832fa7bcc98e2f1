//! The engine's view of the live document
//!
//! The core never touches a browser API directly; everything it needs from
//! the page comes through this trait. The wasm app implements it over
//! web-sys, native tests implement it over scripted fixtures.

use critic_types::{Point, Rect, Size};

/// Read-only access to the host page's text nodes and layout
pub trait PageDom {
    /// Opaque position reference to a text node. Holding one does not keep
    /// the node alive; a detached node simply stops yielding text.
    type Node: Clone;

    /// Every text node under the traversal root in document order
    /// (pre-order, depth-first), unfiltered. Each call starts a fresh
    /// traversal; implementations must not share cursor state across calls.
    fn text_nodes(&self) -> Box<dyn Iterator<Item = Self::Node> + '_>;

    /// The node's raw text content, or None if it is no longer attached
    fn node_text(&self, node: &Self::Node) -> Option<String>;

    /// True when the node has no parent element, or when its nearest
    /// matching ancestor falls in `exclusion_selector`
    fn is_excluded(&self, node: &Self::Node, exclusion_selector: &str) -> bool;

    /// Viewport-relative client rectangles for the range `[start, end)` of
    /// the node's text, in UTF-16 code units as DOM ranges count them, one
    /// rectangle per visual line the range spans. Empty when the range
    /// currently has no layout box.
    fn range_rects(&self, node: &Self::Node, start: usize, end: usize) -> Vec<Rect>;

    /// Current window scroll offset
    fn scroll_offset(&self) -> Point;

    /// Current viewport size
    fn viewport(&self) -> Size;
}
