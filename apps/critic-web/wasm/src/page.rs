//! `PageDom` over the live browser document

use critic_engine::PageDom;
use critic_types::{Point, Rect, Size};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Node, Window};

/// Bit for text nodes in TreeWalker's whatToShow mask
const SHOW_TEXT: u32 = 0x4;

/// The engine's window into the real page
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    /// # Errors
    /// Returns JsValue error if unable to access window or document
    pub fn new() -> Result<Self, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object available"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl PageDom for BrowserPage {
    type Node = Node;

    fn text_nodes(&self) -> Box<dyn Iterator<Item = Node> + '_> {
        let Some(body) = self.document.body() else {
            return Box::new(std::iter::empty());
        };
        let Ok(walker) = self
            .document
            .create_tree_walker_with_what_to_show(&body, SHOW_TEXT)
        else {
            return Box::new(std::iter::empty());
        };
        // Fresh TreeWalker per call; filtering happens on the Rust side
        Box::new(std::iter::from_fn(move || {
            walker.next_node().ok().flatten()
        }))
    }

    fn node_text(&self, node: &Node) -> Option<String> {
        node.text_content()
    }

    fn is_excluded(&self, node: &Node, exclusion_selector: &str) -> bool {
        match node.parent_element() {
            None => true,
            Some(parent) => parent
                .closest(exclusion_selector)
                .ok()
                .flatten()
                .is_some(),
        }
    }

    fn range_rects(&self, node: &Node, start: usize, end: usize) -> Vec<Rect> {
        let Ok(range) = self.document.create_range() else {
            return Vec::new();
        };
        if range.set_start(node, start as u32).is_err()
            || range.set_end(node, end as u32).is_err()
        {
            return Vec::new();
        }

        let Some(rects) = range.get_client_rects() else {
            return Vec::new();
        };
        (0..rects.length())
            .filter_map(|i| rects.item(i))
            .map(|r| Rect::new(r.x(), r.y(), r.width(), r.height()))
            .collect()
    }

    fn scroll_offset(&self) -> Point {
        Point::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }

    fn viewport(&self) -> Size {
        let dim = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Size::new(
            dim(self.window.inner_width()),
            dim(self.window.inner_height()),
        )
    }
}
