//! Scripted stand-ins for the browser: a fake page and a recording surface

use crate::error::HighlightError;
use crate::overlay::{ObserverMode, OverlaySurface};
use crate::page::PageDom;
use crate::tooltip::TooltipContent;
use critic_types::{IssueKind, Point, Rect, Size};

struct FakeTextNode {
    text: String,
    excluded: bool,
    rects: Vec<Rect>,
}

/// An in-memory page: an ordered list of text nodes with scripted client
/// rects, a scroll offset, and a viewport.
pub struct FakePage {
    nodes: Vec<FakeTextNode>,
    scroll: Point,
    viewport: Size,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            scroll: Point::new(0.0, 0.0),
            viewport: Size::new(1024.0, 768.0),
        }
    }

    /// Add a text node with a default one-line rect below the previous ones
    pub fn with_text(self, text: &str) -> Self {
        let top = self.nodes.len() as f64 * 24.0;
        let rect = Rect::new(0.0, top, text.len() as f64 * 8.0, 18.0);
        self.with_text_rects(text, vec![rect])
    }

    pub fn with_text_rects(mut self, text: &str, rects: Vec<Rect>) -> Self {
        self.nodes.push(FakeTextNode {
            text: text.to_string(),
            excluded: false,
            rects,
        });
        self
    }

    /// Add a node that sits under an excluded ancestor (script/style/overlay)
    pub fn with_excluded_text(mut self, text: &str) -> Self {
        self.nodes.push(FakeTextNode {
            text: text.to_string(),
            excluded: true,
            rects: vec![Rect::new(0.0, 0.0, 10.0, 10.0)],
        });
        self
    }

    pub fn scrolled_to(mut self, scroll: Point) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn scroll_to(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    pub fn set_text(&mut self, index: usize, text: &str) {
        self.nodes[index].text = text.to_string();
    }

    pub fn set_rects(&mut self, index: usize, rects: Vec<Rect>) {
        self.nodes[index].rects = rects;
    }
}

impl PageDom for FakePage {
    type Node = usize;

    fn text_nodes(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(0..self.nodes.len())
    }

    fn node_text(&self, node: &usize) -> Option<String> {
        self.nodes.get(*node).map(|n| n.text.clone())
    }

    fn is_excluded(&self, node: &usize, _exclusion_selector: &str) -> bool {
        self.nodes.get(*node).map(|n| n.excluded).unwrap_or(true)
    }

    fn range_rects(&self, node: &usize, start: usize, end: usize) -> Vec<Rect> {
        if start >= end {
            return Vec::new();
        }
        self.nodes
            .get(*node)
            .map(|n| n.rects.clone())
            .unwrap_or_default()
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}

/// Scripted outcome for `observe_layout`
pub enum ScriptedObserve {
    Full,
    ScrollOnly,
    Fail(String),
}

pub struct RecordedBox {
    pub kind: IssueKind,
    pub rect: Rect,
    pub visible: bool,
}

/// Records every surface operation so tests can assert on the painted state
pub struct RecordingSurface {
    pub container_mounted: bool,
    pub mounts: usize,
    pub boxes: Vec<RecordedBox>,
    pub tooltips: Vec<TooltipContent>,
    pub tooltip_sweeps: usize,
    pub observing: Option<ObserverMode>,
    pub observe_script: ScriptedObserve,
    /// When true, every `create_box` call fails
    pub fail_boxes: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            container_mounted: false,
            mounts: 0,
            boxes: Vec::new(),
            tooltips: Vec::new(),
            tooltip_sweeps: 0,
            observing: None,
            observe_script: ScriptedObserve::Full,
            fail_boxes: false,
        }
    }
}

impl OverlaySurface for RecordingSurface {
    type BoxHandle = usize;
    type TooltipHandle = usize;

    fn mount_container(&mut self) -> Result<(), HighlightError> {
        self.container_mounted = true;
        self.mounts += 1;
        Ok(())
    }

    fn remove_container(&mut self) {
        self.container_mounted = false;
        self.boxes.clear();
    }

    fn create_box(&mut self, kind: IssueKind, rect: Rect) -> Result<usize, HighlightError> {
        if self.fail_boxes {
            return Err(HighlightError::Surface("box creation refused".to_string()));
        }
        self.boxes.push(RecordedBox {
            kind,
            rect,
            visible: true,
        });
        Ok(self.boxes.len() - 1)
    }

    fn update_box(&mut self, handle: &usize, rect: Rect) {
        if let Some(recorded) = self.boxes.get_mut(*handle) {
            recorded.rect = rect;
            recorded.visible = true;
        }
    }

    fn hide_box(&mut self, handle: &usize) {
        if let Some(recorded) = self.boxes.get_mut(*handle) {
            recorded.visible = false;
        }
    }

    fn create_tooltip(&mut self, content: &TooltipContent) -> Result<usize, HighlightError> {
        self.tooltips.push(content.clone());
        Ok(self.tooltips.len() - 1)
    }

    fn sweep_tooltips(&mut self) {
        self.tooltips.clear();
        self.tooltip_sweeps += 1;
    }

    fn observe_layout(
        &mut self,
        _content_selectors: &[String],
    ) -> Result<ObserverMode, HighlightError> {
        match &self.observe_script {
            ScriptedObserve::Full => {
                self.observing = Some(ObserverMode::Full);
                Ok(ObserverMode::Full)
            }
            ScriptedObserve::ScrollOnly => {
                self.observing = Some(ObserverMode::ScrollOnly);
                Ok(ObserverMode::ScrollOnly)
            }
            ScriptedObserve::Fail(message) => Err(HighlightError::Observer(message.clone())),
        }
    }

    fn unobserve_layout(&mut self) {
        self.observing = None;
    }
}
