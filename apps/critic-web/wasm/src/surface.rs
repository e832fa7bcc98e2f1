//! `OverlaySurface` over the live DOM
//!
//! Creates the overlay container, highlight boxes, and tooltips, and wires
//! the layout signals (ResizeObserver on body + content containers, window
//! scroll) back into the session. All closures are owned here and released
//! on `unobserve_layout`, so teardown leaves no dangling callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use critic_engine::config::{CONTAINER_ID, HIGHLIGHT_BOX_CLASS, TOOLTIP_CLASS};
use critic_engine::{HighlightError, LayoutSignal, ObserverMode, OverlaySurface, TooltipContent};
use critic_types::{IssueKind, Rect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ResizeObserver, Window};

/// Keeps the overlay above page content but below the browser chrome
const OVERLAY_Z_INDEX: &str = "2147483646";

type SignalHandler = Rc<RefCell<Option<Box<dyn FnMut(LayoutSignal)>>>>;

pub struct BrowserSurface {
    window: Window,
    document: Document,
    container: Option<Element>,
    tooltips: Vec<Element>,
    resize_observer: Option<ResizeObserver>,
    resize_closure: Option<Closure<dyn FnMut()>>,
    scroll_closure: Option<Closure<dyn FnMut()>>,
    signal_handler: SignalHandler,
}

impl BrowserSurface {
    /// # Errors
    /// Returns JsValue error if unable to access window or document
    pub fn new() -> Result<Self, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object available"))?;
        Ok(Self {
            window,
            document,
            container: None,
            tooltips: Vec::new(),
            resize_observer: None,
            resize_closure: None,
            scroll_closure: None,
            signal_handler: Rc::new(RefCell::new(None)),
        })
    }

    /// Route layout signals into the session. Set once by the controller.
    pub fn set_signal_handler(&mut self, handler: impl FnMut(LayoutSignal) + 'static) {
        *self.signal_handler.borrow_mut() = Some(Box::new(handler));
    }

    fn set_style(element: &Element, property: &str, value: &str) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn place(element: &Element, rect: Rect) {
        Self::set_style(element, "left", &format!("{}px", rect.left));
        Self::set_style(element, "top", &format!("{}px", rect.top));
        Self::set_style(element, "width", &format!("{}px", rect.width));
        Self::set_style(element, "height", &format!("{}px", rect.height));
    }

    fn signal_closure(&self, signal: LayoutSignal) -> Closure<dyn FnMut()> {
        let handler = self.signal_handler.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(handler) = handler.borrow_mut().as_mut() {
                handler(signal);
            }
        })
    }
}

impl OverlaySurface for BrowserSurface {
    type BoxHandle = Element;
    type TooltipHandle = Element;

    fn mount_container(&mut self) -> Result<(), HighlightError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| HighlightError::Surface("document has no body".to_string()))?;

        let container = self
            .document
            .create_element("div")
            .map_err(|_| HighlightError::Surface("cannot create container".to_string()))?;
        container.set_id(CONTAINER_ID);
        Self::set_style(&container, "position", "absolute");
        Self::set_style(&container, "top", "0");
        Self::set_style(&container, "left", "0");
        Self::set_style(&container, "width", "100%");
        Self::set_style(&container, "height", "100%");
        Self::set_style(&container, "pointer-events", "none");
        Self::set_style(&container, "z-index", OVERLAY_Z_INDEX);
        let _ = body.append_child(&container);

        self.container = Some(container);
        Ok(())
    }

    fn remove_container(&mut self) {
        if let Some(container) = self.container.take() {
            container.remove();
        }
        // A container from a previous page life (e.g. script re-injection)
        // would otherwise linger
        if let Some(stale) = self.document.get_element_by_id(CONTAINER_ID) {
            stale.remove();
        }
    }

    fn create_box(&mut self, kind: IssueKind, rect: Rect) -> Result<Element, HighlightError> {
        let boxed = self
            .document
            .create_element("div")
            .map_err(|_| HighlightError::Surface("cannot create highlight box".to_string()))?;
        boxed.set_class_name(&format!("{} {}", HIGHLIGHT_BOX_CLASS, kind.as_str()));
        Self::set_style(&boxed, "position", "absolute");
        Self::place(&boxed, rect);
        Self::set_style(&boxed, "pointer-events", "auto");
        Self::set_style(&boxed, "z-index", OVERLAY_Z_INDEX);

        if let Some(container) = &self.container {
            let _ = container.append_child(&boxed);
        }
        Ok(boxed)
    }

    fn update_box(&mut self, handle: &Element, rect: Rect) {
        Self::place(handle, rect);
        Self::set_style(handle, "display", "block");
    }

    fn hide_box(&mut self, handle: &Element) {
        Self::set_style(handle, "display", "none");
    }

    fn create_tooltip(&mut self, content: &TooltipContent) -> Result<Element, HighlightError> {
        let tooltip = self
            .document
            .create_element("div")
            .map_err(|_| HighlightError::Surface("cannot create tooltip".to_string()))?;
        tooltip.set_class_name(TOOLTIP_CLASS);
        // Positioned in viewport coordinates by the hover wiring
        Self::set_style(&tooltip, "position", "fixed");
        Self::set_style(&tooltip, "z-index", OVERLAY_Z_INDEX);
        Self::set_style(&tooltip, "display", "none");

        if let Ok(badge) = self.document.create_element("div") {
            badge.set_class_name(&format!("content-critic-type {}", content.kind.as_str()));
            badge.set_text_content(Some(content.kind.label()));
            let _ = tooltip.append_child(&badge);
        }

        if let Ok(explanation) = self.document.create_element("div") {
            explanation.set_class_name("content-critic-explanation");
            explanation.set_text_content(Some(&content.explanation));
            let _ = tooltip.append_child(&explanation);
        }

        if let Some(suggestion) = &content.suggestion {
            if let Ok(wrapper) = self.document.create_element("div") {
                wrapper.set_class_name("content-critic-suggestion");
                if let Ok(label) = self.document.create_element("div") {
                    label.set_class_name("content-critic-suggestion-label");
                    label.set_text_content(Some("Suggestion"));
                    let _ = wrapper.append_child(&label);
                }
                if let Ok(text) = self.document.create_element("div") {
                    text.set_class_name("content-critic-suggestion-text");
                    text.set_text_content(Some(suggestion));
                    let _ = wrapper.append_child(&text);
                }
                let _ = tooltip.append_child(&wrapper);
            }
        }

        if let Some(body) = self.document.body() {
            let _ = body.append_child(&tooltip);
        }
        self.tooltips.push(tooltip.clone());
        Ok(tooltip)
    }

    fn sweep_tooltips(&mut self) {
        for tooltip in self.tooltips.drain(..) {
            tooltip.remove();
        }
        // Tooltips orphaned by a previous generation
        if let Ok(stale) = self.document.query_selector_all(&format!(".{}", TOOLTIP_CLASS)) {
            for i in 0..stale.length() {
                if let Some(node) = stale.item(i) {
                    if let Some(element) = node.dyn_ref::<Element>() {
                        element.remove();
                    }
                }
            }
        }
    }

    fn observe_layout(
        &mut self,
        content_selectors: &[String],
    ) -> Result<ObserverMode, HighlightError> {
        let scroll_closure = self.signal_closure(LayoutSignal::WindowScrolled);
        self.window
            .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref())
            .map_err(|_| HighlightError::Observer("cannot attach scroll listener".to_string()))?;
        self.scroll_closure = Some(scroll_closure);

        let resize_closure = self.signal_closure(LayoutSignal::ContainerResized);
        let observer = match ResizeObserver::new(resize_closure.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(_) => return Ok(ObserverMode::ScrollOnly),
        };

        if let Some(body) = self.document.body() {
            observer.observe(&body);
        }
        for selector in content_selectors {
            if let Ok(matches) = self.document.query_selector_all(selector) {
                for i in 0..matches.length() {
                    if let Some(node) = matches.item(i) {
                        if let Some(element) = node.dyn_ref::<Element>() {
                            observer.observe(element);
                        }
                    }
                }
            }
        }

        self.resize_observer = Some(observer);
        self.resize_closure = Some(resize_closure);
        Ok(ObserverMode::Full)
    }

    fn unobserve_layout(&mut self) {
        if let Some(observer) = self.resize_observer.take() {
            observer.disconnect();
        }
        if let Some(closure) = self.scroll_closure.take() {
            let _ = self.window.remove_event_listener_with_callback(
                "scroll",
                closure.as_ref().unchecked_ref(),
            );
        }
        self.resize_closure = None;
    }
}
