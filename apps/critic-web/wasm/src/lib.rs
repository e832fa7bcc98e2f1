//! WASM bindings for the Content Critic highlighting engine
//!
//! This crate is the content-script side of the extension: it receives
//! highlight batches from the transport, runs the DOM-agnostic engine in
//! `critic-engine` against the live page, and paints the overlay.
//!
//! ## Architecture
//!
//! - All state is held in Rust via `HighlightController`; JavaScript only
//!   forwards messages and file-free I/O
//! - `BrowserPage` and `BrowserSurface` implement the engine's two DOM
//!   seams over web-sys
//! - Layout signals (ResizeObserver, scroll) re-enter the session through a
//!   weak handle, so a torn-down controller leaves no live callbacks
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { HighlightController } from './pkg/critic_wasm.js';
//!
//! await init();
//! const controller = new HighlightController();
//! controller.applyHighlights([
//!   { text: "clearly the best", type: "fluff", explanation: "…" },
//! ]);
//! controller.clearHighlights();
//! ```

pub mod extract;
pub mod hover;
pub mod page;
pub mod surface;

use std::cell::RefCell;
use std::rc::Rc;

use critic_engine::{EngineConfig, OverlaySession};
use critic_types::{CriticCommand, CriticResponse, HighlightRequest};
use wasm_bindgen::prelude::*;

pub use page::BrowserPage;
pub use surface::BrowserSurface;

use hover::HoverWiring;

struct Inner {
    page: BrowserPage,
    surface: BrowserSurface,
    session: OverlaySession<BrowserSurface>,
    hover: Vec<HoverWiring>,
}

impl Inner {
    fn apply(&mut self, requests: &[HighlightRequest]) {
        self.session
            .apply_highlights(&self.page, &mut self.surface, requests);

        // Old wirings target elements the placement pass just removed
        self.hover.clear();
        let layout = self.session.config().tooltip;
        let hide_delay_ms = self.session.config().hide_delay_ms;
        for state in self.session.boxes() {
            self.hover.push(HoverWiring::attach(
                self.page.window(),
                &state.handle,
                &state.tooltip_handle,
                layout,
                hide_delay_ms,
            ));
        }
    }

    fn clear(&mut self) {
        self.session.clear_highlights(&mut self.surface);
        self.hover.clear();
    }
}

/// Content-script entry point: owns the overlay session for this page
#[wasm_bindgen]
pub struct HighlightController {
    inner: Rc<RefCell<Inner>>,
}

impl HighlightController {
    pub fn create() -> Result<Self, JsValue> {
        let page = BrowserPage::new()?;
        let surface = BrowserSurface::new()?;
        let inner = Rc::new(RefCell::new(Inner {
            page,
            surface,
            session: OverlaySession::new(EngineConfig::default()),
            hover: Vec::new(),
        }));

        // Layout signals re-enter through a weak handle; a burst arriving
        // while a pass is already running is dropped, the next signal
        // re-derives everything anyway
        let weak = Rc::downgrade(&inner);
        inner.borrow_mut().surface.set_signal_handler(move |signal| {
            if let Some(strong) = weak.upgrade() {
                if let Ok(mut inner) = strong.try_borrow_mut() {
                    let Inner {
                        page,
                        surface,
                        session,
                        ..
                    } = &mut *inner;
                    session.handle_signal(signal, page, surface);
                }
            }
        });

        Ok(Self { inner })
    }

    pub fn apply_requests(&self, requests: &[HighlightRequest]) {
        self.inner.borrow_mut().apply(requests);
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Dispatch one transport message, returning the JSON response
    pub fn handle_command(&self, command: CriticCommand) -> Result<CriticResponse, JsValue> {
        match command {
            CriticCommand::Ping => Ok(CriticResponse::ready()),
            CriticCommand::GetContent => {
                let inner = self.inner.borrow();
                Ok(CriticResponse::Content(extract::extract_content(
                    inner.page.window(),
                    inner.page.document(),
                )))
            }
            CriticCommand::HighlightContent { highlights } => {
                self.apply_requests(&highlights);
                Ok(CriticResponse::ok())
            }
            CriticCommand::ClearHighlights => {
                self.clear();
                Ok(CriticResponse::ok())
            }
            CriticCommand::GetSelectedText => {
                let inner = self.inner.borrow();
                Ok(CriticResponse::Selection {
                    selected_text: extract::selected_text(inner.page.window()),
                })
            }
        }
    }
}

// WASM bindings
#[wasm_bindgen]
impl HighlightController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<HighlightController, JsValue> {
        Self::create()
    }

    /// Replace any existing highlights with this batch
    #[wasm_bindgen(js_name = applyHighlights)]
    pub fn apply_highlights(&self, highlights: JsValue) -> Result<(), JsValue> {
        let requests: Vec<HighlightRequest> = serde_wasm_bindgen::from_value(highlights)
            .map_err(|e| JsValue::from_str(&format!("Invalid highlight batch: {}", e)))?;
        self.apply_requests(&requests);
        Ok(())
    }

    /// Tear down the overlay session
    #[wasm_bindgen(js_name = clearHighlights)]
    pub fn clear_highlights(&self) {
        self.clear();
    }

    /// Re-derive all box positions now (normally driven by layout signals)
    #[wasm_bindgen(js_name = updatePositions)]
    pub fn update_positions(&self) {
        let mut inner = self.inner.borrow_mut();
        let Inner {
            page,
            surface,
            session,
            ..
        } = &mut *inner;
        session.reproject(page, surface);
    }

    /// Handle one JSON transport message and return the JSON response
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&self, message: &str) -> Result<String, JsValue> {
        let command: CriticCommand = serde_json::from_str(message)
            .map_err(|e| JsValue::from_str(&format!("Invalid message: {}", e)))?;
        let response = self.handle_command(command)?;
        serde_json::to_string(&response)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Number of highlight boxes currently tracked
    #[wasm_bindgen(js_name = boxCount)]
    pub fn box_count(&self) -> usize {
        self.inner.borrow().session.boxes().len()
    }
}

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Note: controller tests require DOM APIs and are skipped in non-WASM
// environments; the session and placement logic is covered natively in
// critic-engine against fake page/surface implementations.
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_controller_creation() {
        let controller = HighlightController::new();
        assert!(controller.is_ok());
        assert_eq!(controller.unwrap().box_count(), 0);
    }

    #[wasm_bindgen_test]
    fn test_clear_without_session_is_safe() {
        let controller = HighlightController::new().unwrap();
        controller.clear_highlights();
        controller.clear_highlights();
        assert_eq!(controller.box_count(), 0);
    }
}
