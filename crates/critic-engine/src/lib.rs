//! Highlighting engine for web-page text critique
//!
//! Given reviewer-flagged snippets of page text, the engine finds every
//! occurrence in the live document and keeps absolutely-positioned overlay
//! boxes aligned with them through reflow, resize, and scroll, without
//! mutating the page itself. There is no persistent anchor: geometry is
//! re-derived from scratch on every layout-change signal.
//!
//! The pipeline, leaf to root:
//! - [`normalize`]: canonicalize text so matching survives markup noise
//! - [`walker`]: filtered document-order traversal of visible text nodes
//! - [`locate`]: exact substring matches within single nodes
//! - [`project`]: located spans to page-absolute rectangles
//! - [`overlay`]: the session owning boxes, tooltips, and observers
//! - [`tooltip`]: viewport-fitting placement and hover debounce
//!
//! The live DOM is reached only through [`page::PageDom`] and
//! [`overlay::OverlaySurface`]; everything above those seams runs natively
//! under test.

pub mod config;
pub mod error;
pub mod locate;
pub mod normalize;
pub mod overlay;
pub mod page;
pub mod project;
pub mod tooltip;
pub mod walker;

#[cfg(test)]
mod testutil;

pub use config::EngineConfig;
pub use error::HighlightError;
pub use locate::{locate_all, locate_first, LocatedSpan};
pub use normalize::normalize;
pub use overlay::{
    BoxState, LayoutSignal, ObserverMode, OverlaySession, OverlaySurface, SessionPhase,
};
pub use page::PageDom;
pub use project::project;
pub use tooltip::{
    position_tooltip, HoverEffect, HoverEvent, HoverMachine, TimerToken, TooltipContent,
    TooltipLayout,
};
pub use walker::visible_text_nodes;
