//! Engine configuration
//!
//! Everything here has a sensible default; callers only override for tests
//! or unusual host pages.

use crate::tooltip::TooltipLayout;

/// Id of the single page-level container holding all highlight boxes
pub const CONTAINER_ID: &str = "content-critic-highlights";

/// Class carried by every highlight box; also part of the walker exclusion
/// set so the engine never matches its own injected text
pub const HIGHLIGHT_BOX_CLASS: &str = "content-critic-highlight-box";

/// Class carried by every tooltip appended to the page body
pub const TOOLTIP_CLASS: &str = "content-critic-tooltip";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Delay before a hover-out actually hides the tooltip, in milliseconds
    pub hide_delay_ms: u32,
    /// Tooltip gap and viewport margin
    pub tooltip: TooltipLayout,
    /// Selectors for "main content" containers whose resize should trigger
    /// re-projection, in addition to the document body
    pub content_selectors: Vec<String>,
    /// Selector matched against ancestors to exclude a text node from
    /// traversal
    pub exclusion_selector: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: 100,
            tooltip: TooltipLayout::default(),
            content_selectors: ["main", "article", ".content", "#content", "[role=\"main\"]"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclusion_selector: format!("script, style, noscript, .{}", HIGHLIGHT_BOX_CLASS),
        }
    }
}
