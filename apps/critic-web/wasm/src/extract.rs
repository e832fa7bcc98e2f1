//! Page content and selection extraction for the analysis backend

use critic_types::PageContent;
use web_sys::{Document, Window};

/// Readable page text plus title and URL, as sent to the reviewer
pub fn extract_content(window: &Window, document: &Document) -> PageContent {
    let content = document
        .body()
        .map(|body| body.inner_text())
        .unwrap_or_default();
    let url = window.location().href().unwrap_or_default();

    PageContent {
        content,
        title: document.title(),
        url,
    }
}

/// The user's current selection, trimmed; empty string when nothing is
/// selected
pub fn selected_text(window: &Window) -> String {
    window
        .get_selection()
        .ok()
        .flatten()
        .map(|selection| String::from(js_sys::Object::to_string(selection.as_ref())))
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}
