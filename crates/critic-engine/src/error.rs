use thiserror::Error;

/// Failure modes of the highlighting core
///
/// None of these are fatal to the host page: empty targets are skipped,
/// unlocatable text hides its box, missing geometry is a transient
/// not-found, and an observer failure degrades to scroll-only tracking.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("Requested text normalizes to an empty string")]
    EmptyTarget,

    #[error("Text not found in document: {0:?}")]
    NotFound(String),

    #[error("Located range currently has no layout geometry")]
    GeometryUnavailable,

    #[error("Layout observer registration failed: {0}")]
    Observer(String),

    #[error("Overlay element creation failed: {0}")]
    Surface(String),
}
