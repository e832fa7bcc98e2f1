pub mod command;
pub mod geometry;
pub mod types;

pub use command::{CriticCommand, CriticResponse};
pub use geometry::{Point, Rect, Size};
pub use types::{HighlightRequest, IssueKind, PageContent};
