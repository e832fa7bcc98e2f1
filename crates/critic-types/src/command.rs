//! Message shapes exchanged with the extension transport
//!
//! The transport itself (runtime messaging, ports) is owned by the
//! extension shell; these are only the payloads the content-side engine
//! understands.

use crate::types::{HighlightRequest, PageContent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CriticCommand {
    /// Liveness probe from the extension shell
    Ping,
    /// Extract the readable text of the page
    GetContent,
    /// Replace any existing highlights with this batch
    HighlightContent { highlights: Vec<HighlightRequest> },
    /// Tear down the overlay session
    ClearHighlights,
    /// Return the user's current text selection
    GetSelectedText,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CriticResponse {
    Status { status: String },
    Content(PageContent),
    Ack { success: bool },
    #[serde(rename_all = "camelCase")]
    Selection { selected_text: String },
}

impl CriticResponse {
    pub fn ready() -> Self {
        CriticResponse::Status {
            status: "ready".to_string(),
        }
    }

    pub fn ok() -> Self {
        CriticResponse::Ack { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_deserializes_ping() {
        let cmd: CriticCommand = serde_json::from_str(r#"{"action":"ping"}"#).unwrap();
        assert!(matches!(cmd, CriticCommand::Ping));
    }

    #[test]
    fn test_command_deserializes_highlight_batch() {
        let json = r#"{
            "action": "highlightContent",
            "highlights": [
                {"text": "obviously", "type": "fluff", "explanation": "filler"}
            ]
        }"#;
        let cmd: CriticCommand = serde_json::from_str(json).unwrap();
        match cmd {
            CriticCommand::HighlightContent { highlights } => {
                assert_eq!(highlights.len(), 1);
                assert_eq!(highlights[0].text, "obviously");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_command_deserializes_clear() {
        let cmd: CriticCommand = serde_json::from_str(r#"{"action":"clearHighlights"}"#).unwrap();
        assert!(matches!(cmd, CriticCommand::ClearHighlights));
    }

    #[test]
    fn test_response_serializes_flat() {
        let json = serde_json::to_string(&CriticResponse::ready()).unwrap();
        assert_eq!(json, r#"{"status":"ready"}"#);

        let json = serde_json::to_string(&CriticResponse::Selection {
            selected_text: "quoted".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"selectedText":"quoted"}"#);
    }
}
