#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HighlightRequest {
    /// Literal page text to highlight, as the reviewer quoted it
    pub text: String,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl HighlightRequest {
    pub fn new(text: impl Into<String>, kind: IssueKind, explanation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            explanation: explanation.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Category of a detected writing issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Fluff,
    Fallacy,
    Assumption,
    Contradiction,
    Inconsistency,
}

impl IssueKind {
    /// Stable lowercase name, used as a CSS class suffix on overlay elements
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Fluff => "fluff",
            IssueKind::Fallacy => "fallacy",
            IssueKind::Assumption => "assumption",
            IssueKind::Contradiction => "contradiction",
            IssueKind::Inconsistency => "inconsistency",
        }
    }

    /// Capitalized label shown in the tooltip badge
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::Fluff => "Fluff",
            IssueKind::Fallacy => "Fallacy",
            IssueKind::Assumption => "Assumption",
            IssueKind::Contradiction => "Contradiction",
            IssueKind::Inconsistency => "Inconsistency",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page text handed to the analysis backend
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PageContent {
    pub content: String,
    pub title: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_deserializes_with_type_field() {
        let json = r#"{"text":"clearly the best","type":"fluff","explanation":"Empty superlative"}"#;
        let req: HighlightRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.kind, IssueKind::Fluff);
        assert_eq!(req.text, "clearly the best");
        assert!(req.suggestion.is_none());
    }

    #[test]
    fn test_request_keeps_suggestion() {
        let json = r#"{"text":"a","type":"fallacy","explanation":"e","suggestion":"s"}"#;
        let req: HighlightRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.suggestion.as_deref(), Some("s"));
    }

    #[test]
    fn test_kind_round_trips_lowercase() {
        let json = serde_json::to_string(&IssueKind::Contradiction).unwrap();
        assert_eq!(json, r#""contradiction""#);
        let back: IssueKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, IssueKind::Contradiction);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(IssueKind::Assumption.as_str(), "assumption");
        assert_eq!(IssueKind::Assumption.label(), "Assumption");
    }
}
