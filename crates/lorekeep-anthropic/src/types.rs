// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request/response types for the Anthropic Messages API.

use serde::{Deserialize, Serialize};

/// Response token cap used when the caller does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

/// Messages API request body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
}

/// One content block from a response. Only text blocks carry reply text;
/// other block types are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Messages API response body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl MessageResponse {
    /// Concatenate all text blocks into the reply text.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect()
    }
}

/// Error envelope returned by the API on failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub type_: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_concatenates_only_text_blocks() {
        let body = r#"{
            "id": "msg_1",
            "model": "claude-3-5-sonnet-20241022",
            "content": [
                {"type": "text", "text": "The rule says "},
                {"type": "tool_use", "id": "t1", "name": "roll", "input": {}},
                {"type": "text", "text": "advantage applies."}
            ],
            "stop_reason": "end_turn"
        }"#;
        let response: MessageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), "The rule says advantage applies.");
    }

    #[test]
    fn empty_content_yields_empty_text() {
        let body = r#"{"id": "msg_2", "model": "m", "content": []}"#;
        let response: MessageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn request_omits_absent_system() {
        let request = MessageRequest {
            model: "m".into(),
            messages: vec![],
            system: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("system"));
    }
}
