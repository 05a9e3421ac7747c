// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider for Lorekeep.
//!
//! Serves the ruling route: rules adjudication and planning requests that
//! benefit from a stronger model than the local narrative one.

pub mod client;
pub mod types;

use async_trait::async_trait;

use lorekeep_core::{GenerateRequest, GenerateResult, LorekeepError, ModelProvider};

pub use client::AnthropicClient;

use types::{ApiMessage, DEFAULT_MAX_TOKENS, MessageRequest};

/// Claude-backed [`ModelProvider`].
pub struct ClaudeProvider {
    client: AnthropicClient,
    api_key_set: bool,
    default_model: String,
}

impl ClaudeProvider {
    /// Create a provider. An empty `api_key` still constructs (so the
    /// provider can be wired unconditionally), but reports unavailable.
    pub fn new(
        api_key: &str,
        api_version: &str,
        default_model: String,
    ) -> Result<Self, LorekeepError> {
        Ok(Self {
            client: AnthropicClient::new(api_key, api_version)?,
            api_key_set: !api_key.is_empty(),
            default_model,
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, url: String) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }
}

#[async_trait]
impl ModelProvider for ClaudeProvider {
    fn name(&self) -> &str {
        "claude"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResult, LorekeepError> {
        let model = request
            .model
            .unwrap_or_else(|| self.default_model.clone());
        let api_request = MessageRequest {
            model: model.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
            system: request.system,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        let response = self.client.complete_message(&api_request).await?;
        Ok(GenerateResult {
            text: response.text(),
            model,
            raw: Some(serde_json::json!({
                "id": response.id,
                "stop_reason": response.stop_reason,
            })),
        })
    }

    async fn is_available(&self) -> bool {
        self.api_key_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": text}],
            "model": "claude-3-5-sonnet-20241022",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
    }

    fn provider(base_url: &str) -> ClaudeProvider {
        ClaudeProvider::new("test-key", "2023-06-01", "claude-3-5-sonnet-20241022".into())
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    #[tokio::test]
    async fn generate_returns_concatenated_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-3-5-sonnet-20241022",
                "max_tokens": 4096,
                "messages": [{"role": "user", "content": "Can I grapple?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Yes.")))
            .mount(&server)
            .await;

        let result = provider(&server.uri())
            .generate(GenerateRequest::new("Can I grapple?", None))
            .await
            .unwrap();
        assert_eq!(result.text, "Yes.");
        assert_eq!(result.model, "claude-3-5-sonnet-20241022");
        assert!(result.raw.is_some());
    }

    #[tokio::test]
    async fn system_text_is_sent_as_top_level_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "system": "You are the DM."
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
            .mount(&server)
            .await;

        let result = provider(&server.uri())
            .generate(GenerateRequest::new("hello", Some("You are the DM.".into())))
            .await
            .unwrap();
        assert_eq!(result.text, "ok");
    }

    #[tokio::test]
    async fn availability_tracks_api_key_presence() {
        let with_key =
            ClaudeProvider::new("key", "2023-06-01", "m".into()).unwrap();
        assert!(with_key.is_available().await);

        let without_key = ClaudeProvider::new("", "2023-06-01", "m".into()).unwrap();
        assert!(!without_key.is_available().await);
    }
}
