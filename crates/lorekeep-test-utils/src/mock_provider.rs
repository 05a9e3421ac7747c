// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock model provider for deterministic testing.
//!
//! `MockProvider` implements `ModelProvider` with pre-configured responses,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lorekeep_core::{GenerateRequest, GenerateResult, LorekeepError, ModelProvider};

/// A mock model provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a
/// default "mock response" text is returned. Every request is captured so
/// tests can assert on the prompts the engine actually assembled.
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// Every request this provider has served, oldest first.
    pub async fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResult, LorekeepError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.default_model().to_string());
        self.requests.lock().await.push(request);
        Ok(GenerateResult {
            text: self.next_response().await,
            model,
            raw: None,
        })
    }
}

/// A provider whose every call fails, for exercising error paths.
pub struct FailingProvider;

#[async_trait]
impl ModelProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing-provider"
    }

    fn default_model(&self) -> &str {
        "failing-model"
    }

    async fn generate(
        &self,
        _request: GenerateRequest,
    ) -> Result<GenerateResult, LorekeepError> {
        Err(LorekeepError::Provider {
            message: "mock provider failure".to_string(),
            source: None,
        })
    }

    async fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let result = provider
            .generate(GenerateRequest::new("hello", None))
            .await
            .unwrap();
        assert_eq!(result.text, "mock response");
        assert_eq!(result.model, "mock-model");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider =
            MockProvider::with_responses(vec!["first".to_string(), "second".to_string()]);
        let first = provider.generate(GenerateRequest::new("a", None)).await.unwrap();
        let second = provider.generate(GenerateRequest::new("b", None)).await.unwrap();
        let third = provider.generate(GenerateRequest::new("c", None)).await.unwrap();
        assert_eq!(first.text, "first");
        assert_eq!(second.text, "second");
        // Queue exhausted, falls back to default
        assert_eq!(third.text, "mock response");
    }

    #[tokio::test]
    async fn requests_are_captured_in_order() {
        let provider = MockProvider::new();
        provider.generate(GenerateRequest::new("one", None)).await.unwrap();
        provider.generate(GenerateRequest::new("two", None)).await.unwrap();
        let requests = provider.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].prompt, "one");
        assert_eq!(requests[1].prompt, "two");
    }

    #[tokio::test]
    async fn failing_provider_always_errors() {
        let provider = FailingProvider;
        assert!(provider.generate(GenerateRequest::new("x", None)).await.is_err());
        assert!(!provider.is_available().await);
    }
}
