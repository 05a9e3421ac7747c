// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP provider for a local Ollama instance.
//!
//! Serves both capability traits: chat completions via `/api/chat` and
//! embeddings via `/api/embeddings`. Availability is probed with
//! `/api/tags`, which Ollama answers whenever it is running.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use lorekeep_core::{
    EmbeddingBackend, GenerateRequest, GenerateResult, LorekeepError, ModelProvider,
};

use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, EmbeddingsRequest, EmbeddingsResponse,
};

/// Client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    default_model: String,
    embedding_model: String,
}

impl OllamaProvider {
    /// Create a provider for the Ollama server at `base_url`.
    ///
    /// `default_model` serves chat requests without a model override;
    /// `embedding_model` serves every embedding request.
    pub fn new(
        base_url: &str,
        default_model: String,
        embedding_model: String,
    ) -> Result<Self, LorekeepError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| LorekeepError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model,
            embedding_model,
        })
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, LorekeepError> {
        let url = format!("{}{endpoint}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| LorekeepError::Provider {
                message: format!("HTTP request to {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(%status, endpoint, "ollama response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LorekeepError::Provider {
                message: format!("ollama returned {status}: {body}"),
                source: None,
            });
        }

        response.json().await.map_err(|e| LorekeepError::Provider {
            message: format!("failed to parse ollama response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
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

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt,
        });

        let chat = ChatRequest {
            model: model.clone(),
            messages,
            stream: false,
        };
        let response: ChatResponse = self.post_json("/api/chat", &chat).await?;

        let text = response
            .message
            .map(|m| m.content)
            .unwrap_or_default();
        Ok(GenerateResult {
            text,
            model,
            raw: None,
        })
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl EmbeddingBackend for OllamaProvider {
    /// Embed each text with the configured embedding model, one request per
    /// text, preserving input order. An empty input embeds to nothing.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LorekeepError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            let request = EmbeddingsRequest {
                model: self.embedding_model.clone(),
                prompt: text.clone(),
            };
            let response: EmbeddingsResponse = self
                .post_json("/api/embeddings", &request)
                .await
                .map_err(|e| LorekeepError::Embedding {
                    message: "embedding request failed".to_string(),
                    source: Some(Box::new(e)),
                })?;
            out.push(response.embedding);
        }
        Ok(out)
    }
}
