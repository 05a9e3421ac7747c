// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model provider trait for LLM backends (Ollama, Claude, etc.).

use async_trait::async_trait;

use crate::error::LorekeepError;
use crate::types::{GenerateRequest, GenerateResult};

/// Capability interface for language-model backends.
///
/// Providers handle communication with a single model API. The router
/// composes up to two of them (narrative + ruling); providers themselves
/// implement no retry or routing logic.
#[async_trait]
pub trait ModelProvider: Send + Sync + 'static {
    /// Provider identifier (e.g. `"ollama"`, `"claude"`).
    fn name(&self) -> &str;

    /// The model used when a request carries no override.
    fn default_model(&self) -> &str;

    /// Generate a completion for the given request.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResult, LorekeepError>;

    /// Whether the provider can currently be used (backend reachable, key set).
    async fn is_available(&self) -> bool {
        true
    }
}
