// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding backend trait for vector embedding generation.

use async_trait::async_trait;

use crate::error::LorekeepError;

/// Capability interface for text embedding backends.
///
/// Powers semantic retrieval by converting document chunks and queries
/// into fixed-dimensionality vectors.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync + 'static {
    /// Embed each text, returning one vector per input in the same order.
    ///
    /// Empty input yields empty output without touching the backend.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LorekeepError>;
}
