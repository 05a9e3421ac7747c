// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock embedding backend for deterministic testing.

use async_trait::async_trait;

use lorekeep_core::{EmbeddingBackend, LorekeepError};

/// Deterministic embedding backend.
///
/// Hashes each input into a fixed-dimension vector, so identical texts
/// always embed identically and different texts almost always differ. The
/// first component is pinned to 1.0 so no vector has zero norm.
pub struct MockEmbedder {
    dim: usize,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

#[async_trait]
impl EmbeddingBackend for MockEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LorekeepError> {
        Ok(texts.iter().map(|t| embed_one(t, self.dim)).collect())
    }
}

fn embed_one(text: &str, dim: usize) -> Vec<f32> {
    (0..dim)
        .map(|j| {
            if j == 0 {
                return 1.0;
            }
            // FNV-1a seeded per dimension, folded into [-1, 1).
            let mut h: u32 = 2166136261_u32.wrapping_mul(j as u32 | 1);
            for b in text.bytes() {
                h = (h ^ u32::from(b)).wrapping_mul(16777619);
            }
            (h % 2000) as f32 / 1000.0 - 1.0
        })
        .collect()
}

/// An embedding backend whose every call fails, for exercising the
/// degrade-to-empty retrieval paths.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingBackend for FailingEmbedder {
    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, LorekeepError> {
        Err(LorekeepError::Embedding {
            message: "mock embedding failure".to_string(),
            source: None,
        })
    }
}
