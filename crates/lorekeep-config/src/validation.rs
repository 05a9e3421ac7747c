// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and sane chunking parameters.

use crate::diagnostic::ConfigError;
use crate::model::LorekeepConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LorekeepConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.vault.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "vault.path must not be empty".to_string(),
        });
    }

    if config.ollama.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "ollama.base_url must not be empty".to_string(),
        });
    }

    if config.rag.chunk_size == 0 {
        errors.push(ConfigError::Validation {
            message: "rag.chunk_size must be greater than zero".to_string(),
        });
    }

    // The chunker forces a minimum advance of one character when the overlap
    // swallows the whole window, but a config like this is almost certainly a
    // mistake worth rejecting up front.
    if config.rag.chunk_size > 0 && config.rag.chunk_overlap >= config.rag.chunk_size {
        errors.push(ConfigError::Validation {
            message: format!(
                "rag.chunk_overlap ({}) must be smaller than rag.chunk_size ({})",
                config.rag.chunk_overlap, config.rag.chunk_size
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
