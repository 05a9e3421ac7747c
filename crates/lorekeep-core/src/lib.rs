// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lorekeep campaign assistant.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Lorekeep workspace. Model and embedding
//! backends implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LorekeepError;
pub use traits::{EmbeddingBackend, ModelProvider};
pub use types::{GenerateRequest, GenerateResult, Message, Response, TaskType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lorekeep_error_has_all_variants() {
        // Verify all 6 error variants exist and can be constructed.
        let _config = LorekeepError::Config("test".into());
        let _storage = LorekeepError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _provider = LorekeepError::Provider {
            message: "test".into(),
            source: None,
        };
        let _embedding = LorekeepError::Embedding {
            message: "test".into(),
            source: None,
        };
        let _index = LorekeepError::Index {
            message: "test".into(),
        };
        let _internal = LorekeepError::Internal("test".into());
    }

    #[test]
    fn error_display_carries_message() {
        let e = LorekeepError::Index {
            message: "dimension mismatch".into(),
        };
        assert_eq!(e.to_string(), "index error: dimension mismatch");
    }

    #[test]
    fn trait_objects_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ModelProvider>();
        assert_send_sync::<dyn EmbeddingBackend>();
    }
}
