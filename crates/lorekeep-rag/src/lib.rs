// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval-augmented context pipeline.
//!
//! Turns vault documents into retrievable context: a sliding-window
//! [`chunker`], a SQLite-backed [`index`](crate::index::VectorIndex) holding
//! embeddings as BLOBs, and a [`RagStore`] that orchestrates ingest and
//! query against a pluggable [`EmbeddingBackend`](lorekeep_core::EmbeddingBackend).

pub mod chunker;
pub mod index;
pub mod store;
pub mod types;

pub use chunker::chunk;
pub use index::VectorIndex;
pub use store::RagStore;
pub use types::IndexEntry;
