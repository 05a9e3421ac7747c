// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Lorekeep integration tests.
//!
//! Provides mock capability implementations for fast, deterministic,
//! CI-runnable tests without Ollama or the Anthropic API.
//!
//! # Components
//!
//! - [`MockProvider`] - FIFO-queue model provider with request capture
//! - [`FailingProvider`] - provider that always errors (error paths)
//! - [`MockEmbedder`] - deterministic hash-based embedding backend
//! - [`FailingEmbedder`] - embedder that always errors (degrade paths)

pub mod mock_embedder;
pub mod mock_provider;

pub use mock_embedder::{FailingEmbedder, MockEmbedder};
pub use mock_provider::{FailingProvider, MockProvider};
