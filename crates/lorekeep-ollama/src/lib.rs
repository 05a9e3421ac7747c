// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama provider for Lorekeep.
//!
//! One client serves two capabilities against a local Ollama instance:
//! narrative chat completions and document/query embeddings.

pub mod provider;
pub mod types;

pub use provider::OllamaProvider;
