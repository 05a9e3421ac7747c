// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits consumed by the Lorekeep core.

pub mod embedding;
pub mod provider;

pub use embedding::EmbeddingBackend;
pub use provider::ModelProvider;
