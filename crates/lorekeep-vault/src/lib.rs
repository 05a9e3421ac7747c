// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign vault for the Lorekeep assistant.
//!
//! The vault owns all durable bytes of a campaign: rulebook sources,
//! session notes, character sheets, NPC documents, scene state, and the
//! internal embedding index directory. This crate also provides the
//! debounced file watcher that drives incremental re-ingestion.

pub mod vault;
pub mod watcher;

pub use vault::{DOCUMENT_EXTENSIONS, Vault, is_document, sanitize_id};
pub use watcher::{VaultEvent, VaultWatcher};
