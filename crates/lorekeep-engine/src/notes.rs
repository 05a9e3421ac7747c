// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session log written to the vault's `notes/` directory.
//!
//! Each event lands as a timestamped Markdown block in a rolling daily note,
//! viewable and editable alongside the rest of the vault in Obsidian.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use lorekeep_core::LorekeepError;
use lorekeep_vault::Vault;

/// Appends session events (player actions, DM narration, rulings) to a
/// Markdown note in the vault.
pub struct NoteTaker {
    vault: Arc<Vault>,
    note_id: String,
}

impl NoteTaker {
    /// Create a note taker. Without an explicit `note_id`, events roll into
    /// a daily note named `session-YYYYMMDD`.
    pub fn new(vault: Arc<Vault>, note_id: Option<String>) -> Self {
        let note_id =
            note_id.unwrap_or_else(|| format!("session-{}", Utc::now().format("%Y%m%d")));
        Self { vault, note_id }
    }

    pub fn note_id(&self) -> &str {
        &self.note_id
    }

    /// Record one event as `**[timestamp] role:**` followed by the content.
    pub async fn note_event(&self, role: &str, content: &str) -> Result<(), LorekeepError> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let block = format!("**[{timestamp}] {role}:**\n{}", content.trim());
        self.append(&block).await
    }

    /// Append a block to the note, creating it with a `# note-id` header on
    /// first write.
    async fn append(&self, block: &str) -> Result<(), LorekeepError> {
        let path = self.vault.note_path(&self.note_id);
        let content = if self.vault.exists(&path) {
            let existing = self.vault.read_text(&path).await?;
            format!("{}\n\n{}\n", existing.trim_end(), block.trim())
        } else {
            format!("# {}\n\n{}\n", self.note_id, block.trim())
        };
        self.vault.write_text(&path, &content).await
    }
}
