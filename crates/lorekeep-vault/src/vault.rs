// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault directory layout and text storage.
//!
//! One Lorekeep process = one campaign; the vault root holds a single
//! Obsidian-compatible vault:
//!
//! ```text
//! systems/    - rulebooks (Markdown/TXT)
//! notes/      - session notes
//! characters/ - player sheets (Markdown)
//! npcs/       - NPC roster (Markdown)
//! state/      - scene.json
//! _index/     - internal (embedding database); not for Obsidian
//! ```

use std::path::{Path, PathBuf};

use lorekeep_core::LorekeepError;

/// Extensions recognized as source documents for ingestion.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "txt"];

/// Unified vault root for system content, campaign notes, characters, NPCs,
/// and state. All durable bytes of the campaign live under this root.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Create a vault rooted at the given directory. No I/O happens here;
    /// call [`Vault::ensure_all_dirs`] before first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Vault root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create vault subdirectories if they do not exist.
    pub fn ensure_all_dirs(&self) -> Result<(), LorekeepError> {
        for name in ["systems", "notes", "characters", "npcs", "state", "_index"] {
            std::fs::create_dir_all(self.root.join(name)).map_err(LorekeepError::storage)?;
        }
        Ok(())
    }

    // Path helpers

    pub fn systems_dir(&self) -> PathBuf {
        self.root.join("systems")
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join("notes")
    }

    pub fn characters_dir(&self) -> PathBuf {
        self.root.join("characters")
    }

    pub fn npcs_dir(&self) -> PathBuf {
        self.root.join("npcs")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join("state")
    }

    pub fn index_dir(&self) -> PathBuf {
        self.root.join("_index")
    }

    /// Path to the scene state JSON document.
    pub fn scene_path(&self) -> PathBuf {
        self.state_dir().join("scene.json")
    }

    /// Path to a player's character sheet (Markdown). The id is sanitized
    /// to a safe filename.
    pub fn character_path(&self, player_id: &str) -> PathBuf {
        self.characters_dir()
            .join(format!("{}.md", sanitize_id(player_id)))
    }

    /// Path to an NPC document (Markdown).
    pub fn npc_path(&self, npc_id: &str) -> PathBuf {
        self.npcs_dir().join(format!("{}.md", sanitize_id(npc_id)))
    }

    /// Path to a note file (e.g. `session-20260824.md`).
    pub fn note_path(&self, note_id: &str) -> PathBuf {
        self.notes_dir().join(format!("{note_id}.md"))
    }

    // Read/write

    /// Read a file as UTF-8 text.
    pub async fn read_text(&self, path: &Path) -> Result<String, LorekeepError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(LorekeepError::storage)
    }

    /// Write UTF-8 text, creating parent directories if needed.
    pub async fn write_text(&self, path: &Path, content: &str) -> Result<(), LorekeepError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(LorekeepError::storage)?;
        }
        tokio::fs::write(path, content)
            .await
            .map_err(LorekeepError::storage)
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// List Markdown and TXT files under `systems/` (recursive, sorted).
    pub fn list_system_files(&self) -> Result<Vec<PathBuf>, LorekeepError> {
        let mut out = Vec::new();
        collect_documents(&self.systems_dir(), &mut out)?;
        out.sort();
        Ok(out)
    }
}

/// Replace any character outside alphanumerics, `-`, `_` with `_`, producing
/// a safe filename stem for user/NPC-supplied identifiers.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Whether a path carries a recognized document extension.
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            DOCUMENT_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

fn collect_documents(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), LorekeepError> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir).map_err(LorekeepError::storage)? {
        let entry = entry.map_err(LorekeepError::storage)?;
        let path = entry.path();
        if path.is_dir() {
            collect_documents(&path, out)?;
        } else if is_document(&path) {
            out.push(path);
        }
    }
    Ok(())
}
