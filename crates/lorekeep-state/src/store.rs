// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault-backed state store for scene JSON and character/NPC text blobs.
//!
//! Reads degrade to typed defaults (default scene, empty sheet) so a missing
//! or corrupt file never aborts message handling. Writes surface errors:
//! losing a save is a fault the operator must see.

use std::sync::Arc;

use tracing::warn;

use lorekeep_core::LorekeepError;
use lorekeep_vault::Vault;

use crate::scene::SceneState;

/// Read/write scene state and character/NPC Markdown from the vault.
#[derive(Debug, Clone)]
pub struct StateStore {
    vault: Arc<Vault>,
}

impl StateStore {
    pub fn new(vault: Arc<Vault>) -> Self {
        Self { vault }
    }

    /// Load `state/scene.json`; return the default scene if the file is
    /// missing or fails to parse (parse failure is logged and swallowed).
    pub async fn load_scene(&self) -> SceneState {
        let path = self.vault.scene_path();
        if !self.vault.exists(&path) {
            return SceneState::default();
        }
        match self.vault.read_text(&path).await {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(scene) => scene,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "scene.json is invalid, using default scene");
                    SceneState::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read scene.json, using default scene");
                SceneState::default()
            }
        }
    }

    /// Overwrite `state/scene.json` with the full scene. Last writer wins.
    pub async fn save_scene(&self, scene: &SceneState) -> Result<(), LorekeepError> {
        let json = scene
            .to_json_pretty()
            .map_err(|e| LorekeepError::Internal(format!("scene serialization failed: {e}")))?;
        self.vault.write_text(&self.vault.scene_path(), &json).await
    }

    /// Load a player's character sheet as Markdown; empty string if missing.
    pub async fn load_character(&self, player_id: &str) -> String {
        self.load_blob(&self.vault.character_path(player_id)).await
    }

    /// Write a player's character sheet.
    pub async fn save_character(&self, player_id: &str, content: &str) -> Result<(), LorekeepError> {
        self.vault
            .write_text(&self.vault.character_path(player_id), content)
            .await
    }

    /// Load an NPC document as Markdown; empty string if missing.
    pub async fn load_npc(&self, npc_id: &str) -> String {
        self.load_blob(&self.vault.npc_path(npc_id)).await
    }

    /// Write an NPC document.
    pub async fn save_npc(&self, npc_id: &str, content: &str) -> Result<(), LorekeepError> {
        self.vault
            .write_text(&self.vault.npc_path(npc_id), content)
            .await
    }

    async fn load_blob(&self, path: &std::path::Path) -> String {
        if !self.vault.exists(path) {
            return String::new();
        }
        match self.vault.read_text(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read document, treating as absent");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Location, Position};
    use tempfile::TempDir;

    fn store() -> (TempDir, StateStore) {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        vault.ensure_all_dirs().unwrap();
        (dir, StateStore::new(Arc::new(vault)))
    }

    #[tokio::test]
    async fn load_scene_on_empty_store_returns_default() {
        let (_dir, store) = store();
        let scene = store.load_scene().await;
        assert_eq!(scene.scene_id, "default");
        assert!(scene.positions.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_scene_is_idempotent() {
        let (_dir, store) = store();
        let scene = SceneState {
            scene_id: "tavern".into(),
            location: Location {
                name: "The Yawning Portal".into(),
                description: "Loud and crowded.".into(),
            },
            positions: vec![Position {
                entity_id: "bren".into(),
                entity_type: "player".into(),
                x: 0.0,
                y: 0.0,
                zone: "bar".into(),
            }],
            turn_order: vec!["bren".into()],
            timestamp: "2026-08-24T00:00:00Z".into(),
        };
        store.save_scene(&scene).await.unwrap();
        assert_eq!(store.load_scene().await, scene);
    }

    #[tokio::test]
    async fn corrupt_scene_file_falls_back_to_default() {
        let (_dir, store) = store();
        let path = store.vault.scene_path();
        store.vault.write_text(&path, "{not json").await.unwrap();
        let scene = store.load_scene().await;
        assert_eq!(scene.scene_id, "default");
    }

    #[tokio::test]
    async fn missing_character_reads_empty() {
        let (_dir, store) = store();
        assert_eq!(store.load_character("nobody").await, "");
    }

    #[tokio::test]
    async fn character_round_trip_with_unsafe_id() {
        let (_dir, store) = store();
        store
            .save_character("user#123", "# Sheet\nDEX 14")
            .await
            .unwrap();
        assert_eq!(store.load_character("user#123").await, "# Sheet\nDEX 14");
    }

    #[tokio::test]
    async fn npc_round_trip() {
        let (_dir, store) = store();
        store.save_npc("strahd", "Ancient vampire.").await.unwrap();
        assert_eq!(store.load_npc("strahd").await, "Ancient vampire.");
    }
}
