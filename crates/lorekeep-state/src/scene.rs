// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scene state model: who and what is where.
//!
//! Stored as pretty-printed JSON for VTT/frontend sync. Every field carries
//! a serde default so a partial update block like `{"scene_id":"room1"}`
//! still parses into a full scene.

use serde::{Deserialize, Serialize};

/// Spatial position of an entity in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub entity_id: String,
    /// `"player"` | `"npc"` | `"object"`.
    #[serde(default = "default_entity_type")]
    pub entity_type: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub zone: String,
}

fn default_entity_type() -> String {
    "npc".to_string()
}

/// Current scene location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The current in-fiction location and entity positions for a campaign.
///
/// The scene is a file-backed value with exactly two transitions: loaded,
/// then wholesale replaced by a model-emitted update. Saves always overwrite
/// the full document; there is no merge logic and none should be added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    #[serde(default = "default_scene_id")]
    pub scene_id: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub turn_order: Vec<String>,
    #[serde(default)]
    pub timestamp: String,
}

fn default_scene_id() -> String {
    "default".to_string()
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            scene_id: default_scene_id(),
            location: Location::default(),
            positions: Vec::new(),
            turn_order: Vec::new(),
            timestamp: String::new(),
        }
    }
}

impl SceneState {
    /// Serialize as human-pretty JSON (2-space indent, declaration key order).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from a JSON value, tolerating missing fields via defaults.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
