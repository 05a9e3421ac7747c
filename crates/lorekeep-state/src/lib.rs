// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scene and character state for the Lorekeep campaign assistant.
//!
//! The scene is a small structured world-state document persisted as JSON;
//! character sheets and NPC documents are free-form Markdown keyed by id.

pub mod scene;
pub mod store;

pub use scene::{Location, Position, SceneState};
pub use store::StateStore;
