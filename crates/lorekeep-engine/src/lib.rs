// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation engine for the Lorekeep campaign assistant.
//!
//! Holds the per-player [`session`] store, the [`notes`] session log, and
//! the [`Engine`] pipeline that turns an incoming player message into a DM
//! reply with retrieved context, scene state, and character sheet attached.

pub mod engine;
pub mod notes;
pub mod session;

pub use engine::Engine;
pub use notes::NoteTaker;
pub use session::{Role, Session, SessionManager, SessionMessage, Turn};
