// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-player conversation sessions.
//!
//! One session per player/channel identifier, held in memory for the life of
//! the process. History is unbounded; prompt assembly takes only the most
//! recent turns.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Default number of recent turns included in prompt context.
pub const DEFAULT_MAX_TURNS: usize = 20;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single exchange entry: one user message or one assistant reply.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// A role-tagged history entry shaped for model consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMessage {
    pub role: String,
    pub content: String,
}

/// Per-player session: conversation history and free-form metadata, keyed
/// by the player/channel identifier (e.g. a Discord user id).
#[derive(Debug)]
pub struct Session {
    id: String,
    turns: Vec<Turn>,
    metadata: HashMap<String, String>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            turns: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// The player/channel identifier this session belongs to.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn add_turn(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn {
            role,
            content: content.into(),
        });
    }

    /// The last `max_turns` turns, oldest first.
    pub fn recent_turns(&self, max_turns: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(max_turns);
        &self.turns[start..]
    }

    /// The same slice as [`Session::recent_turns`], reshaped into
    /// role-string messages for model consumption.
    pub fn to_messages(&self, max_turns: usize) -> Vec<SessionMessage> {
        self.recent_turns(max_turns)
            .iter()
            .map(|t| SessionMessage {
                role: t.role.as_str().to_string(),
                content: t.content.clone(),
            })
            .collect()
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// In-memory session store. One campaign = one instance.
///
/// Sessions are shared as `Arc<Mutex<Session>>`; repeated lookups for the
/// same id return the same session object.
#[derive(Default)]
pub struct SessionManager {
    sessions: Mutex<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session for `session_id`, creating it on first use.
    pub async fn get_or_create(&self, session_id: &str) -> Arc<Mutex<Session>> {
        self.sessions
            .lock()
            .await
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(session_id))))
            .clone()
    }

    /// Fetch an existing session without creating one.
    pub async fn get(&self, session_id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.lock().await.get(session_id).cloned()
    }
}
