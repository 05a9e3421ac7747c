// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The message-handling pipeline.
//!
//! Single entrypoint for player messages: loads session history, retrieved
//! rule context, scene state, and the player's character sheet; assembles a
//! system prompt; routes the generation call; persists a scene update when
//! the reply carries one; and appends both sides to the session notes.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use lorekeep_core::{GenerateRequest, LorekeepError, Message, Response, TaskType};
use lorekeep_rag::RagStore;
use lorekeep_router::ModelRouter;
use lorekeep_state::{SceneState, StateStore};

use crate::notes::NoteTaker;
use crate::session::{DEFAULT_MAX_TURNS, Role, SessionManager};

static SCENE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```json\s*([\s\S]*?)\s*```").unwrap_or_else(|e| panic!("invalid regex: {e}"))
});

/// Parse the first ```json fenced block in `text` as a scene update.
/// Returns `None` when there is no fence or its payload is not valid JSON.
fn extract_scene_update(text: &str) -> Option<serde_json::Value> {
    let captured = SCENE_FENCE.captures(text)?.get(1)?;
    serde_json::from_str(captured.as_str().trim()).ok()
}

/// Orchestrates one player message end to end.
///
/// Retrieval and note taking are optional; the engine runs (with reduced
/// context) when either is absent, and their runtime failures degrade to
/// warnings rather than failing the reply.
pub struct Engine {
    router: Arc<ModelRouter>,
    rag: Option<Arc<RagStore>>,
    state: Arc<StateStore>,
    sessions: Arc<SessionManager>,
    notes: Option<Arc<NoteTaker>>,
}

impl Engine {
    pub fn new(
        router: Arc<ModelRouter>,
        rag: Option<Arc<RagStore>>,
        state: Arc<StateStore>,
        sessions: Arc<SessionManager>,
        notes: Option<Arc<NoteTaker>>,
    ) -> Self {
        Self {
            router,
            rag,
            state,
            sessions,
            notes,
        }
    }

    /// Handle one player message and produce the DM reply.
    ///
    /// The user turn is recorded before generation, so it stays in history
    /// even when the provider call fails. A reply carrying a ```json fence
    /// replaces the scene state wholesale; a malformed fence is ignored,
    /// but a failed scene write is an error.
    pub async fn handle_message(
        &self,
        message: Message,
        task: TaskType,
    ) -> Result<Response, LorekeepError> {
        let session = self.sessions.get_or_create(&message.session_id).await;
        session
            .lock()
            .await
            .add_turn(Role::User, message.content.clone());

        let rag_context = match &self.rag {
            Some(rag) => rag.query(&message.content, None).await.join("\n\n---\n\n"),
            None => String::new(),
        };

        let scene = self.state.load_scene().await;
        let mut scene_block = format!(
            "Current scene: {}. {}",
            scene.location.name, scene.location.description
        );
        if !scene.positions.is_empty() {
            let positions: Vec<String> = scene
                .positions
                .iter()
                .map(|p| format!("{}({})", p.entity_id, p.entity_type))
                .collect();
            scene_block.push_str("\nPositions: ");
            scene_block.push_str(&positions.join(", "));
        }

        let character = self.state.load_character(&message.user_id).await;
        let character_block = if character.is_empty() {
            "No character sheet for this player yet.".to_string()
        } else {
            format!("Player character sheet:\n{character}")
        };

        let mut system = format!(
            "You are the Dungeon Master for a TTRPG. Use only the provided rule context when making rulings.\n\n{scene_block}\n\n{character_block}\n"
        );
        if !rag_context.is_empty() {
            system.push_str(&format!("\n\nRelevant rules/source material:\n{rag_context}"));
        }

        // The prompt is the newest message in the model-shaped history;
        // older turns are context the session retains, not replayed here.
        let prompt = {
            let session = session.lock().await;
            let mut messages = session.to_messages(DEFAULT_MAX_TURNS);
            messages
                .pop()
                .map(|m| m.content)
                .unwrap_or_else(|| message.content.clone())
        };

        let result = self
            .router
            .generate(task, GenerateRequest::new(prompt, Some(system)))
            .await?;

        let reply = result.text.trim().to_string();
        session.lock().await.add_turn(Role::Assistant, reply.clone());

        if let Some(update) = extract_scene_update(&reply) {
            match SceneState::from_value(update) {
                Ok(new_scene) => {
                    // A malformed fence degrades, but losing a save is a
                    // storage-write fault and must surface to the caller.
                    self.state.save_scene(&new_scene).await?;
                    debug!(scene_id = %new_scene.scene_id, "scene state replaced from reply");
                }
                Err(e) => {
                    warn!(error = %e, "reply carried an unusable scene update, ignoring");
                }
            }
        }

        if let Some(notes) = &self.notes {
            if let Err(e) = notes.note_event("player", &message.content).await {
                warn!(error = %e, "could not record player note");
            }
            if let Err(e) = notes.note_event("dm", &reply).await {
                warn!(error = %e, "could not record dm note");
            }
        }

        let mut response = Response {
            content: reply,
            metadata: Default::default(),
        };
        response
            .metadata
            .insert("model".to_string(), result.model);
        response
            .metadata
            .insert("task".to_string(), task.to_string());
        Ok(response)
    }
}
