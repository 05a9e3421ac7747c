// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Debounced vault file watching.
//!
//! Watches `systems/`, `characters/`, and `npcs/` and forwards classified
//! change events over a tokio mpsc channel. The channel is one-way: the
//! application reacts to a system-document event by deleting the source from
//! the index and re-ingesting it; character/NPC events need no index work
//! because sheets are re-read from disk on every message.
//!
//! Burst coalescing comes from the debouncer's window; no further
//! de-duplication is performed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use tokio::sync::mpsc;
use tracing::{info, warn};

use lorekeep_core::LorekeepError;

use crate::vault::{Vault, is_document};

/// Debounce window for filesystem events.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// A classified vault change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEvent {
    /// A source document under `systems/` changed; re-ingest it.
    SystemDoc(PathBuf),
    /// A character sheet or NPC document changed.
    CharacterOrNpc(PathBuf),
}

/// Watches the vault content directories and emits [`VaultEvent`]s.
///
/// Dropping the watcher stops the underlying filesystem watch.
pub struct VaultWatcher {
    // Held for its Drop; the debouncer thread owns the notify watcher.
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl VaultWatcher {
    /// Start watching `systems/`, `characters/`, and `npcs/`.
    ///
    /// Returns the watcher handle and the receiving end of the event channel.
    /// Directories are created first so the watch never races vault setup.
    pub fn start(vault: &Vault) -> Result<(Self, mpsc::Receiver<VaultEvent>), LorekeepError> {
        vault.ensure_all_dirs()?;

        let (tx, rx) = mpsc::channel(64);
        let systems = vault.systems_dir();
        let characters = vault.characters_dir();
        let npcs = vault.npcs_dir();

        let classifier = EventClassifier {
            systems: systems.clone(),
            characters: characters.clone(),
            npcs: npcs.clone(),
        };

        let mut debouncer = new_debouncer(DEBOUNCE_WINDOW, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    for event in events {
                        if let Some(vault_event) = classifier.classify(&event.path) {
                            // blocking_send: we are on the debouncer thread,
                            // not a tokio worker.
                            if tx.blocking_send(vault_event).is_err() {
                                return; // receiver dropped, shutting down
                            }
                        }
                    }
                }
                Err(e) => warn!(error = %e, "vault watch error"),
            }
        })
        .map_err(|e| LorekeepError::Internal(format!("failed to start vault watcher: {e}")))?;

        for dir in [&systems, &characters, &npcs] {
            debouncer
                .watcher()
                .watch(dir, RecursiveMode::Recursive)
                .map_err(|e| {
                    LorekeepError::Internal(format!("failed to watch {}: {e}", dir.display()))
                })?;
        }

        info!(root = %vault.root().display(), "vault watcher started");
        Ok((
            Self {
                _debouncer: debouncer,
            },
            rx,
        ))
    }
}

/// Maps changed paths to vault event categories.
struct EventClassifier {
    systems: PathBuf,
    characters: PathBuf,
    npcs: PathBuf,
}

impl EventClassifier {
    fn classify(&self, path: &Path) -> Option<VaultEvent> {
        if !is_document(path) {
            return None;
        }
        if path.starts_with(&self.systems) {
            Some(VaultEvent::SystemDoc(path.to_path_buf()))
        } else if path.starts_with(&self.characters) || path.starts_with(&self.npcs) {
            // Sheets are Markdown only; a stray .txt here is ignored.
            if path.extension().and_then(|e| e.to_str()) == Some("md") {
                Some(VaultEvent::CharacterOrNpc(path.to_path_buf()))
            } else {
                None
            }
        } else {
            None
        }
    }
}
