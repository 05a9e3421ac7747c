// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lorekeep serve` command implementation.
//!
//! Ingests system documents on startup, watches the vault for changes
//! (re-indexing changed rulebooks), and runs the interactive shell adapter
//! until the user exits.

use std::sync::Arc;

use tracing::{info, warn};

use lorekeep_core::LorekeepError;
use lorekeep_rag::RagStore;
use lorekeep_vault::{VaultEvent, VaultWatcher};

use crate::app::App;
use crate::shell;

/// Run the serve command: initial ingest, watcher, then the shell loop.
pub async fn run_serve(app: App) -> Result<(), LorekeepError> {
    let chunks = app.rag.ingest_all().await;
    info!(chunks, "initial ingest complete");

    let (watcher, mut events) = VaultWatcher::start(&app.vault)?;
    let rag = app.rag.clone();
    let watch_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            handle_vault_event(&rag, event).await;
        }
    });

    let result = shell::run_shell(app.engine.clone()).await;

    // Dropping the watcher closes the event channel and ends the task.
    drop(watcher);
    watch_task.abort();
    result
}

/// React to one debounced vault change.
async fn handle_vault_event(rag: &Arc<RagStore>, event: VaultEvent) {
    match event {
        VaultEvent::SystemDoc(path) => {
            let count = rag.reingest_path(&path).await;
            if count > 0 {
                info!(path = %path.display(), count, "re-ingested changed document");
            } else {
                warn!(path = %path.display(), "changed document yielded no chunks");
            }
        }
        VaultEvent::CharacterOrNpc(path) => {
            // Sheets are read fresh on every message; nothing to re-index.
            info!(path = %path.display(), "character/npc sheet changed");
        }
    }
}
