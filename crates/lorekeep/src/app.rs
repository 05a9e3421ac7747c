// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application wiring shared by the CLI commands.
//!
//! Builds the vault, retrieval store, state store, providers, router, and
//! engine from a validated configuration. One process = one campaign.

use std::sync::Arc;

use tracing::{info, warn};

use lorekeep_anthropic::ClaudeProvider;
use lorekeep_config::LorekeepConfig;
use lorekeep_core::{LorekeepError, ModelProvider};
use lorekeep_engine::{Engine, NoteTaker, SessionManager};
use lorekeep_ollama::OllamaProvider;
use lorekeep_rag::{RagStore, VectorIndex};
use lorekeep_router::ModelRouter;
use lorekeep_state::StateStore;
use lorekeep_vault::Vault;

/// Database filename inside the vault's `_index/` directory.
const INDEX_DB_NAME: &str = "rag.db";

/// Everything a command needs, fully wired.
pub struct App {
    pub vault: Arc<Vault>,
    pub rag: Arc<RagStore>,
    pub engine: Arc<Engine>,
}

impl App {
    /// Build the application from configuration.
    ///
    /// Ollama serves both narrative generation and embeddings. Claude is
    /// wired only when an API key is configured; without it the ruling
    /// route falls back to Ollama.
    pub async fn build(config: &LorekeepConfig) -> Result<Self, LorekeepError> {
        let vault = Arc::new(Vault::new(&config.vault.path));
        vault.ensure_all_dirs()?;

        let ollama = Arc::new(OllamaProvider::new(
            &config.ollama.base_url,
            config.ollama.narrative_model.clone(),
            config.ollama.embedding_model.clone(),
        )?);

        let index = VectorIndex::open(&vault.index_dir().join(INDEX_DB_NAME)).await?;
        let rag = Arc::new(RagStore::new(
            vault.clone(),
            index,
            ollama.clone(),
            config.rag.clone(),
        ));

        let api_key = resolve_claude_key(
            config.claude.api_key.as_deref(),
            std::env::var("ANTHROPIC_API_KEY").ok(),
        );
        let ruling: Option<Arc<dyn ModelProvider>> = match api_key {
            Some(key) => {
                info!(model = %config.claude.ruling_model, "claude ruling provider enabled");
                Some(Arc::new(ClaudeProvider::new(
                    &key,
                    &config.claude.api_version,
                    config.claude.ruling_model.clone(),
                )?))
            }
            None => {
                warn!("no claude api key configured, rulings fall back to ollama");
                None
            }
        };

        let router = Arc::new(ModelRouter::new(Some(ollama), ruling));
        let state = Arc::new(StateStore::new(vault.clone()));
        let sessions = Arc::new(SessionManager::new());
        let notes = Arc::new(NoteTaker::new(vault.clone(), None));

        let engine = Arc::new(Engine::new(
            router,
            Some(rag.clone()),
            state,
            sessions,
            Some(notes),
        ));

        Ok(Self { vault, rag, engine })
    }
}

/// Pick the Claude API key: the configured value wins, otherwise the
/// `ANTHROPIC_API_KEY` environment variable. Empty strings count as unset.
fn resolve_claude_key(configured: Option<&str>, env_key: Option<String>) -> Option<String> {
    match configured {
        Some(key) if !key.is_empty() => Some(key.to_string()),
        _ => env_key.filter(|key| !key.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_key_wins_over_environment() {
        assert_eq!(
            resolve_claude_key(Some("sk-config"), Some("sk-env".to_string())),
            Some("sk-config".to_string())
        );
    }

    #[test]
    fn environment_key_fills_in_when_config_is_unset() {
        assert_eq!(
            resolve_claude_key(None, Some("sk-env".to_string())),
            Some("sk-env".to_string())
        );
        assert_eq!(
            resolve_claude_key(Some(""), Some("sk-env".to_string())),
            Some("sk-env".to_string())
        );
    }

    #[test]
    fn empty_everywhere_means_no_key() {
        assert_eq!(resolve_claude_key(None, None), None);
        assert_eq!(resolve_claude_key(Some(""), Some(String::new())), None);
    }
}
