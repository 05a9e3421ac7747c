// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Lorekeep campaign assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Lorekeep configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
/// One process = one campaign.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LorekeepConfig {
    /// Game-master identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Campaign vault location.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Ollama backend settings (narrative model + embeddings).
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Claude backend settings (ruling model).
    #[serde(default)]
    pub claude: ClaudeConfig,

    /// Retrieval pipeline settings.
    #[serde(default)]
    pub rag: RagConfig,
}

/// Game-master identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "lorekeep".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Campaign vault configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Vault root directory holding systems/, notes/, characters/, npcs/, state/.
    #[serde(default = "default_vault_path")]
    pub path: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: default_vault_path(),
        }
    }
}

fn default_vault_path() -> String {
    "data".to_string()
}

/// Ollama backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the local Ollama instance.
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,

    /// Model used for narrative generation.
    #[serde(default = "default_narrative_model")]
    pub narrative_model: String,

    /// Model used for chunk and query embeddings.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            narrative_model: default_narrative_model(),
            embedding_model: default_embedding_model(),
        }
    }
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_narrative_model() -> String {
    "llama3.2".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

/// Claude backend configuration.
///
/// The ruling route is only built when an API key is present (config or
/// `ANTHROPIC_API_KEY` env var).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClaudeConfig {
    /// Anthropic API key. Falls back to the `ANTHROPIC_API_KEY` env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for rules adjudication and planning.
    #[serde(default = "default_ruling_model")]
    pub ruling_model: String,

    /// Anthropic API version header value.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            ruling_model: default_ruling_model(),
            api_version: default_api_version(),
        }
    }
}

fn default_ruling_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RagConfig {
    /// Sliding-window size in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between adjacent chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Default number of chunks returned per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
        }
    }
}

fn default_chunk_size() -> usize {
    512
}

fn default_chunk_overlap() -> usize {
    64
}

fn default_top_k() -> usize {
    5
}
