// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lorekeep.toml` > `~/.config/lorekeep/lorekeep.toml`
//! > `/etc/lorekeep/lorekeep.toml` with environment variable overrides via the
//! `LOREKEEP_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LorekeepConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lorekeep/lorekeep.toml` (system-wide)
/// 3. `~/.config/lorekeep/lorekeep.toml` (user XDG config)
/// 4. `./lorekeep.toml` (local directory)
/// 5. `LOREKEEP_*` environment variables
pub fn load_config() -> Result<LorekeepConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LorekeepConfig::default()))
        .merge(Toml::file("/etc/lorekeep/lorekeep.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("lorekeep/lorekeep.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("lorekeep.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<LorekeepConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LorekeepConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LorekeepConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LorekeepConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `LOREKEEP_OLLAMA_NARRATIVE_MODEL` must
/// map to `ollama.narrative_model`, not `ollama.narrative.model`.
fn env_provider() -> Env {
    Env::prefixed("LOREKEEP_").map(|key| {
        // `key` arrives in the env var's original (upper) case with the
        // prefix stripped. Example: LOREKEEP_OLLAMA_NARRATIVE_MODEL -> the
        // lowered "ollama_narrative_model" -> "ollama.narrative_model".
        let key = key.as_str().to_ascii_lowercase();
        let mapped = key
            .replacen("agent_", "agent.", 1)
            .replacen("vault_", "vault.", 1)
            .replacen("ollama_", "ollama.", 1)
            .replacen("claude_", "claude.", 1)
            .replacen("rag_", "rag.", 1);
        mapped.into()
    })
}
