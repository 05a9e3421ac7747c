// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Lorekeep configuration system.

use lorekeep_config::{ConfigError, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_lorekeep_config() {
    let toml = r#"
[agent]
name = "test-dm"
log_level = "debug"

[vault]
path = "/tmp/campaign"

[ollama]
base_url = "http://127.0.0.1:11434"
narrative_model = "llama3.2"
embedding_model = "nomic-embed-text"

[claude]
api_key = "sk-ant-123"
ruling_model = "claude-3-5-sonnet-20241022"

[rag]
chunk_size = 256
chunk_overlap = 32
top_k = 3
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "test-dm");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.vault.path, "/tmp/campaign");
    assert_eq!(config.ollama.base_url, "http://127.0.0.1:11434");
    assert_eq!(config.claude.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.rag.chunk_size, 256);
    assert_eq!(config.rag.chunk_overlap, 32);
    assert_eq!(config.rag.top_k, 3);
}

/// Empty TOML falls back to compiled defaults.
#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").expect("empty TOML should deserialize");
    assert_eq!(config.agent.name, "lorekeep");
    assert_eq!(config.vault.path, "data");
    assert_eq!(config.rag.chunk_size, 512);
    assert_eq!(config.rag.top_k, 5);
}

/// Unknown field in a section produces an UnknownKey error with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[rag]
chunk_sise = 128
"#;
    let errors = load_and_validate_str(toml).expect_err("typo should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "chunk_sise" && suggestion.as_deref() == Some("chunk_size")
    )));
}

/// Semantic validation rejects an overlap that swallows the window.
#[test]
fn validation_rejects_degenerate_chunking() {
    let toml = r#"
[rag]
chunk_size = 64
chunk_overlap = 100
"#;
    let errors = load_and_validate_str(toml).expect_err("overlap >= chunk_size should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("chunk_overlap")))
    );
}

/// Wrong value type is reported as InvalidType, not a panic.
#[test]
fn wrong_type_produces_invalid_type_error() {
    let toml = r#"
[rag]
top_k = "five"
"#;
    let errors = load_and_validate_str(toml).expect_err("string for usize should fail");
    assert!(!errors.is_empty());
}
