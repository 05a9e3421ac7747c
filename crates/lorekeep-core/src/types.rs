// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across capability traits and the Lorekeep pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Coarse routing label selecting which model route handles a request.
///
/// Narrative (flavor text, descriptions) goes to the fast/local provider;
/// ruling (rules adjudication, planning) goes to the stronger/remote one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Narrative,
    Ruling,
}

/// A request to a model provider.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// The user-visible prompt text.
    pub prompt: String,
    /// Optional system instruction.
    pub system: Option<String>,
    /// Model override; `None` uses the provider's default model.
    pub model: Option<String>,
    /// Response token cap; `None` uses the provider's default.
    pub max_tokens: Option<u32>,
}

impl GenerateRequest {
    /// Build a request from prompt and optional system text.
    pub fn new(prompt: impl Into<String>, system: Option<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system,
            ..Self::default()
        }
    }
}

/// Result of a single completion call.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Generated text (may be empty when no provider was available).
    pub text: String,
    /// Model that produced the text, or `"none"`.
    pub model: String,
    /// Provider-specific response payload, when one exists.
    pub raw: Option<serde_json::Value>,
}

impl GenerateResult {
    /// The result returned when no provider is configured for a route.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            model: "none".to_string(),
            raw: None,
        }
    }
}

/// An incoming user message from any interface adapter.
///
/// The core speaks only this contract; platform adapters translate their
/// events into `Message` and deliver the reply text back to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub session_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// An outgoing assistant response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}
