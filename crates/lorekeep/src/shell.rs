// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lorekeep shell` command implementation.
//!
//! A thin interface adapter: reads player input with readline, wraps it in
//! the core `Message` contract, and prints the DM reply. Plain input is
//! narrative; `/rule <question>` routes to the ruling provider.

use std::sync::Arc;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use lorekeep_core::{LorekeepError, Message, TaskType};
use lorekeep_engine::Engine;

/// Session and user ids for the local shell adapter.
const SHELL_SESSION_ID: &str = "cli";
const SHELL_USER_ID: &str = "local";

/// Run the interactive REPL until `/quit`, Ctrl+C, or Ctrl+D.
pub async fn run_shell(engine: Arc<Engine>) -> Result<(), LorekeepError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| LorekeepError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("lorekeep shell");
    println!("Plain input is narrative; /rule <question> asks for a ruling. /quit exits.\n");

    loop {
        match rl.readline("lorekeep> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let (task, content) = parse_input(trimmed);
                let message = Message {
                    session_id: SHELL_SESSION_ID.to_string(),
                    user_id: SHELL_USER_ID.to_string(),
                    content: content.to_string(),
                    metadata: Default::default(),
                };

                match engine.handle_message(message, task).await {
                    Ok(response) => {
                        if response.content.is_empty() {
                            eprintln!("(no provider available; check ollama/claude config)");
                        } else {
                            println!("{}\n", response.content);
                        }
                    }
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }
    Ok(())
}

/// Split a shell line into its task type and content.
fn parse_input(line: &str) -> (TaskType, &str) {
    match line.strip_prefix("/rule ") {
        Some(rest) => (TaskType::Ruling, rest.trim()),
        None => (TaskType::Narrative, line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_prefix_routes_to_ruling() {
        let (task, content) = parse_input("/rule can I grapple two goblins?");
        assert_eq!(task, TaskType::Ruling);
        assert_eq!(content, "can I grapple two goblins?");
    }

    #[test]
    fn plain_input_is_narrative() {
        let (task, content) = parse_input("I open the door");
        assert_eq!(task, TaskType::Narrative);
        assert_eq!(content, "I open the door");
    }
}
