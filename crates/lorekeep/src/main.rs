// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lorekeep - a conversational campaign assistant for tabletop RPGs.
//!
//! This is the binary entry point. One process runs one campaign, rooted
//! at the configured vault directory.

mod app;
mod serve;
mod shell;

use clap::{Parser, Subcommand};
use tracing::error;

use crate::app::App;

/// Lorekeep - a conversational campaign assistant for tabletop RPGs.
#[derive(Parser, Debug)]
#[command(name = "lorekeep", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest rulebooks, watch the vault, and run the interactive shell.
    Serve,
    /// Ingest all system documents into the retrieval index and exit.
    Ingest,
    /// Query the retrieval index and print the matching chunks.
    Query {
        /// Query text.
        text: String,
        /// Number of chunks to return (defaults to the configured top_k).
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },
    /// Run the interactive shell without the file watcher.
    Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match lorekeep_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            lorekeep_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let app = match App::build(&config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to build application");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) | None => serve::run_serve(app).await,
        Some(Commands::Ingest) => {
            let chunks = app.rag.ingest_all().await;
            println!("indexed {chunks} chunks");
            Ok(())
        }
        Some(Commands::Query { text, top_k }) => {
            let results = app.rag.query(&text, top_k).await;
            if results.is_empty() {
                println!("no matching chunks");
            } else {
                for (i, chunk) in results.iter().enumerate() {
                    println!("--- result {} ---\n{chunk}\n", i + 1);
                }
            }
            Ok(())
        }
        Some(Commands::Shell) => shell::run_shell(app.engine.clone()).await,
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lorekeep={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        super::Cli::command().debug_assert();
    }
}
