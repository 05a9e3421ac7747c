// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed vector index with BLOB embedding storage.
//!
//! Stores (chunk, embedding, source) triples and answers nearest-neighbor
//! queries by cosine similarity computed in Rust over the stored vectors.
//! All reads and writes funnel through tokio-rusqlite's single background
//! thread, which is what makes concurrent ingest and query calls safe.

use std::path::Path;

use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;
use tracing::debug;

use lorekeep_core::LorekeepError;

use crate::types::{IndexEntry, blob_to_vec, cosine_similarity, vec_to_blob};

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Convert tokio_rusqlite errors into LorekeepError::Index.
fn index_err(e: tokio_rusqlite::Error) -> LorekeepError {
    LorekeepError::Index {
        message: e.to_string(),
    }
}

/// Convert connection-open errors into LorekeepError::Index.
fn open_err(e: rusqlite::Error) -> LorekeepError {
    LorekeepError::Index {
        message: e.to_string(),
    }
}

/// Persistent vector index over a single SQLite database.
///
/// Entries are keyed by deterministic chunk id; `upsert` overwrites in
/// place, and `delete_by_source` purges every row from one source so a
/// shrinking re-ingest leaves no stale chunks behind.
pub struct VectorIndex {
    conn: Connection,
}

impl VectorIndex {
    /// Open (or create) the index database at `path` and apply migrations.
    ///
    /// Refinery tracks applied migrations in its own schema history table,
    /// so reopening an existing database is a no-op.
    pub async fn open(path: &Path) -> Result<Self, LorekeepError> {
        let conn = Connection::open(path).await.map_err(open_err)?;
        Self::migrate(conn).await
    }

    /// Open an in-memory index (tests).
    pub async fn open_in_memory() -> Result<Self, LorekeepError> {
        let conn = Connection::open_in_memory().await.map_err(open_err)?;
        Self::migrate(conn).await
    }

    /// Apply pending migrations on the connection's background thread.
    async fn migrate(conn: Connection) -> Result<Self, LorekeepError> {
        conn.call(|conn| embedded::migrations::runner().run(conn).map(|_| ()))
            .await
            .map_err(|e| LorekeepError::Index {
                message: e.to_string(),
            })?;
        Ok(Self { conn })
    }

    /// Insert or overwrite entries by id. The whole batch is validated
    /// before any write: a malformed embedding (non-finite values, empty,
    /// or dimensionality differing from the index's established dimension)
    /// fails the call with zero rows written.
    pub async fn upsert(&self, entries: Vec<IndexEntry>) -> Result<(), LorekeepError> {
        if entries.is_empty() {
            return Ok(());
        }

        let expected_dim = match self.dimension().await? {
            Some(dim) => dim,
            None => entries[0].embedding.len(),
        };
        for entry in &entries {
            validate_embedding(&entry.id, &entry.embedding, expected_dim)?;
        }

        let count = entries.len();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT OR REPLACE INTO chunks (id, document, source, embedding, dim) VALUES (?1, ?2, ?3, ?4, ?5)",
                    )?;
                    for entry in &entries {
                        stmt.execute(rusqlite::params![
                            entry.id,
                            entry.document,
                            entry.source,
                            vec_to_blob(&entry.embedding),
                            entry.embedding.len() as i64,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(index_err)?;

        debug!(count, "upserted index entries");
        Ok(())
    }

    /// Return the `k` stored documents nearest to `embedding`, ranked by
    /// descending cosine similarity. Returns fewer than `k` when the index
    /// holds fewer rows, and nothing when it is empty.
    pub async fn query(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<String>, LorekeepError> {
        if k == 0 || embedding.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(String, Vec<f32>)> = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare("SELECT document, embedding FROM chunks")?;
                let rows = stmt
                    .query_map([], |row| {
                        let document: String = row.get(0)?;
                        let blob: Vec<u8> = row.get(1)?;
                        Ok((document, blob_to_vec(&blob)))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
            .map_err(index_err)?;

        let mut scored: Vec<(String, f32)> = rows
            .into_iter()
            .filter(|(_, stored)| stored.len() == embedding.len())
            .map(|(document, stored)| {
                let similarity = cosine_similarity(embedding, &stored);
                (document, similarity)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored.into_iter().map(|(document, _)| document).collect())
    }

    /// Remove every entry whose source equals the given value.
    ///
    /// Called before re-ingesting a changed file so a smaller chunk count
    /// cannot leave orphaned stale rows.
    pub async fn delete_by_source(&self, source: &str) -> Result<(), LorekeepError> {
        let source = source.to_string();
        let deleted = self
            .conn
            .call(move |conn| {
                let n = conn.execute("DELETE FROM chunks WHERE source = ?1", [source])?;
                Ok(n)
            })
            .await
            .map_err(index_err)?;
        debug!(deleted, "deleted index entries by source");
        Ok(())
    }

    /// Number of entries currently stored.
    pub async fn count(&self) -> Result<usize, LorekeepError> {
        let n: i64 = self
            .conn
            .call(|conn| {
                let n =
                    conn.query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))?;
                Ok(n)
            })
            .await
            .map_err(index_err)?;
        Ok(n as usize)
    }

    /// The embedding dimensionality established by the first stored entry,
    /// or `None` while the index is empty.
    async fn dimension(&self) -> Result<Option<usize>, LorekeepError> {
        let dim: Option<i64> = self
            .conn
            .call(|conn| {
                let dim = conn
                    .query_row("SELECT dim FROM chunks LIMIT 1", [], |row| row.get(0))
                    .optional()?;
                Ok(dim)
            })
            .await
            .map_err(index_err)?;
        Ok(dim.map(|d| d as usize))
    }
}

/// Reject embeddings that would corrupt similarity scoring.
fn validate_embedding(id: &str, embedding: &[f32], expected_dim: usize) -> Result<(), LorekeepError> {
    if embedding.is_empty() {
        return Err(LorekeepError::Index {
            message: format!("entry `{id}` has an empty embedding"),
        });
    }
    if embedding.len() != expected_dim {
        return Err(LorekeepError::Index {
            message: format!(
                "entry `{id}` has dimension {} but the index expects {expected_dim}",
                embedding.len()
            ),
        });
    }
    if embedding.iter().any(|v| !v.is_finite()) {
        return Err(LorekeepError::Index {
            message: format!("entry `{id}` contains non-finite values"),
        });
    }
    Ok(())
}
