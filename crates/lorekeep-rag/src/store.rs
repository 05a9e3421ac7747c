// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingest/query orchestration over the chunker, embedding backend, and
//! vector index.
//!
//! Retrieval failures here degrade rather than abort: a document that cannot
//! be read or embedded is logged and skipped, and a failed query returns no
//! context so the conversation can continue without it.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use lorekeep_config::RagConfig;
use lorekeep_core::{EmbeddingBackend, LorekeepError};
use lorekeep_vault::Vault;

use crate::chunker::chunk;
use crate::index::VectorIndex;
use crate::types::IndexEntry;

/// Retrieval store: chunks vault documents, embeds them, and answers
/// similarity queries with the raw chunk texts.
pub struct RagStore {
    vault: Arc<Vault>,
    index: VectorIndex,
    embedder: Arc<dyn EmbeddingBackend>,
    cfg: RagConfig,
}

impl RagStore {
    pub fn new(
        vault: Arc<Vault>,
        index: VectorIndex,
        embedder: Arc<dyn EmbeddingBackend>,
        cfg: RagConfig,
    ) -> Self {
        Self {
            vault,
            index,
            embedder,
            cfg,
        }
    }

    /// Ingest one document: read, chunk, embed, upsert. Returns the number
    /// of chunks indexed.
    ///
    /// Unreadable files, empty files, and embedding batches whose length
    /// does not match the chunk count all log a warning and return 0 with
    /// the index untouched.
    pub async fn ingest_path(&self, path: &Path) -> usize {
        let source = path.display().to_string();

        let text = match self.vault.read_text(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(source, error = %e, "skipping unreadable document");
                return 0;
            }
        };

        let chunks = chunk(&text, self.cfg.chunk_size, self.cfg.chunk_overlap);
        if chunks.is_empty() {
            warn!(source, "document produced no chunks, skipping");
            return 0;
        }

        let embeddings = match self.embedder.embed(&chunks).await {
            Ok(embeddings) => embeddings,
            Err(e) => {
                warn!(source, error = %e, "embedding failed, skipping document");
                return 0;
            }
        };
        if embeddings.len() != chunks.len() {
            warn!(
                source,
                chunks = chunks.len(),
                embeddings = embeddings.len(),
                "embedding count mismatch, skipping document"
            );
            return 0;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (document, embedding))| IndexEntry {
                id: format!("{stem}_{i}"),
                embedding,
                document,
                source: source.clone(),
            })
            .collect();

        let count = entries.len();
        if let Err(e) = self.index.upsert(entries).await {
            warn!(source, error = %e, "index write failed, skipping document");
            return 0;
        }

        info!(source, count, "ingested document");
        count
    }

    /// Ingest every Markdown/TXT file under the vault's `systems/`
    /// directory. Returns the total number of chunks indexed; per-document
    /// failures are logged and skipped.
    pub async fn ingest_all(&self) -> usize {
        let files = match self.vault.list_system_files() {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "could not list system documents");
                return 0;
            }
        };

        let mut total = 0;
        for path in &files {
            total += self.ingest_path(path).await;
        }
        info!(files = files.len(), chunks = total, "ingest pass complete");
        total
    }

    /// Retrieve the chunks most similar to `text`, best first.
    ///
    /// `k` defaults to the configured `top_k`. Any failure (embedding,
    /// index) degrades to an empty result with a warning so callers can
    /// proceed without retrieved context.
    pub async fn query(&self, text: &str, k: Option<usize>) -> Vec<String> {
        let k = k.unwrap_or(self.cfg.top_k);
        if k == 0 || text.trim().is_empty() {
            return Vec::new();
        }

        let embedding = match self.embedder.embed(&[text.to_string()]).await {
            Ok(mut embeddings) if !embeddings.is_empty() => embeddings.remove(0),
            Ok(_) => {
                warn!("embedding backend returned no vector for query");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "query embedding failed, returning no context");
                return Vec::new();
            }
        };

        match self.index.query(&embedding, k).await {
            Ok(documents) => documents,
            Err(e) => {
                warn!(error = %e, "index query failed, returning no context");
                Vec::new()
            }
        }
    }

    /// Remove all indexed chunks originating from the given file.
    pub async fn delete_by_source(&self, path: &Path) -> Result<(), LorekeepError> {
        self.index
            .delete_by_source(&path.display().to_string())
            .await
    }

    /// Replace a document's chunks: purge existing rows for the source,
    /// then ingest it fresh. Used by the vault watcher on file changes so a
    /// document that shrank leaves no stale chunks behind.
    pub async fn reingest_path(&self, path: &Path) -> usize {
        if let Err(e) = self.delete_by_source(path).await {
            warn!(source = %path.display(), error = %e, "stale chunk purge failed");
        }
        self.ingest_path(path).await
    }

    /// Number of chunks currently indexed.
    pub async fn count(&self) -> Result<usize, LorekeepError> {
        self.index.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorekeep_test_utils::{FailingEmbedder, MockEmbedder};
    use tempfile::TempDir;

    fn rag_config() -> RagConfig {
        RagConfig {
            chunk_size: 16,
            chunk_overlap: 4,
            top_k: 3,
        }
    }

    async fn store_with(embedder: Arc<dyn EmbeddingBackend>) -> (TempDir, RagStore) {
        let dir = TempDir::new().unwrap();
        let vault = Arc::new(Vault::new(dir.path()));
        vault.ensure_all_dirs().unwrap();
        let index = VectorIndex::open_in_memory().await.unwrap();
        let store = RagStore::new(vault, index, embedder, rag_config());
        (dir, store)
    }

    #[tokio::test]
    async fn ingest_path_indexes_every_chunk() {
        let (_dir, store) = store_with(Arc::new(MockEmbedder::new(4))).await;
        let path = store.vault.systems_dir().join("rules.md");
        store
            .vault
            .write_text(&path, "The quick brown fox jumps over the lazy dog")
            .await
            .unwrap();

        let count = store.ingest_path(&path).await;
        assert!(count > 0);
        assert_eq!(store.count().await.unwrap(), count);
    }

    #[tokio::test]
    async fn missing_file_ingests_zero_chunks() {
        let (_dir, store) = store_with(Arc::new(MockEmbedder::new(4))).await;
        let path = store.vault.systems_dir().join("missing.md");
        assert_eq!(store.ingest_path(&path).await, 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_file_ingests_zero_chunks() {
        let (_dir, store) = store_with(Arc::new(MockEmbedder::new(4))).await;
        let path = store.vault.systems_dir().join("empty.md");
        store.vault.write_text(&path, "   \n\t ").await.unwrap();
        assert_eq!(store.ingest_path(&path).await, 0);
    }

    #[tokio::test]
    async fn embedding_failure_degrades_to_zero() {
        let (_dir, store) = store_with(Arc::new(FailingEmbedder)).await;
        let path = store.vault.systems_dir().join("rules.md");
        store.vault.write_text(&path, "some rules text").await.unwrap();
        assert_eq!(store.ingest_path(&path).await, 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn query_failure_degrades_to_empty() {
        let (_dir, store) = store_with(Arc::new(FailingEmbedder)).await;
        assert_eq!(store.query("anything", None).await, Vec::<String>::new());
    }

    #[tokio::test]
    async fn query_returns_at_most_top_k() {
        let (_dir, store) = store_with(Arc::new(MockEmbedder::new(4))).await;
        let path = store.vault.systems_dir().join("rules.md");
        store
            .vault
            .write_text(
                &path,
                "Grappling rules are resolved with opposed athletics checks \
                 and a grappled creature has speed zero until it escapes",
            )
            .await
            .unwrap();
        let count = store.ingest_path(&path).await;
        assert!(count > 3);

        let results = store.query("grappling", None).await;
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn ingest_all_walks_systems_directory() {
        let (_dir, store) = store_with(Arc::new(MockEmbedder::new(4))).await;
        let systems = store.vault.systems_dir();
        store
            .vault
            .write_text(&systems.join("a.md"), "combat rules here")
            .await
            .unwrap();
        store
            .vault
            .write_text(&systems.join("deep/b.txt"), "lore text here")
            .await
            .unwrap();

        let total = store.ingest_all().await;
        assert!(total >= 2);
        assert_eq!(store.count().await.unwrap(), total);
    }

    #[tokio::test]
    async fn reingest_replaces_stale_chunks() {
        let (_dir, store) = store_with(Arc::new(MockEmbedder::new(4))).await;
        let path = store.vault.systems_dir().join("rules.md");
        store
            .vault
            .write_text(&path, "a long original document with many words in it")
            .await
            .unwrap();
        let first = store.ingest_path(&path).await;
        assert!(first > 1);

        // Shrink the document; re-ingest must not leave stale rows.
        store.vault.write_text(&path, "short now").await.unwrap();
        let second = store.reingest_path(&path).await;
        assert!(second >= 1);
        assert_eq!(store.count().await.unwrap(), second);
    }
}
