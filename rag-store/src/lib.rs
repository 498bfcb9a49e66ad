//! Vector-store gateway: document storage and similarity search over Qdrant.
//!
//! The public surface of [`VectorStore`] is deliberately **fail-open**:
//! search degrades to an empty result set, ingestion reports a boolean, and
//! collection probes report errors in-band. One failed dependency degrades
//! answer quality instead of crashing the query pipeline. The strict
//! `Result`-returning internals live in [`qdrant_facade`].

mod config;
mod embed;
mod errors;
mod ids;
mod qdrant_facade;
mod record;

pub use config::{DistanceKind, StoreConfig};
pub use embed::{EmbeddingsProvider, ProfilesEmbedder};
pub use errors::StoreError;
pub use ids::stable_uuid;
pub use record::{CollectionInfo, SearchResult};

use std::collections::HashMap;

use qdrant_client::qdrant::Value as QValue;
use tracing::{debug, error, info, warn};

use crate::qdrant_facade::{QdrantFacade, qstring};

/// High-level gateway that wires configuration, Qdrant client, and the
/// embedding backend.
///
/// This is the single entry point recommended for application code.
pub struct VectorStore {
    cfg: StoreConfig,
    client: QdrantFacade,
    embedder: Box<dyn EmbeddingsProvider>,
}

impl VectorStore {
    /// Constructs a new gateway from the given configuration and embedder.
    ///
    /// # Errors
    /// Returns `StoreError::Config` if the client initialization fails.
    pub fn new(cfg: StoreConfig, embedder: Box<dyn EmbeddingsProvider>) -> Result<Self, StoreError> {
        let client = QdrantFacade::new(&cfg)?;
        Ok(Self {
            cfg,
            client,
            embedder,
        })
    }

    /// Ensures the backing collection exists. Call once at process start.
    ///
    /// The vector size comes from `StoreConfig::embedding_dim` when set,
    /// otherwise it is probed by embedding a short test string.
    ///
    /// # Errors
    /// Returns `StoreError` on embedding or Qdrant failures; the caller
    /// decides whether to fail startup or continue degraded.
    pub async fn bootstrap(&self) -> Result<usize, StoreError> {
        let size = match self.cfg.embedding_dim {
            Some(dim) => dim,
            None => {
                let probe = self.embedder.embed("dimension probe").await?;
                if probe.is_empty() {
                    return Err(StoreError::Embedding(
                        "embedding backend returned an empty vector".into(),
                    ));
                }
                probe.len()
            }
        };
        self.client.ensure_collection(size).await?;
        Ok(size)
    }

    /// Adds pre-chunked documents under the given chunk ids.
    ///
    /// Chunks become searchable once this returns `true`. Empty input is a
    /// no-op success — "nothing to do" is not a failure. A length mismatch
    /// between `chunks` and `ids` is reported as `false`, never a panic.
    pub async fn add_documents(&self, chunks: &[String], ids: &[String]) -> bool {
        if chunks.len() != ids.len() {
            error!(
                chunks = chunks.len(),
                ids = ids.len(),
                "add_documents called with mismatched chunk/id counts"
            );
            return false;
        }
        if chunks.is_empty() {
            warn!("no documents to add");
            return true;
        }

        match self.try_add_documents(chunks, ids).await {
            Ok(()) => {
                info!(
                    count = chunks.len(),
                    collection = self.client.collection(),
                    "documents added to collection"
                );
                true
            }
            Err(e) => {
                error!(error = %e, "failed to add documents to collection");
                false
            }
        }
    }

    /// Searches for chunks similar to `query`, best matches first.
    ///
    /// A blank query returns an empty set without touching the backend.
    /// Any backend failure also yields an empty set (logged) so a degraded
    /// retrieval layer costs answer quality, not availability.
    pub async fn search(&self, query: &str, limit: u64) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            warn!("search called with a blank query");
            return Vec::new();
        }

        match self.try_search(query, limit).await {
            Ok(results) => {
                info!(
                    hits = results.len(),
                    top_score = results.first().map(|r| r.similarity_score).unwrap_or(0.0),
                    "search completed"
                );
                results
            }
            Err(e) => {
                error!(error = %e, "search failed; returning empty result set");
                Vec::new()
            }
        }
    }

    /// Removes every chunk previously ingested from `source` (a filename).
    ///
    /// Used before re-ingesting a document so stale tail chunks from an
    /// earlier, longer split cannot survive.
    pub async fn delete_by_source(&self, source: &str) -> bool {
        match self.client.delete_by_source(source).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, source, "failed to delete stale chunks");
                false
            }
        }
    }

    /// Snapshot of the backing collection; failures are reported in-band.
    pub async fn collection_info(&self) -> CollectionInfo {
        match self.client.count().await {
            Ok(count) => CollectionInfo::new(
                self.client.collection(),
                count,
                serde_json::json!({
                    "distance": format!("{:?}", self.cfg.distance),
                    "embedding_dim": self.cfg.embedding_dim,
                }),
            ),
            Err(e) => {
                error!(error = %e, "failed to read collection info");
                CollectionInfo::from_error(self.client.collection(), e.to_string())
            }
        }
    }

    /// True only if the Qdrant liveness probe AND the embedding backend
    /// health check both succeed.
    pub async fn health_check(&self) -> bool {
        if let Err(e) = self.client.healthz().await {
            error!(error = %e, "qdrant liveness probe failed");
            return false;
        }
        match self.embedder.embed("health probe").await {
            Ok(v) if !v.is_empty() => true,
            Ok(_) => {
                error!("embedding health check returned an empty vector");
                false
            }
            Err(e) => {
                error!(error = %e, "embedding health check failed");
                false
            }
        }
    }

    /* --------------------- Internals --------------------- */

    async fn try_add_documents(&self, chunks: &[String], ids: &[String]) -> Result<(), StoreError> {
        let mut points = Vec::with_capacity(chunks.len());
        for (chunk, id) in chunks.iter().zip(ids) {
            let vector = self.embedder.embed(chunk).await?;

            let mut payload: HashMap<String, QValue> = HashMap::new();
            payload.insert("text".into(), qstring(chunk));
            payload.insert("eid".into(), qstring(id));
            payload.insert("source".into(), qstring(ids::source_of(id)));

            points.push(QdrantFacade::make_point(
                stable_uuid(id).to_string(),
                vector,
                payload,
            ));
        }
        self.client.upsert_points(points).await
    }

    async fn try_search(&self, query: &str, limit: u64) -> Result<Vec<SearchResult>, StoreError> {
        debug!(limit, "embedding query for search");
        let vector = self.embedder.embed(query).await?;
        let hits = self.client.search(vector, limit).await?;

        let mut out = Vec::with_capacity(hits.len());
        for (score, payload) in hits {
            let content = payload
                .get("text")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let id = payload
                .get("eid")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            out.push(SearchResult {
                id,
                content,
                similarity_score: score,
            });
        }

        // Qdrant already ranks its hits; keep the ordering guarantee local anyway.
        out.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::{future::Future, pin::Pin};

    /// Embedder double that counts invocations; the short-circuit paths
    /// under test must never reach it.
    struct CountingEmbedder {
        calls: Arc<AtomicUsize>,
    }

    impl EmbeddingsProvider for CountingEmbedder {
        fn embed<'a>(
            &'a self,
            _text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![0.0; 4])
            })
        }
    }

    fn store() -> (VectorStore, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let cfg = StoreConfig::new_default("http://127.0.0.1:6334", "documents");
        let store = VectorStore::new(
            cfg,
            Box::new(CountingEmbedder {
                calls: calls.clone(),
            }),
        )
        .unwrap();
        (store, calls)
    }

    #[tokio::test]
    async fn blank_query_short_circuits_without_backend_calls() {
        let (store, calls) = store();
        assert!(store.search("", 4).await.is_empty());
        assert!(store.search("   \t\n", 4).await.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_ingest_is_a_no_op_success() {
        let (store, calls) = store();
        assert!(store.add_documents(&[], &[]).await);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn mismatched_chunk_and_id_counts_are_rejected() {
        let (store, calls) = store();
        let chunks = vec!["one chunk".to_string()];
        assert!(!store.add_documents(&chunks, &[]).await);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
