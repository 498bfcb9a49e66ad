//! Capability seams consumed by the orchestrator.
//!
//! Both traits are object-safe with manually desugared async methods so the
//! orchestrator can hold `Arc<dyn ...>` handles and tests can substitute
//! failing implementations. Production implementations are fail-open and
//! practically never return `Err`; the `Result` is part of the seam so the
//! orchestrator's containment boundary stays honest and testable.

use std::{future::Future, pin::Pin};

use rag_store::{CollectionInfo, SearchResult};

use crate::error::QaError;

/// Boxed future alias used by the capability traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Vector-store capability: similarity search plus chunk lifecycle.
pub trait VectorStoreGateway: Send + Sync {
    /// Ranked similarity search, best matches first.
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: u64,
    ) -> BoxFuture<'a, Result<Vec<SearchResult>, QaError>>;

    /// Stores pre-chunked documents under the given chunk ids.
    fn add_documents<'a>(
        &'a self,
        chunks: &'a [String],
        ids: &'a [String],
    ) -> BoxFuture<'a, Result<bool, QaError>>;

    /// Removes every chunk previously ingested from `source`.
    fn delete_by_source<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<bool, QaError>>;

    /// Collection snapshot (name, count, metadata).
    fn collection_info<'a>(&'a self) -> BoxFuture<'a, Result<CollectionInfo, QaError>>;

    /// Store + embedding backend liveness.
    fn health_check<'a>(&'a self) -> BoxFuture<'a, Result<bool, QaError>>;
}

/// Text-generation capability.
pub trait GenerationBackend: Send + Sync {
    /// Produces an answer for `question` grounded in `context`.
    fn generate_response<'a>(
        &'a self,
        question: &'a str,
        context: &'a str,
    ) -> BoxFuture<'a, Result<String, QaError>>;

    /// Trivial-prompt liveness probe.
    fn health_check<'a>(&'a self) -> BoxFuture<'a, Result<bool, QaError>>;
}
