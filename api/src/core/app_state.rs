use std::sync::Arc;

use qa_engine::RagService;

/// Shared state for all HTTP handlers.
///
/// Carries the orchestrator handle built once at process start (explicit
/// dependency injection) plus the provider labels shown in the banner.
#[derive(Clone)]
pub struct AppState {
    /// The query/ingestion orchestrator.
    pub rag: Arc<RagService>,
    /// Generation provider identifier (for the service banner).
    pub llm_provider: String,
    /// Embedding provider identifier (for the service banner).
    pub embedding_provider: String,
}

impl AppState {
    pub fn new(rag: Arc<RagService>, llm_provider: String, embedding_provider: String) -> Self {
        Self {
            rag,
            llm_provider,
            embedding_provider,
        }
    }
}
