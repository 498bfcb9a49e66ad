//! Public API types re-used by external crates (e.g., the HTTP API layer).

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Final answer to one query, packaged for the caller.
///
/// Constructed once per query and not persisted.
#[derive(Clone, Debug, Serialize)]
pub struct QueryResponse {
    /// Generated answer text.
    pub answer: String,
    /// Heuristic confidence in `[0, 1]`.
    pub confidence: f64,
    /// Wall-clock processing time in seconds.
    pub processing_time: f64,
    /// When the response was produced.
    pub timestamp: DateTime<Utc>,
}

/// Aggregate health snapshot of the engine's dependencies.
#[derive(Clone, Debug, Serialize)]
pub struct HealthReport {
    /// "healthy", "unhealthy", or an error description.
    pub vector_store_status: String,
    /// "healthy" or "unhealthy".
    pub generation_status: String,
    /// Number of chunks in the vector store (0 when unhealthy).
    pub documents_count: u64,
}
