//! Data types produced by the vector-store gateway.

use serde::Serialize;

/// One ranked hit returned by a similarity search.
///
/// Immutable, lives for the duration of a single query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    /// Chunk id as it was supplied at ingestion time (`{filename}_{index}`).
    pub id: String,
    /// Chunk text.
    pub content: String,
    /// Similarity score, higher = more relevant.
    pub similarity_score: f32,
}

/// Snapshot of the backing collection.
///
/// A failed probe is reported in-band through `error` instead of an `Err` so
/// that callers on degraded paths still get a serializable answer.
#[derive(Clone, Debug, Serialize)]
pub struct CollectionInfo {
    pub name: String,
    pub documents_count: u64,
    pub metadata: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CollectionInfo {
    /// Healthy snapshot.
    pub fn new(name: impl Into<String>, documents_count: u64, metadata: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            documents_count,
            metadata,
            error: None,
        }
    }

    /// Failure snapshot carrying the probe error message.
    pub fn from_error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents_count: 0,
            metadata: serde_json::Value::Null,
            error: Some(message.into()),
        }
    }
}
