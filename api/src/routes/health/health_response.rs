use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response of `GET /api/v1/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when every dependency is up, otherwise "degraded".
    pub status: String,
    pub vector_store_status: String,
    pub generation_status: String,
    pub documents_count: u64,
    pub timestamp: DateTime<Utc>,
}
