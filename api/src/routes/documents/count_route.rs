//! GET /api/v1/documents/count — collection snapshot.

use std::sync::Arc;

use axum::{Json, extract::State};

use rag_store::CollectionInfo;

use crate::core::app_state::AppState;

/// Handler: GET /api/v1/documents/count
///
/// Probe failures are reported in-band through the `error` field of the
/// snapshot, so this route always answers 200.
pub async fn documents_count(State(state): State<Arc<AppState>>) -> Json<CollectionInfo> {
    Json(state.rag.collection_info().await)
}
