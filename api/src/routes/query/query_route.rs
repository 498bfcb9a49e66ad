//! POST /api/v1/query — answers a user question with RAG context.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use qa_engine::QueryResponse;

use crate::{
    core::app_state::AppState,
    routes::query::query_request::{MAX_PROMPT_CHARS, QueryRequest},
};

/// Handler: POST /api/v1/query
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8001/api/v1/query \
///   -H 'content-type: application/json' \
///   -d '{"prompt":"When does the winter session start?"}'
/// ```
pub async fn process_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, String)> {
    if body.prompt.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "prompt must not be empty".into()));
    }
    if body.prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("prompt must be at most {MAX_PROMPT_CHARS} characters"),
        ));
    }

    // The orchestrator is infallible by contract; failures surface as a
    // zero-confidence error answer inside the response body.
    Ok(Json(state.rag.process_query(&body.prompt).await))
}
