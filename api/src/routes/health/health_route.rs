//! GET /api/v1/health — aggregated system health.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;

use crate::{core::app_state::AppState, routes::health::health_response::HealthResponse};

/// Handler: GET /api/v1/health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let report = state.rag.health_check().await;

    let status = if report.vector_store_status == "healthy"
        && report.generation_status == "healthy"
    {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        vector_store_status: report.vector_store_status,
        generation_status: report.generation_status,
        documents_count: report.documents_count,
        timestamp: Utc::now(),
    })
}
