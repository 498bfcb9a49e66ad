//! GET / — service banner.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;

/// Response of `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub llm_provider: String,
    pub embedding_provider: String,
}

/// Handler: GET /
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Campus Assist - RAG System".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm_provider: state.llm_provider.clone(),
        embedding_provider: state.embedding_provider.clone(),
    })
}
