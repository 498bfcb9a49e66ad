//! POST /api/v1/upload-document — ingests one text document.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use crate::{
    core::app_state::AppState,
    routes::documents::upload_request::{DocumentUploadRequest, DocumentUploadResponse},
};

/// Handler: POST /api/v1/upload-document
///
/// Supported formats: `.txt`.
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DocumentUploadRequest>,
) -> Result<Json<DocumentUploadResponse>, (StatusCode, String)> {
    if body.filename.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "filename is missing".into()));
    }
    if !body.filename.ends_with(".txt") {
        return Err((
            StatusCode::BAD_REQUEST,
            "only .txt files are supported".into(),
        ));
    }

    let success = state.rag.add_document(&body.content, &body.filename).await;
    if !success {
        error!(filename = %body.filename, "document upload failed");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".into(),
        ));
    }

    let chunks_count = state.rag.splitter().split_text(&body.content).len();
    Ok(Json(DocumentUploadResponse {
        message: "Document added successfully".into(),
        filename: body.filename,
        chunks_count,
        success: true,
    }))
}
