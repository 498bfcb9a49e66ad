use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/upload-document`.
///
/// The document travels as plain JSON (filename + UTF-8 content); only
/// `.txt` sources are accepted.
#[derive(Debug, Deserialize)]
pub struct DocumentUploadRequest {
    pub filename: String,
    pub content: String,
}

/// Response of `POST /api/v1/upload-document`.
#[derive(Debug, Serialize)]
pub struct DocumentUploadResponse {
    pub message: String,
    pub filename: String,
    pub chunks_count: usize,
    pub success: bool,
}
