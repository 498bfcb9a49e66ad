use serde::Deserialize;

/// Body of `POST /api/v1/query`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// User question, 1..=500 characters.
    pub prompt: String,
}

/// Maximum accepted prompt length in characters.
pub const MAX_PROMPT_CHARS: usize = 500;
