//! Typed error for the qa-engine crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    /// Errors from the underlying rag-store crate.
    #[error("store error: {0}")]
    Store(#[from] rag_store::StoreError),

    /// Errors from the LLM service layer.
    #[error("llm error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Invalid engine configuration (e.g., splitter parameters).
    #[error("config error: {0}")]
    Config(String),

    /// Free-form failure raised by a gateway or backend implementation.
    #[error("backend error: {0}")]
    Backend(String),
}
