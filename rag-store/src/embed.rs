//! Embedding provider seam.
//!
//! Async is required because real providers (Ollama, OpenAI) perform HTTP
//! requests.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use ai_llm_service::service_profiles::LlmServiceProfiles;

use crate::errors::StoreError;

/// Provider interface for embedding generation.
///
/// Implement this trait to plug in your own embedding backend.
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>;
}

/// Embedding provider backed by the shared [`LlmServiceProfiles`].
#[derive(Clone)]
pub struct ProfilesEmbedder {
    svc: Arc<LlmServiceProfiles>,
    /// Expected embedding dimension, enforced when known.
    dim: Option<usize>,
}

impl ProfilesEmbedder {
    /// Construct a new embedder over the shared profiles service.
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for ProfilesEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self
                .svc
                .embed(text)
                .await
                .map_err(|e| StoreError::Embedding(e.to_string()))?;

            if let Some(want) = self.dim {
                if resp.len() != want {
                    return Err(StoreError::VectorSizeMismatch {
                        got: resp.len(),
                        want,
                    });
                }
            }

            Ok(resp)
        })
    }
}
