//! Production generation backend over the shared LLM profiles service.

use std::sync::Arc;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use tracing::error;

use crate::error::QaError;
use crate::prompt;
use crate::traits::{BoxFuture, GenerationBackend};

/// Fixed answer returned when the generation backend fails.
pub const FALLBACK_ANSWER: &str = "The service is temporarily unavailable.";

/// Generation backend that prompts the configured LLM.
///
/// Failure handling is part of the contract: any backend error resolves to
/// [`FALLBACK_ANSWER`], so the orchestrator never sees an error from a
/// normal generation failure.
pub struct GenerationService {
    svc: Arc<LlmServiceProfiles>,
}

impl GenerationService {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }

    /// Answers `question` from `context` only; falls back on failure.
    pub async fn generate_response(&self, question: &str, context: &str) -> String {
        let user_prompt = prompt::build_user_prompt(question, context);
        match self
            .svc
            .generate(&user_prompt, Some(prompt::SYSTEM_PROMPT))
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, "generation backend failed; returning fallback answer");
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    /// Issues a trivial prompt and reports whether a response was obtained.
    pub async fn health_check(&self) -> bool {
        self.svc.health_generation().await.ok
    }
}

impl GenerationBackend for GenerationService {
    fn generate_response<'a>(
        &'a self,
        question: &'a str,
        context: &'a str,
    ) -> BoxFuture<'a, Result<String, QaError>> {
        Box::pin(async move { Ok(GenerationService::generate_response(self, question, context).await) })
    }

    fn health_check<'a>(&'a self) -> BoxFuture<'a, Result<bool, QaError>> {
        Box::pin(async move { Ok(GenerationService::health_check(self).await) })
    }
}
