//! Health snapshots for LLM backends.
//!
//! Probes are **functional**: generation health issues a trivial prompt and
//! embedding health embeds a short probe text, so a green status means the
//! configured model actually answered, not merely that the server is up.
//! The probing itself lives on
//! [`LlmServiceProfiles`](crate::service_profiles::LlmServiceProfiles);
//! this module defines the serializable snapshot type.

use serde::Serialize;

use crate::config::llm_model_config::LlmModelConfig;

/// A serializable health snapshot for a single provider/config.
///
/// Suitable for a `/health` endpoint. Constructed only through
/// [`HealthStatus::ok`] / [`HealthStatus::fail`], which normalize the
/// provider/endpoint/model fields from the config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Ollama", "OpenAI").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier the probe exercised.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    pub(crate) fn ok(cfg: &LlmModelConfig, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok: true,
            latency_ms,
            message: message.into(),
        }
    }

    pub(crate) fn fail(cfg: &LlmModelConfig, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok: false,
            latency_ms,
            message: message.into(),
        }
    }
}
