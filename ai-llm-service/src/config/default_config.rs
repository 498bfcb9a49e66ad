//! Default LLM configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by role:
//!
//! - **Generation** → answers user questions
//! - **Embedding**  → embedding generator for the vector store
//!
//! The provider identifier is resolved through the
//! [`ProviderRegistry`](crate::config::registry::ProviderRegistry), so an
//! unknown value fails at startup with a descriptive error.
//!
//! # Environment variables
//!
//! Generation:
//! - `LLM_PROVIDER`    = provider identifier (`ollama`, `openai`) (mandatory)
//! - `LLM_MODEL`       = model name (mandatory)
//! - `LLM_API_KEY`     = API key (mandatory when the provider requires one)
//! - `LLM_MAX_TOKENS`  = optional max tokens (default 500)
//! - `LLM_TEMPERATURE` = optional sampling temperature (default 0.7)
//! - `LLM_TIMEOUT_SECS`= optional request timeout (default 60)
//!
//! Embedding:
//! - `EMBEDDING_PROVIDER`, `EMBEDDING_MODEL`, `EMBEDDING_API_KEY`
//!   (same rules; temperature pinned to 0.0, timeout default 30)
//!
//! Endpoints:
//! - Ollama: `OLLAMA_URL` or `OLLAMA_PORT` → `http://localhost:{port}`
//! - OpenAI: `OPENAI_URL` (default `https://api.openai.com`)

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::config::registry::ProviderRegistry;
use crate::error_handler::{
    AiLlmError, ConfigError, env_opt_f32, env_opt_u32, env_opt_u64, must_env,
    validate_http_endpoint,
};

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            validate_http_endpoint("OLLAMA_URL", url.trim())?;
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Resolves the endpoint for the given provider.
fn endpoint_for(provider: LlmProvider) -> Result<String, AiLlmError> {
    match provider {
        LlmProvider::Ollama => ollama_endpoint(),
        LlmProvider::OpenAI => {
            let url = std::env::var("OPENAI_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "https://api.openai.com".to_string());
            validate_http_endpoint("OPENAI_URL", url.trim())?;
            Ok(url)
        }
    }
}

/// Reads the API key for a role and enforces the registry requirement.
fn api_key_for(
    requires_api_key: bool,
    var: &'static str,
) -> Result<Option<String>, AiLlmError> {
    let key = std::env::var(var).ok().filter(|s| !s.trim().is_empty());
    if requires_api_key && key.is_none() {
        return Err(ConfigError::MissingVar(var).into());
    }
    Ok(key)
}

/// Constructs the **generation** config from environment.
///
/// # Defaults
/// - `max_tokens = Some(500)`
/// - `temperature = Some(0.7)`
/// - `timeout_secs = Some(60)`
pub fn config_generation() -> Result<LlmModelConfig, AiLlmError> {
    let registry = ProviderRegistry::builtin();
    let spec = *registry.resolve(&must_env("LLM_PROVIDER")?)?;

    let model = must_env("LLM_MODEL")?;
    let endpoint = endpoint_for(spec.provider)?;
    let api_key = api_key_for(spec.requires_api_key, "LLM_API_KEY")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.or(Some(500));
    let temperature = env_opt_f32("LLM_TEMPERATURE")?.or(Some(0.7));
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(60));

    Ok(LlmModelConfig {
        provider: spec.provider,
        model,
        endpoint,
        api_key,
        max_tokens,
        temperature,
        top_p: None,
        timeout_secs,
    })
}

/// Constructs the **embedding** config from environment.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `max_tokens = None`
/// - `timeout_secs = Some(30)`
pub fn config_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let registry = ProviderRegistry::builtin();
    let spec = *registry.resolve(&must_env("EMBEDDING_PROVIDER")?)?;

    let model = must_env("EMBEDDING_MODEL")?;
    let endpoint = endpoint_for(spec.provider)?;
    let api_key = api_key_for(spec.requires_api_key, "EMBEDDING_API_KEY")?;

    Ok(LlmModelConfig {
        provider: spec.provider,
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
