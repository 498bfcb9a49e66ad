//! Shared LLM service with providers (Ollama/OpenAI), unified errors,
//! health probes, and `generation`/`embedding` profiles.
//!
//! Construct one [`service_profiles::LlmServiceProfiles`] at process start,
//! wrap it in `Arc`, and pass clones to dependents. Underlying HTTP clients
//! are cached per config (endpoint+model+key+timeout).

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use config::registry::{ProviderRegistry, ProviderSpec};
pub use error_handler::AiLlmError;
pub use health_service::HealthStatus;
