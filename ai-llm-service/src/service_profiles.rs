//! Shared LLM service with two active profiles: `generation` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout).
//! - Provides convenience methods to generate text and compute embeddings.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::service_profiles::LlmServiceProfiles;
//! use ai_llm_service::config::llm_model_config::LlmModelConfig;
//! use ai_llm_service::config::llm_provider::LlmProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generation = LlmModelConfig {
//!         provider: LlmProvider::Ollama,
//!         model: "qwen3:14b".into(),
//!         endpoint: "http://localhost:11434".into(),
//!         api_key: None,
//!         max_tokens: Some(500),
//!         temperature: Some(0.7),
//!         top_p: None,
//!         timeout_secs: Some(60),
//!     };
//!     let embedding = LlmModelConfig {
//!         model: "nomic-embed-text".into(),
//!         temperature: Some(0.0),
//!         ..generation.clone()
//!     };
//!
//!     let svc = Arc::new(LlmServiceProfiles::new(generation, embedding));
//!
//!     let txt = svc.generate("Hello world", None).await?;
//!     println!("ANSWER: {}", txt);
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("Embedding dim = {}", emb.len());
//!
//!     Ok(())
//! }
//! ```

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::Arc,
    time::Instant,
};

use tokio::sync::RwLock;

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::AiLlmError;
use crate::health_service::HealthStatus;
use crate::services::{ollama_service::OllamaService, open_ai_service::OpenAiService};

/// Short prompt used by the generation health probe.
const HEALTH_PROMPT: &str = "Hello";

/// Probe text used by the embedding health probe.
const HEALTH_EMBED_INPUT: &str = "health probe";

/// Shared service that manages the **generation** and **embedding** profiles.
///
/// Internally, it caches Ollama/OpenAI clients keyed by their configuration
/// to avoid recreating HTTP clients on each call.
pub struct LlmServiceProfiles {
    generation: LlmModelConfig,
    embedding: LlmModelConfig,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,
}

impl LlmServiceProfiles {
    /// Creates a new service with the two profiles.
    pub fn new(generation: LlmModelConfig, embedding: LlmModelConfig) -> Self {
        Self {
            generation,
            embedding,
            ollama: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
        }
    }

    /// Generates text using the **generation** profile.
    ///
    /// # Arguments
    /// - `prompt`: user-turn text.
    /// - `system`: optional system instruction.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        match self.generation.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.generation).await?;
                cli.generate(prompt, system).await
            }
            LlmProvider::OpenAI => {
                let cli = self.get_or_init_openai(&self.generation).await?;
                cli.generate(prompt, system).await
            }
        }
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        match self.embedding.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.embedding).await?;
                cli.embeddings(input).await
            }
            LlmProvider::OpenAI => {
                let cli = self.get_or_init_openai(&self.embedding).await?;
                cli.embeddings(input).await
            }
        }
    }

    /// Functional health probe for the generation profile.
    ///
    /// Issues a trivial prompt and reports whether a response was obtained.
    /// This method is **resilient**: any failure is converted into a
    /// `HealthStatus { ok: false, .. }` snapshot.
    pub async fn health_generation(&self) -> HealthStatus {
        let start = Instant::now();
        match self.generate(HEALTH_PROMPT, None).await {
            Ok(_) => HealthStatus::ok(
                &self.generation,
                start.elapsed().as_millis(),
                "generation responded to a trivial prompt",
            ),
            Err(e) => HealthStatus::fail(&self.generation, start.elapsed().as_millis(), e.to_string()),
        }
    }

    /// Functional health probe for the embedding profile.
    ///
    /// Embeds a short probe text and requires a non-empty vector back.
    /// Resilient: never returns an error.
    pub async fn health_embedding(&self) -> HealthStatus {
        let start = Instant::now();
        match self.embed(HEALTH_EMBED_INPUT).await {
            Ok(v) if !v.is_empty() => HealthStatus::ok(
                &self.embedding,
                start.elapsed().as_millis(),
                format!("embedding responded with dimension {}", v.len()),
            ),
            Ok(_) => HealthStatus::fail(
                &self.embedding,
                start.elapsed().as_millis(),
                "embedding responded with an empty vector",
            ),
            Err(e) => HealthStatus::fail(&self.embedding, start.elapsed().as_millis(), e.to_string()),
        }
    }

    /// Returns references to the current profiles `(generation, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.generation, &self.embedding)
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_ollama(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OllamaService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.ollama.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }

    async fn get_or_init_openai(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OpenAiService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.openai.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Clone, Eq)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

impl PartialEq for ClientKey {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider
            && self.endpoint == other.endpoint
            && self.model == other.model
            && self.api_key == other.api_key
            && self.timeout == other.timeout
    }
}

impl Hash for ClientKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
        self.endpoint.hash(state);
        self.model.hash(state);
        if let Some(ref k) = self.api_key {
            k.hash(state);
        } else {
            0usize.hash(state);
        }
        self.timeout.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: model.into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.0),
            top_p: None,
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn client_key_distinguishes_models() {
        let a = ClientKey::from(&cfg("a"));
        let b = ClientKey::from(&cfg("b"));
        let a2 = ClientKey::from(&cfg("a"));
        assert!(a == a2);
        assert!(a != b);
    }

    #[tokio::test]
    async fn ollama_clients_are_cached_per_config() {
        let svc = LlmServiceProfiles::new(cfg("gen"), cfg("emb"));
        let c1 = svc.get_or_init_ollama(&cfg("gen")).await.unwrap();
        let c2 = svc.get_or_init_ollama(&cfg("gen")).await.unwrap();
        assert!(Arc::ptr_eq(&c1, &c2));
        let c3 = svc.get_or_init_ollama(&cfg("emb")).await.unwrap();
        assert!(!Arc::ptr_eq(&c1, &c3));
    }
}
