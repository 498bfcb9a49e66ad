//! Provider registry: maps provider identifiers to provider specs.
//!
//! The registry is the single place where textual provider identifiers
//! (as they appear in `LLM_PROVIDER` / `EMBEDDING_PROVIDER`) are resolved.
//! Resolution happens at startup; an unknown identifier is a typed
//! [`ConfigError::UnsupportedProvider`] carrying the supported list, never a
//! runtime panic.

use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, ConfigError};

/// Static description of one registered provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderSpec {
    /// Identifier accepted in configuration (lowercase).
    pub id: &'static str,
    /// Enum variant the identifier resolves to.
    pub provider: LlmProvider,
    /// Whether the provider refuses to start without an API key.
    pub requires_api_key: bool,
}

/// Registry of supported providers, consulted once at startup.
pub struct ProviderRegistry {
    entries: &'static [ProviderSpec],
}

const BUILTIN: &[ProviderSpec] = &[
    ProviderSpec {
        id: "ollama",
        provider: LlmProvider::Ollama,
        requires_api_key: false,
    },
    ProviderSpec {
        id: "openai",
        provider: LlmProvider::OpenAI,
        requires_api_key: true,
    },
];

impl ProviderRegistry {
    /// Registry with the built-in providers.
    pub fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    /// Resolves an identifier (case-insensitive, trimmed) to its spec.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedProvider`] listing the registered
    /// identifiers when the given one is unknown.
    pub fn resolve(&self, id: &str) -> Result<&ProviderSpec, AiLlmError> {
        let key = id.trim().to_ascii_lowercase();
        self.entries
            .iter()
            .find(|s| s.id == key)
            .ok_or_else(|| {
                ConfigError::UnsupportedProvider {
                    given: id.to_string(),
                    supported: self.supported(),
                }
                .into()
            })
    }

    /// Comma-separated list of registered identifiers.
    pub fn supported(&self) -> String {
        self.entries
            .iter()
            .map(|s| s.id)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_identifiers() {
        let reg = ProviderRegistry::builtin();
        assert_eq!(reg.resolve("ollama").unwrap().provider, LlmProvider::Ollama);
        assert_eq!(reg.resolve(" OpenAI ").unwrap().provider, LlmProvider::OpenAI);
        assert!(reg.resolve("openai").unwrap().requires_api_key);
    }

    #[test]
    fn unknown_identifier_is_typed_config_error() {
        let reg = ProviderRegistry::builtin();
        let err = reg.resolve("mistral").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unsupported provider 'mistral'"));
        assert!(msg.contains("ollama"));
        assert!(msg.contains("openai"));
    }
}
