/// Represents the provider (backend) used for LLM inference and embeddings.
///
/// This enum distinguishes between the supported backends: a local Ollama
/// runtime or an OpenAI-compatible API. Adding more providers (e.g.,
/// Anthropic, Mistral API) means extending this enum plus registering the
/// identifier in [`crate::config::registry::ProviderRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI-compatible chat/embeddings API.
    OpenAI,
}
