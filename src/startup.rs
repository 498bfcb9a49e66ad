//! Process bootstrap: configuration, service wiring, initial documents.
//!
//! Every service is constructed exactly once here and handed to the HTTP
//! layer by value. Routes never reach for ambient state.

use std::{error::Error, fs, path::PathBuf, sync::Arc};

use ai_llm_service::config::default_config::{config_embedding, config_generation};
use ai_llm_service::service_profiles::LlmServiceProfiles;
use api::AppState;
use qa_engine::{GenerationService, RagService, TextSplitter};
use rag_store::{ProfilesEmbedder, StoreConfig, VectorStore};
use tracing::{error, info, warn};

/// Builds the full service graph from environment configuration.
///
/// Configuration problems (unknown provider, missing variables, invalid
/// splitter parameters) are startup errors; a temporarily unreachable
/// backend is not — the store degrades and reports unhealthy instead.
pub async fn build_state() -> Result<AppState, Box<dyn Error>> {
    let generation_cfg = config_generation()?;
    let embedding_cfg = config_embedding()?;
    let llm_provider = format!("{:?}", generation_cfg.provider);
    let embedding_provider = format!("{:?}", embedding_cfg.provider);
    info!(
        %llm_provider,
        llm_model = %generation_cfg.model,
        %embedding_provider,
        embedding_model = %embedding_cfg.model,
        "LLM configuration resolved"
    );

    let svc = Arc::new(LlmServiceProfiles::new(generation_cfg, embedding_cfg));

    let store_cfg = StoreConfig::from_env()?;
    let embedder = ProfilesEmbedder::new(svc.clone(), store_cfg.embedding_dim);
    let store = VectorStore::new(store_cfg, Box::new(embedder))?;
    match store.bootstrap().await {
        Ok(dim) => info!(dim, "vector store collection ready"),
        Err(e) => warn!(error = %e, "vector store bootstrap failed; continuing degraded"),
    }

    let splitter = TextSplitter::new(
        parse_env("CHUNK_SIZE", TextSplitter::DEFAULT_CHUNK_SIZE),
        parse_env("CHUNK_OVERLAP", TextSplitter::DEFAULT_CHUNK_OVERLAP),
    )?;

    let rag = Arc::new(RagService::new(
        Arc::new(store),
        Arc::new(GenerationService::new(svc)),
        splitter,
    ));

    Ok(AppState::new(rag, llm_provider, embedding_provider))
}

/// Loads `*.txt` documents from `DOCUMENTS_DIR` (default `./documents`)
/// into the store at startup.
///
/// Skipped with a warning when either dependency is unhealthy; individual
/// file failures are logged and do not stop the rest of the batch.
pub async fn load_initial_documents(rag: &RagService) {
    let report = rag.health_check().await;
    info!(
        vector_store = %report.vector_store_status,
        generation = %report.generation_status,
        documents_count = report.documents_count,
        "dependency status at startup"
    );

    if report.vector_store_status != "healthy" || report.generation_status != "healthy" {
        warn!("one or more services are unhealthy; skipping initial document load");
        return;
    }

    let dir = PathBuf::from(
        std::env::var("DOCUMENTS_DIR").unwrap_or_else(|_| "./documents".to_string()),
    );
    if !dir.is_dir() {
        warn!(path = %dir.display(), "documents directory not found; nothing to preload");
        return;
    }

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!(path = %dir.display(), error = %e, "failed to list documents directory");
            return;
        }
    };

    let mut loaded = 0usize;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };

        match fs::read_to_string(&path) {
            Ok(content) => {
                if rag.add_document(&content, &name).await {
                    loaded += 1;
                    info!(file = %name, "document preloaded");
                } else {
                    error!(file = %name, "failed to preload document");
                }
            }
            Err(e) => error!(file = %name, error = %e, "failed to read document"),
        }
    }

    let snapshot = rag.collection_info().await;
    info!(
        loaded,
        collection = %snapshot.name,
        documents_count = snapshot.documents_count,
        "initial document load complete"
    );
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
