//! Runtime and collection configuration.

use crate::errors::StoreError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

/// Configuration for the vector-store gateway.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Expected embedding dimensionality. When unset, the dimension is
    /// probed from the embedding backend at bootstrap.
    pub embedding_dim: Option<usize>,
}

impl StoreConfig {
    /// Creates a sane default config for a given collection name and Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            embedding_dim: None,
        }
    }

    /// Builds a config from environment variables with defaults:
    /// `QDRANT_URL` (default `http://127.0.0.1:6334`), `QDRANT_API_KEY`,
    /// `QDRANT_COLLECTION` (default `documents`), `EMBEDDING_DIM`.
    pub fn from_env() -> Result<Self, StoreError> {
        let qdrant_url = std::env::var("QDRANT_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "http://127.0.0.1:6334".to_string());
        let collection = std::env::var("QDRANT_COLLECTION")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "documents".to_string());
        let qdrant_api_key = std::env::var("QDRANT_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let embedding_dim = match std::env::var("EMBEDDING_DIM") {
            Ok(v) if !v.trim().is_empty() => Some(v.parse::<usize>().map_err(|_| {
                StoreError::Config("EMBEDDING_DIM must be a positive integer".into())
            })?),
            _ => None,
        };

        let cfg = Self {
            qdrant_url,
            qdrant_api_key,
            collection,
            distance: DistanceKind::Cosine,
            embedding_dim,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(StoreError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        if self.embedding_dim == Some(0) {
            return Err(StoreError::Config("embedding_dim must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = StoreConfig::new_default("http://127.0.0.1:6334", "documents");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_collection_is_rejected() {
        let cfg = StoreConfig::new_default("http://127.0.0.1:6334", "  ");
        assert!(cfg.validate().is_err());
    }
}
