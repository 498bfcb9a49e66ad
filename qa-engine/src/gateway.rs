//! Capability-trait implementation for the production vector store.
//!
//! `VectorStore`'s own surface is already fail-open, so every call maps to
//! `Ok`; the `Result` in the trait exists for implementations (and tests)
//! that can genuinely fail.

use rag_store::{CollectionInfo, SearchResult, VectorStore};

use crate::error::QaError;
use crate::traits::{BoxFuture, VectorStoreGateway};

impl VectorStoreGateway for VectorStore {
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: u64,
    ) -> BoxFuture<'a, Result<Vec<SearchResult>, QaError>> {
        Box::pin(async move { Ok(VectorStore::search(self, query, limit).await) })
    }

    fn add_documents<'a>(
        &'a self,
        chunks: &'a [String],
        ids: &'a [String],
    ) -> BoxFuture<'a, Result<bool, QaError>> {
        Box::pin(async move { Ok(VectorStore::add_documents(self, chunks, ids).await) })
    }

    fn delete_by_source<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<bool, QaError>> {
        Box::pin(async move { Ok(VectorStore::delete_by_source(self, source).await) })
    }

    fn collection_info<'a>(&'a self) -> BoxFuture<'a, Result<CollectionInfo, QaError>> {
        Box::pin(async move { Ok(VectorStore::collection_info(self).await) })
    }

    fn health_check<'a>(&'a self) -> BoxFuture<'a, Result<bool, QaError>> {
        Box::pin(async move { Ok(VectorStore::health_check(self).await) })
    }
}
