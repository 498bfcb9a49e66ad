//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding away the verbose builder pattern and keeping the rest of the
//! application decoupled from `qdrant-client`. Every method is strict and
//! returns a `Result`; the fail-open policy lives one level up in
//! [`crate::VectorStore`].

use crate::config::{DistanceKind, StoreConfig};
use crate::errors::StoreError;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointStruct,
    SearchPointsBuilder, UpsertPointsBuilder, Value as QValue, Vector, VectorParamsBuilder,
    Vectors, vectors,
};
use tracing::{debug, info, warn};

/// A facade over the Qdrant client to keep the rest of the code clean and stable.
pub(crate) struct QdrantFacade {
    client: Qdrant,
    collection: String,
    distance: DistanceKind,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Uses the modern builder-based API of `qdrant-client` and supports
    /// optional API key authentication.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?; // Early validation of config.

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
        })
    }

    /// Ensures that the collection exists in Qdrant.
    ///
    /// - If the collection already exists → no-op.
    /// - If missing → creates it with the given vector size and the
    ///   configured distance function.
    pub async fn ensure_collection(&self, vector_size: usize) -> Result<(), StoreError> {
        info!(
            "Ensuring collection '{}' with size={} distance={:?}",
            self.collection, vector_size, self.distance
        );

        // Try to fetch collection info first.
        match self.client.collection_info(&self.collection).await {
            Ok(_) => {
                debug!("Collection '{}' already exists", self.collection);
                return Ok(());
            }
            Err(err) => {
                warn!(
                    "Collection '{}' not found, will be created (error={})",
                    self.collection, err
                );
            }
        }

        let distance = match self.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(vector_size as u64, distance)),
            )
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        info!("Collection '{}' created successfully", self.collection);
        Ok(())
    }

    /// Upserts (inserts or updates) a batch of points into the collection.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<(), StoreError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(());
        }

        info!(
            "Upserting {} points into collection '{}'",
            points.len(),
            self.collection
        );

        let res = self
            .client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        debug!("Upsert operation result={:?}", res.result);
        Ok(())
    }

    /// Performs a similarity search in Qdrant.
    ///
    /// Returns `(score, payload)` tuples with results sorted by score.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
        debug!("Searching in '{}' with top_k={}", self.collection, top_k);

        let builder = SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true);

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        // Convert raw Qdrant payloads into JSON.
        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result.into_iter() {
            let score = r.score;
            let payload_json = qpayload_to_json(r.payload);
            out.push((score, payload_json));
        }

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
    }

    /// Deletes every point whose `source` payload equals the given value.
    pub async fn delete_by_source(&self, source: &str) -> Result<(), StoreError> {
        debug!(
            "Deleting points with source='{}' from '{}'",
            source, self.collection
        );

        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(Filter::must([Condition::matches(
                        "source",
                        source.to_string(),
                    )]))
                    .wait(true),
            )
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(())
    }

    /// Returns the number of points stored in the collection.
    pub async fn count(&self) -> Result<u64, StoreError> {
        let info = self
            .client
            .collection_info(&self.collection)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(info.result.and_then(|r| r.points_count).unwrap_or(0))
    }

    /// Liveness probe against the Qdrant instance itself.
    pub async fn healthz(&self) -> Result<(), StoreError> {
        self.client
            .health_check()
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Qdrant(e.to_string()))
    }

    /// Target collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Builds one Qdrant point from a chunk and its payload fields.
    pub fn make_point(
        point_id: String,
        vector: Vec<f32>,
        payload: std::collections::HashMap<String, QValue>,
    ) -> PointStruct {
        let vectors = Vectors {
            vectors_options: Some(vectors::VectorsOptions::Vector(Vector {
                data: vector,
                indices: None,
                vectors_count: None,
                vector: None,
            })),
        };

        PointStruct {
            id: Some(point_id.into()),
            payload,
            vectors: Some(vectors),
            ..Default::default()
        }
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
///
/// Unsupported nested objects/arrays are mapped to `Null`.
fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            None => serde_json::Value::Null,
            // For unsupported nested types, fallback to Null for safety.
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}

/// Wraps a string into a Qdrant `Value`.
pub(crate) fn qstring(s: &str) -> QValue {
    QValue {
        kind: Some(qdrant_client::qdrant::value::Kind::StringValue(
            s.to_string(),
        )),
    }
}
