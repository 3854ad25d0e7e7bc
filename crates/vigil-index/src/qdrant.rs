use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use uuid::Uuid;

use vigil_core::config::AppConfig;
use vigil_core::error::{Result, VigilError};
use vigil_core::index::{
    IndexEntry, IndexedChunk, RetrievalResult, ScoredChunk, SourceKind, VectorIndex,
};

/// Vector index backed by a Qdrant collection. `clear` drops the collection
/// outright (full-rebuild semantics); a missing collection reads as an empty
/// index, since that is the legitimate state between a clear and the
/// following batch upsert.
pub struct QdrantVectorIndex {
    client: Qdrant,
    collection: String,
    dim: u64,
}

impl QdrantVectorIndex {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Qdrant::from_url(&config.qdrant_url)
            .build()
            .map_err(|e| VigilError::Index(format!("Failed to build Qdrant client: {e}")))?;

        Ok(Self {
            client,
            collection: config.collection_name.clone(),
            dim: config.embedding_dim,
        })
    }

    async fn collection_exists(&self) -> Result<bool> {
        self.client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| VigilError::Index(format!("Failed to check collection: {e}")))
    }

    async fn ensure_collection(&self) -> Result<()> {
        if self.collection_exists().await? {
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(self.dim, Distance::Cosine)),
            )
            .await
            .map_err(|e| {
                VigilError::Index(format!(
                    "Failed to create collection {}: {e}",
                    self.collection
                ))
            })?;

        tracing::info!(collection = %self.collection, dim = self.dim, "Created Qdrant collection");
        Ok(())
    }
}

fn chunk_payload(chunk: &IndexedChunk) -> serde_json::Value {
    serde_json::json!({
        "content": chunk.content,
        "source_kind": chunk.source_kind.to_string(),
        "source_id": chunk.source_id.to_string(),
        "project_id": chunk.project_id.map(|p| p.to_string()),
    })
}

fn payload_str(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    match payload.get(key)?.kind.as_ref()? {
        Kind::StringValue(s) => Some(s.clone()),
        _ => None,
    }
}

fn chunk_from_payload(payload: &HashMap<String, Value>) -> Option<IndexedChunk> {
    let content = payload_str(payload, "content")?;
    let source_kind = match payload_str(payload, "source_kind")?.as_str() {
        "project" => SourceKind::Project,
        "risk" => SourceKind::Risk,
        "document" => SourceKind::Document,
        _ => return None,
    };
    let source_id = Uuid::parse_str(&payload_str(payload, "source_id")?).ok()?;
    let project_id = payload_str(payload, "project_id").and_then(|p| Uuid::parse_str(&p).ok());

    Some(IndexedChunk {
        content,
        source_kind,
        source_id,
        project_id,
    })
}

#[async_trait]
impl VectorIndex for QdrantVectorIndex {
    async fn clear(&self) -> Result<()> {
        if !self.collection_exists().await? {
            tracing::debug!(collection = %self.collection, "Clear requested on absent collection");
            return Ok(());
        }

        self.client
            .delete_collection(&self.collection)
            .await
            .map_err(|e| {
                VigilError::Index(format!(
                    "Failed to drop collection {}: {e}",
                    self.collection
                ))
            })?;

        tracing::info!(collection = %self.collection, "Dropped Qdrant collection");
        Ok(())
    }

    async fn upsert_batch(&self, entries: Vec<IndexEntry>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        self.ensure_collection().await?;

        let count = entries.len();
        let mut points = Vec::with_capacity(count);
        for entry in entries {
            let payload = Payload::try_from(chunk_payload(&entry.chunk))
                .map_err(|e| VigilError::Index(format!("Failed to build payload: {e}")))?;
            points.push(PointStruct::new(
                Uuid::new_v4().to_string(),
                entry.embedding,
                payload,
            ));
        }

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| VigilError::Index(format!("Failed to upsert points: {e}")))?;

        tracing::info!(collection = %self.collection, points = count, "Upserted index batch");
        Ok(())
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<RetrievalResult> {
        if !self.collection_exists().await? {
            return Ok(RetrievalResult::default());
        }

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query.to_vec(), k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| VigilError::Index(format!("Search failed: {e}")))?;

        let mut hits = Vec::with_capacity(response.result.len());
        for point in response.result {
            match chunk_from_payload(&point.payload) {
                Some(chunk) => hits.push(ScoredChunk {
                    chunk,
                    score: point.score,
                }),
                None => {
                    tracing::warn!(collection = %self.collection, "Skipping point with malformed payload");
                }
            }
        }

        tracing::debug!(collection = %self.collection, k, hits = hits.len(), "Search completed");
        Ok(RetrievalResult { hits })
    }

    async fn count(&self) -> Result<u64> {
        if !self.collection_exists().await? {
            return Ok(0);
        }

        let response = self
            .client
            .count(CountPointsBuilder::new(&self.collection).exact(true))
            .await
            .map_err(|e| VigilError::Index(format!("Count failed: {e}")))?;

        Ok(response.result.map(|r| r.count).unwrap_or(0))
    }

    fn collection_name(&self) -> &str {
        &self.collection
    }
}
