use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Project,
    Risk,
    Document,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceKind::Project => "project",
            SourceKind::Risk => "risk",
            SourceKind::Document => "document",
        };
        f.write_str(s)
    }
}

/// One retrievable unit of text, derived from a project, risk or document.
/// The chunk collection is a rebuildable cache, never authoritative: a sync
/// pass discards and recomputes all of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub content: String,
    pub source_kind: SourceKind,
    pub source_id: Uuid,
    pub project_id: Option<Uuid>,
}

/// A chunk paired with the embedding computed from its current content.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub chunk: IndexedChunk,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: IndexedChunk,
    pub score: f32,
}

/// Ordered retrieval hits, at most K entries, descending relevance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub hits: Vec<ScoredChunk>,
}

impl RetrievalResult {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSummary {
    pub collection_name: String,
    pub item_count: u64,
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Drop the entire collection. A missing collection afterwards reads as an
    /// empty index, not an error.
    async fn clear(&self) -> Result<()>;

    async fn upsert_batch(&self, entries: Vec<IndexEntry>) -> Result<()>;

    async fn search(&self, query: &[f32], k: usize) -> Result<RetrievalResult>;

    async fn count(&self) -> Result<u64>;

    fn collection_name(&self) -> &str;
}
