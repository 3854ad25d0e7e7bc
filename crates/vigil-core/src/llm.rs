use async_trait::async_trait;

use crate::error::Result;

/// Text-to-vector embedding. The synchronizer and the answerer must share one
/// implementation (or at least one embedding space) for retrieval to mean
/// anything.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Single-attempt text generation. No implicit retries: an error surfaces to
/// the caller, who decides whether to re-invoke.
#[async_trait]
pub trait GenerationModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
