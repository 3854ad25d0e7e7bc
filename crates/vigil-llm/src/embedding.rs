use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vigil_core::config::AppConfig;
use vigil_core::error::{Result, VigilError};
use vigil_core::llm::EmbeddingModel;

/// Client for an OpenAI-compatible `/v1/embeddings` endpoint. Both the
/// synchronizer and the answerer go through one instance of this client, so
/// indexed chunks and query vectors always share the same embedding space.
pub struct HttpEmbeddingClient {
    client: reqwest::Client,
    url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

impl HttpEmbeddingClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: config.embedding_api_url.clone(),
            model: config.embedding_model.clone(),
        }
    }

    /// Restore request order: the API is allowed to return data out of order,
    /// keyed by `index`.
    fn vectors_in_order(mut data: Vec<EmbeddingData>, expected: usize) -> Result<Vec<Vec<f32>>> {
        if data.len() != expected {
            return Err(VigilError::Embedding(format!(
                "Embedding API returned {} vectors for {} inputs",
                data.len(),
                expected
            )));
        }
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    async fn request(&self, input: &[String]) -> Result<Vec<Vec<f32>>> {
        tracing::debug!(model = %self.model, inputs = input.len(), "Requesting embeddings");

        let response = self
            .client
            .post(&self.url)
            .json(&EmbeddingRequest {
                model: &self.model,
                input,
            })
            .send()
            .await
            .map_err(|e| VigilError::Embedding(format!("Embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(VigilError::Embedding(format!(
                "Embedding API returned status {status}: {body}"
            )));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            VigilError::Embedding(format!("Failed to parse embedding response: {e}"))
        })?;

        Self::vectors_in_order(parsed.data, input.len())
    }
}

#[async_trait]
impl EmbeddingModel for HttpEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.request(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| VigilError::Embedding("Embedding API returned no vector".into()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }
}
