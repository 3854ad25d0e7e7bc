use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vigil_core::config::AppConfig;
use vigil_core::error::{Result, VigilError};
use vigil_core::extract::ContentExtractor;

/// HTTP client for a document text-extraction service (docling-style): the
/// service receives a stored content reference and returns plain text.
pub struct HttpContentExtractor {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    source: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    text: String,
}

impl HttpContentExtractor {
    pub fn new(config: &AppConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: config.extractor_url.clone(),
        }
    }
}

#[async_trait]
impl ContentExtractor for HttpContentExtractor {
    async fn extract_text(&self, content_ref: &str) -> Result<String> {
        tracing::debug!(content_ref, "Requesting text extraction");

        let response = self
            .client
            .post(&self.url)
            .json(&ExtractRequest {
                source: content_ref,
            })
            .send()
            .await
            .map_err(|e| VigilError::Extraction(format!("Extractor request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(VigilError::Extraction(format!(
                "Extractor returned status {status}: {body}"
            )));
        }

        let extracted: ExtractResponse = response
            .json()
            .await
            .map_err(|e| VigilError::Extraction(format!("Failed to parse extractor response: {e}")))?;

        tracing::debug!(content_ref, text_len = extracted.text.len(), "Extraction complete");
        Ok(extracted.text)
    }
}
