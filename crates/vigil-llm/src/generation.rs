use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vigil_core::config::AppConfig;
use vigil_core::error::{Result, VigilError};
use vigil_core::llm::GenerationModel;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const MODEL: &str = "claude-sonnet-4-5-20250929";
const MAX_TOKENS: u32 = 4096;

/// Text generation via the Anthropic Messages API. One attempt per call, no
/// retries: failures surface to the caller.
pub struct AnthropicGenerationClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

// ---------------------------------------------------------------------------
// Anthropic Messages API request/response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

impl AnthropicGenerationClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: config.anthropic_api_key.clone(),
            model: MODEL.to_string(),
        }
    }

    fn build_risk_assessment_prompt(description: &str) -> String {
        format!(
            "Assess the following risk and provide a severity and likelihood rating \
             (e.g., Severity: High, Likelihood: Medium). Also, provide a brief justification.\n\n\
             Risk: {description}"
        )
    }

    /// Prompt wrapper for the risk-assessment convenience used by the risk
    /// endpoints; the caller stores the returned free-text rating.
    pub async fn assess_risk(&self, description: &str) -> Result<String> {
        self.generate(&Self::build_risk_assessment_prompt(description))
            .await
    }

    pub async fn draft_document(&self, prompt: &str) -> Result<String> {
        self.generate(prompt).await
    }
}

#[async_trait]
impl GenerationModel for AnthropicGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Sending generation request");

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| VigilError::Generation(format!("HTTP request to Anthropic failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(VigilError::Generation(format!(
                "Anthropic API returned {status}: {body}"
            )));
        }

        let api_response: AnthropicResponse = response.json().await.map_err(|e| {
            VigilError::Generation(format!("Failed to parse Anthropic response: {e}"))
        })?;

        let text = api_response
            .content
            .into_iter()
            .filter(|b| b.block_type == "text")
            .map(|b| b.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(VigilError::Generation(
                "Anthropic returned an empty response".into(),
            ));
        }

        tracing::debug!(
            stop_reason = ?api_response.stop_reason,
            response_len = text.len(),
            "Received generation response"
        );

        Ok(text)
    }
}
