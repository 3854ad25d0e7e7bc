use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub qdrant_url: String,
    pub collection_name: String,
    pub embedding_api_url: String,
    pub embedding_model: String,
    pub embedding_dim: u64,
    pub extractor_url: String,
    pub anthropic_api_key: String,
    pub server_host: String,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            qdrant_url: std::env::var("QDRANT_URL")
                .unwrap_or_else(|_| "http://localhost:6334".into()),
            collection_name: std::env::var("RAG_COLLECTION")
                .unwrap_or_else(|_| "project_audit_rag".into()),
            embedding_api_url: std::env::var("EMBEDDING_API_URL")
                .unwrap_or_else(|_| "http://localhost:8081/v1/embeddings".into()),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "all-MiniLM-L6-v2".into()),
            embedding_dim: std::env::var("EMBEDDING_DIM")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(384),
            extractor_url: std::env::var("EXTRACTOR_URL")
                .unwrap_or_else(|_| "http://localhost:5001/extract".into()),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}
