mod embedding;
mod generation;

pub use embedding::HttpEmbeddingClient;
pub use generation::AnthropicGenerationClient;
