#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use vigil_core::error::{Result, VigilError};
use vigil_core::extract::ContentExtractor;
use vigil_core::index::{IndexEntry, RetrievalResult, ScoredChunk, VectorIndex};
use vigil_core::llm::{EmbeddingModel, GenerationModel};

const EMBED_DIM: usize = 64;

/// Deterministic bag-of-words embedder: each token hashes to a bucket, so
/// texts sharing words land close under cosine similarity. No model server
/// needed, and the same text always embeds identically.
pub struct HashEmbedder;

fn token_bucket(token: &str) -> usize {
    // FNV-1a, stable across runs.
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash % EMBED_DIM as u64) as usize
}

fn embed_text(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; EMBED_DIM];
    for token in text.split_whitespace() {
        let token: String = token
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if token.is_empty() {
            continue;
        }
        vector[token_bucket(&token)] += 1.0;
    }
    vector
}

#[async_trait]
impl EmbeddingModel for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| embed_text(t)).collect())
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// In-memory stand-in for the vector index. Search is exact cosine over all
/// entries; chunks with no token overlap score zero and are dropped.
#[derive(Default)]
pub struct MemoryVectorIndex {
    entries: Mutex<Vec<IndexEntry>>,
}

impl MemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorIndex for MemoryVectorIndex {
    async fn clear(&self) -> Result<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }

    async fn upsert_batch(&self, entries: Vec<IndexEntry>) -> Result<()> {
        self.entries.lock().unwrap().extend(entries);
        Ok(())
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<RetrievalResult> {
        let entries = self.entries.lock().unwrap();
        let mut hits: Vec<ScoredChunk> = entries
            .iter()
            .map(|e| ScoredChunk {
                chunk: e.chunk.clone(),
                score: cosine(query, &e.embedding),
            })
            .filter(|h| h.score > 0.0)
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k);
        Ok(RetrievalResult { hits })
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.entries.lock().unwrap().len() as u64)
    }

    fn collection_name(&self) -> &str {
        "test_corpus"
    }
}

/// Extractor backed by a fixed map of content refs. Unknown refs fail the
/// same way a dead extraction service would.
pub struct StaticExtractor {
    texts: HashMap<String, String>,
}

impl StaticExtractor {
    pub fn new(texts: &[(&str, &str)]) -> Self {
        Self {
            texts: texts
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl ContentExtractor for StaticExtractor {
    async fn extract_text(&self, content_ref: &str) -> Result<String> {
        self.texts.get(content_ref).cloned().ok_or_else(|| {
            VigilError::Extraction(format!("No content at {content_ref}"))
        })
    }
}

/// Generator that returns a canned answer and records every prompt it saw.
pub struct ScriptedGenerator {
    pub answer: String,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationModel for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}
