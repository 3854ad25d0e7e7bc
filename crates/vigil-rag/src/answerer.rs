use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use vigil_core::error::Result;
use vigil_core::index::{ScoredChunk, VectorIndex};
use vigil_core::llm::{EmbeddingModel, GenerationModel};

/// Number of chunks retrieved per question.
pub const RETRIEVAL_K: usize = 5;

/// Returned verbatim when retrieval yields nothing. Clients match on this
/// string, so it is fixed.
pub const NO_EVIDENCE_MESSAGE: &str =
    "Could not find relevant information to answer the question.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsweredQuery {
    pub question: String,
    pub answer: String,
    pub context: Vec<ScoredChunk>,
}

/// Outcome of one question. `NoAnswer` means retrieval came back empty and no
/// generation was attempted, so the message is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RagOutcome {
    Answered(AnsweredQuery),
    NoAnswer { message: String },
}

/// Answers questions from indexed evidence only: embed the question, retrieve
/// the closest chunks, and have the generator answer strictly from those
/// chunks. Without retrieval hits the generator is never consulted.
pub struct RagAnswerer {
    embedder: Arc<dyn EmbeddingModel>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn GenerationModel>,
}

impl RagAnswerer {
    pub fn new(
        embedder: Arc<dyn EmbeddingModel>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn GenerationModel>,
    ) -> Self {
        Self {
            embedder,
            index,
            generator,
        }
    }

    fn build_grounding_prompt(question: &str, hits: &[ScoredChunk]) -> String {
        let context = hits
            .iter()
            .map(|h| h.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "You are an expert assistant for the Project Audit Tool. \
             Your task is to answer the user's question based *only* on the context provided below.\n\
             Do not use any external knowledge or make assumptions. \
             If the context does not contain the answer, state that clearly.\n\n\
             **Context:**\n\
             ---\n\
             {context}\n\
             ---\n\n\
             **Question:** {question}\n\n\
             **Answer:**"
        )
    }

    #[instrument(skip(self))]
    pub async fn answer(&self, question: &str) -> Result<RagOutcome> {
        let query_embedding = self.embedder.embed(question).await?;
        let retrieved = self.index.search(&query_embedding, RETRIEVAL_K).await?;

        if retrieved.is_empty() {
            info!("No relevant chunks retrieved, declining to answer");
            return Ok(RagOutcome::NoAnswer {
                message: NO_EVIDENCE_MESSAGE.to_string(),
            });
        }

        debug!(hits = retrieved.hits.len(), "Retrieved context for question");

        let prompt = Self::build_grounding_prompt(question, &retrieved.hits);
        let answer = self.generator.generate(&prompt).await?;

        Ok(RagOutcome::Answered(AnsweredQuery {
            question: question.to_string(),
            answer,
            context: retrieved.hits,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use uuid::Uuid;

    use vigil_core::index::{IndexEntry, IndexedChunk, RetrievalResult, SourceKind};

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingModel for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }
    }

    struct FixedIndex {
        hits: Vec<ScoredChunk>,
    }

    #[async_trait]
    impl VectorIndex for FixedIndex {
        async fn clear(&self) -> Result<()> {
            Ok(())
        }

        async fn upsert_batch(&self, _entries: Vec<IndexEntry>) -> Result<()> {
            Ok(())
        }

        async fn search(&self, _query: &[f32], k: usize) -> Result<RetrievalResult> {
            Ok(RetrievalResult {
                hits: self.hits.iter().take(k).cloned().collect(),
            })
        }

        async fn count(&self) -> Result<u64> {
            Ok(self.hits.len() as u64)
        }

        fn collection_name(&self) -> &str {
            "test"
        }
    }

    struct CountingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GenerationModel for CountingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("The project is compliant.".to_string())
        }
    }

    fn chunk(content: &str) -> ScoredChunk {
        ScoredChunk {
            chunk: IndexedChunk {
                content: content.to_string(),
                source_kind: SourceKind::Project,
                source_id: Uuid::new_v4(),
                project_id: None,
            },
            score: 0.9,
        }
    }

    #[test]
    fn grounding_prompt_embeds_context_and_question() {
        let hits = vec![chunk("Project Name: Apollo."), chunk("Risk: Downtime.")];
        let prompt = RagAnswerer::build_grounding_prompt("Is Apollo risky?", &hits);

        assert!(prompt.contains("based *only* on the context"));
        assert!(prompt.contains("Project Name: Apollo.\n\nRisk: Downtime."));
        assert!(prompt.contains("**Question:** Is Apollo risky?"));
        assert!(prompt.ends_with("**Answer:**"));
    }

    #[tokio::test]
    async fn empty_retrieval_skips_generation() {
        let generator = Arc::new(CountingGenerator {
            calls: AtomicUsize::new(0),
        });
        let answerer = RagAnswerer::new(
            Arc::new(FixedEmbedder),
            Arc::new(FixedIndex { hits: vec![] }),
            Arc::clone(&generator) as Arc<dyn GenerationModel>,
        );

        let outcome = answerer.answer("Anything?").await.unwrap();
        match outcome {
            RagOutcome::NoAnswer { message } => assert_eq!(message, NO_EVIDENCE_MESSAGE),
            RagOutcome::Answered(_) => panic!("expected NoAnswer"),
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn hits_produce_a_generated_answer_with_context() {
        let generator = Arc::new(CountingGenerator {
            calls: AtomicUsize::new(0),
        });
        let answerer = RagAnswerer::new(
            Arc::new(FixedEmbedder),
            Arc::new(FixedIndex {
                hits: vec![chunk("Project Name: Apollo. Description: Lander. Scope: Moon.")],
            }),
            Arc::clone(&generator) as Arc<dyn GenerationModel>,
        );

        let outcome = answerer.answer("What is Apollo?").await.unwrap();
        match outcome {
            RagOutcome::Answered(answered) => {
                assert_eq!(answered.answer, "The project is compliant.");
                assert_eq!(answered.context.len(), 1);
                assert_eq!(answered.question, "What is Apollo?");
            }
            RagOutcome::NoAnswer { .. } => panic!("expected an answer"),
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
