mod answerer;
mod synchronizer;

pub use answerer::{AnsweredQuery, RagAnswerer, RagOutcome, NO_EVIDENCE_MESSAGE, RETRIEVAL_K};
pub use synchronizer::{CorpusSynchronizer, SyncReport};
