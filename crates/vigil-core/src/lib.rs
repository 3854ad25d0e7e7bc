pub mod api_types;
pub mod config;
pub mod error;
pub mod extract;
pub mod index;
pub mod llm;
pub mod model;
pub mod store;

pub use config::AppConfig;
pub use error::{Result, VigilError};
pub use extract::ContentExtractor;
pub use index::{
    IndexEntry, IndexSummary, IndexedChunk, RetrievalResult, ScoredChunk, SourceKind, VectorIndex,
};
pub use llm::{EmbeddingModel, GenerationModel};
pub use model::{
    ApprovalStatus, AuditEntry, ComplianceItem, ComplianceStatus, Control, Document, Project,
    Risk, RiskStatus,
};
pub use store::RecordStore;
