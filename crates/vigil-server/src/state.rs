use std::sync::Arc;

use vigil_core::AppConfig;
use vigil_index::QdrantVectorIndex;
use vigil_llm::AnthropicGenerationClient;
use vigil_rag::{CorpusSynchronizer, RagAnswerer};
use vigil_reconcile::ComplianceReconciler;
use vigil_store::MemoryRecordStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<MemoryRecordStore>,
    pub index: Arc<QdrantVectorIndex>,
    pub generation: Arc<AnthropicGenerationClient>,
    pub reconciler: Arc<ComplianceReconciler>,
    pub synchronizer: Arc<CorpusSynchronizer>,
    pub answerer: Arc<RagAnswerer>,
}
