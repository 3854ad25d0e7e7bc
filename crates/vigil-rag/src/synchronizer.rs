use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use vigil_core::error::Result;
use vigil_core::extract::ContentExtractor;
use vigil_core::index::{IndexEntry, IndexSummary, IndexedChunk, SourceKind, VectorIndex};
use vigil_core::llm::EmbeddingModel;
use vigil_core::model::{Document, Project, Risk};
use vigil_core::store::RecordStore;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub chunks_indexed: u64,
    pub documents_skipped: u64,
}

/// Rebuilds the searchable index from the record store. Always a full
/// rebuild: the existing index is discarded wholesale, so stale chunks never
/// survive a pass.
///
/// Clear-then-fill is not atomic: a failure after the clear leaves an empty
/// index, and recovery is "re-run sync". Queries racing a sync may observe a
/// transiently empty index; the caller owns exclusive access during a pass.
pub struct CorpusSynchronizer {
    store: Arc<dyn RecordStore>,
    extractor: Arc<dyn ContentExtractor>,
    embedder: Arc<dyn EmbeddingModel>,
    index: Arc<dyn VectorIndex>,
}

impl CorpusSynchronizer {
    pub fn new(
        store: Arc<dyn RecordStore>,
        extractor: Arc<dyn ContentExtractor>,
        embedder: Arc<dyn EmbeddingModel>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            store,
            extractor,
            embedder,
            index,
        }
    }

    fn project_text(project: &Project) -> String {
        format!(
            "Project Name: {}. Description: {}. Scope: {}.",
            project.name, project.description, project.scope
        )
    }

    fn risk_text(risk: &Risk, project_name: &str) -> String {
        format!(
            "Risk: {}. Description: {}. Severity: {}. Project: {}.",
            risk.name, risk.description, risk.severity, project_name
        )
    }

    fn document_text(document: &Document, extracted: &str) -> String {
        format!(
            "Document Name: {}. Type: {}. Content: {}",
            document.name, document.doc_type, extracted
        )
    }

    #[instrument(skip(self))]
    pub async fn sync(&self) -> Result<SyncReport> {
        match self.run().await {
            Ok(report) => {
                let details = format!(
                    "Corpus rebuilt: {} chunks indexed, {} documents skipped.",
                    report.chunks_indexed, report.documents_skipped
                );
                self.store
                    .append_audit_log(None, "Corpus Synchronized", &details)
                    .await?;
                info!(
                    chunks = report.chunks_indexed,
                    skipped = report.documents_skipped,
                    "Corpus synchronization complete"
                );
                Ok(report)
            }
            Err(e) => {
                let details = format!("Corpus synchronization failed: {e}");
                if let Err(audit_err) = self
                    .store
                    .append_audit_log(None, "Corpus Sync Failed", &details)
                    .await
                {
                    error!(error = %audit_err, "Failed to audit-log sync failure");
                }
                Err(e)
            }
        }
    }

    async fn run(&self) -> Result<SyncReport> {
        // Full rebuild: drop everything first. An unreachable index store
        // fails the whole pass right here.
        self.index.clear().await?;

        let projects = self.store.list_projects().await?;
        let project_names: HashMap<Uuid, String> = projects
            .iter()
            .map(|p| (p.id, p.name.clone()))
            .collect();

        let mut chunks = Vec::new();

        for project in &projects {
            chunks.push(IndexedChunk {
                content: Self::project_text(project),
                source_kind: SourceKind::Project,
                source_id: project.id,
                project_id: Some(project.id),
            });
        }

        for risk in self.store.list_risks(None).await? {
            let project_name = project_names
                .get(&risk.project_id)
                .map(String::as_str)
                .unwrap_or("Unknown");
            chunks.push(IndexedChunk {
                content: Self::risk_text(&risk, project_name),
                source_kind: SourceKind::Risk,
                source_id: risk.id,
                project_id: Some(risk.project_id),
            });
        }

        // Extraction failures skip the document, never the pass.
        let mut documents_skipped = 0u64;
        for document in self.store.list_documents(None).await? {
            let Some(content_ref) = document.content_ref.as_deref() else {
                warn!(document_id = %document.id, name = %document.name, "Document has no content reference, skipping");
                documents_skipped += 1;
                continue;
            };
            match self.extractor.extract_text(content_ref).await {
                Ok(extracted) => chunks.push(IndexedChunk {
                    content: Self::document_text(&document, &extracted),
                    source_kind: SourceKind::Document,
                    source_id: document.id,
                    project_id: Some(document.project_id),
                }),
                Err(e) => {
                    warn!(
                        document_id = %document.id,
                        name = %document.name,
                        error = %e,
                        "Text extraction failed, skipping document"
                    );
                    documents_skipped += 1;
                }
            }
        }

        debug!(chunks = chunks.len(), "Prepared chunks for indexing");

        if chunks.is_empty() {
            return Ok(SyncReport {
                chunks_indexed: 0,
                documents_skipped,
            });
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();
        let chunks_indexed = entries.len() as u64;

        self.index.upsert_batch(entries).await?;

        Ok(SyncReport {
            chunks_indexed,
            documents_skipped,
        })
    }

    pub async fn summary(&self) -> Result<IndexSummary> {
        Ok(IndexSummary {
            collection_name: self.index.collection_name().to_string(),
            item_count: self.index.count().await?,
        })
    }
}
