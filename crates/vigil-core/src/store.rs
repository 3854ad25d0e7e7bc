use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{AuditEntry, ComplianceItem, ComplianceStatus, Document, Project, Risk};

/// Surface of the record store consumed by the reconciler and the RAG
/// pipeline. The store is the source of truth for projects, risks, documents
/// and compliance items; any transactional backend can implement it.
///
/// `update_compliance_status` does not write its own audit entry: the caller
/// owns it, so the entry can name what justified the change.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>>;
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>>;

    /// Risks, optionally scoped to one project.
    async fn list_risks(&self, project_id: Option<Uuid>) -> Result<Vec<Risk>>;

    /// Documents, optionally scoped to one project.
    async fn list_documents(&self, project_id: Option<Uuid>) -> Result<Vec<Document>>;

    /// Compliance items, optionally scoped to one project.
    async fn list_compliance_items(&self, project_id: Option<Uuid>)
        -> Result<Vec<ComplianceItem>>;

    /// Transactional single-item status update.
    async fn update_compliance_status(
        &self,
        item_id: Uuid,
        new_status: ComplianceStatus,
    ) -> Result<()>;

    async fn append_audit_log(
        &self,
        project_id: Option<Uuid>,
        action: &str,
        details: &str,
    ) -> Result<()>;

    async fn list_audit_logs(&self, project_id: Option<Uuid>) -> Result<Vec<AuditEntry>>;
}
