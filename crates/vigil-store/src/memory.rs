use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use vigil_core::error::{Result, VigilError};
use vigil_core::model::{
    ApprovalStatus, AuditEntry, ComplianceItem, ComplianceStatus, Control, Document, Project,
    Risk, RiskStatus,
};
use vigil_core::store::RecordStore;

#[derive(Default)]
struct Inner {
    projects: BTreeMap<Uuid, Project>,
    risks: BTreeMap<Uuid, Risk>,
    controls: BTreeMap<Uuid, Control>,
    compliance: BTreeMap<Uuid, ComplianceItem>,
    documents: BTreeMap<Uuid, Document>,
    audit: Vec<AuditEntry>,
}

/// In-memory reference implementation of the record store. Persistence engine
/// design is out of scope; any transactional backend can replace this behind
/// the `RecordStore` trait.
///
/// Every state-changing method appends exactly one audit entry, except
/// `update_compliance_status`: its audit entry is owned by the caller (the
/// reconciler names the match cause, manual edits name the editor path).
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Projects ---

    pub async fn create_project(
        &self,
        name: String,
        description: String,
        scope: String,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Project> {
        let mut project = Project::new(name, description, scope);
        project.start_date = start_date;
        project.end_date = end_date;

        let mut inner = self.inner.write().await;
        let details = format!("Project '{}' was created.", project.name);
        inner.audit.push(AuditEntry::new(
            Some(project.id),
            "Project Created",
            &details,
        ));
        inner.projects.insert(project.id, project.clone());

        tracing::info!(project_id = %project.id, name = %project.name, "Created project");
        Ok(project)
    }

    // --- Risks ---

    pub async fn create_risk(
        &self,
        project_id: Uuid,
        name: String,
        description: String,
        severity: String,
        likelihood: String,
        status: RiskStatus,
    ) -> Result<Risk> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&project_id) {
            return Err(VigilError::Validation(format!(
                "Project {project_id} does not exist"
            )));
        }

        let risk = Risk {
            id: Uuid::new_v4(),
            project_id,
            name,
            description,
            severity,
            likelihood,
            status,
        };
        let details = format!(
            "Risk '{}' was created for project ID {}.",
            risk.name, project_id
        );
        inner
            .audit
            .push(AuditEntry::new(Some(project_id), "Risk Created", &details));
        inner.risks.insert(risk.id, risk.clone());

        tracing::info!(risk_id = %risk.id, name = %risk.name, "Created risk");
        Ok(risk)
    }

    pub async fn update_risk(
        &self,
        risk_id: Uuid,
        name: Option<String>,
        description: Option<String>,
        severity: Option<String>,
        likelihood: Option<String>,
        status: Option<RiskStatus>,
    ) -> Result<Risk> {
        let mut inner = self.inner.write().await;
        let risk = inner
            .risks
            .get_mut(&risk_id)
            .ok_or_else(|| VigilError::NotFound(format!("Risk {risk_id} not found")))?;

        if let Some(v) = name {
            risk.name = v;
        }
        if let Some(v) = description {
            risk.description = v;
        }
        if let Some(v) = severity {
            risk.severity = v;
        }
        if let Some(v) = likelihood {
            risk.likelihood = v;
        }
        if let Some(v) = status {
            risk.status = v;
        }

        let updated = risk.clone();
        let details = format!("Risk '{}' (ID: {}) was updated.", updated.name, risk_id);
        inner.audit.push(AuditEntry::new(
            Some(updated.project_id),
            "Risk Updated",
            &details,
        ));
        Ok(updated)
    }

    pub async fn delete_risk(&self, risk_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let risk = inner
            .risks
            .remove(&risk_id)
            .ok_or_else(|| VigilError::NotFound(format!("Risk {risk_id} not found")))?;

        let details = format!("Risk '{}' (ID: {}) was deleted.", risk.name, risk_id);
        inner.audit.push(AuditEntry::new(
            Some(risk.project_id),
            "Risk Deleted",
            &details,
        ));
        Ok(())
    }

    // --- Controls ---

    pub async fn create_control(
        &self,
        risk_id: Uuid,
        name: String,
        description: String,
        control_type: String,
        status: String,
    ) -> Result<Control> {
        let mut inner = self.inner.write().await;
        let project_id = inner
            .risks
            .get(&risk_id)
            .map(|r| r.project_id)
            .ok_or_else(|| {
                VigilError::Validation(format!("Risk {risk_id} does not exist"))
            })?;

        let control = Control {
            id: Uuid::new_v4(),
            risk_id,
            name,
            description,
            control_type,
            status,
        };
        let details = format!(
            "Control '{}' was created for risk ID {}.",
            control.name, risk_id
        );
        inner.audit.push(AuditEntry::new(
            Some(project_id),
            "Control Created",
            &details,
        ));
        inner.controls.insert(control.id, control.clone());
        Ok(control)
    }

    pub async fn list_controls(&self, risk_id: Option<Uuid>) -> Result<Vec<Control>> {
        let inner = self.inner.read().await;
        Ok(inner
            .controls
            .values()
            .filter(|c| risk_id.map(|r| c.risk_id == r).unwrap_or(true))
            .cloned()
            .collect())
    }

    pub async fn update_control(
        &self,
        control_id: Uuid,
        name: Option<String>,
        description: Option<String>,
        control_type: Option<String>,
        status: Option<String>,
    ) -> Result<Control> {
        let mut inner = self.inner.write().await;
        let control = inner
            .controls
            .get_mut(&control_id)
            .ok_or_else(|| VigilError::NotFound(format!("Control {control_id} not found")))?;

        if let Some(v) = name {
            control.name = v;
        }
        if let Some(v) = description {
            control.description = v;
        }
        if let Some(v) = control_type {
            control.control_type = v;
        }
        if let Some(v) = status {
            control.status = v;
        }

        let updated = control.clone();
        let project_id = inner.risks.get(&updated.risk_id).map(|r| r.project_id);
        let details = format!(
            "Control '{}' (ID: {}) was updated.",
            updated.name, control_id
        );
        inner
            .audit
            .push(AuditEntry::new(project_id, "Control Updated", &details));
        Ok(updated)
    }

    pub async fn delete_control(&self, control_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let control = inner
            .controls
            .remove(&control_id)
            .ok_or_else(|| VigilError::NotFound(format!("Control {control_id} not found")))?;

        let project_id = inner.risks.get(&control.risk_id).map(|r| r.project_id);
        let details = format!(
            "Control '{}' (ID: {}) was deleted.",
            control.name, control_id
        );
        inner
            .audit
            .push(AuditEntry::new(project_id, "Control Deleted", &details));
        Ok(())
    }

    // --- Compliance items ---

    pub async fn create_compliance_item(
        &self,
        project_id: Uuid,
        name: String,
        description: String,
        standard: String,
        status: ComplianceStatus,
    ) -> Result<ComplianceItem> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&project_id) {
            return Err(VigilError::Validation(format!(
                "Project {project_id} does not exist"
            )));
        }

        let item = ComplianceItem {
            id: Uuid::new_v4(),
            project_id,
            name,
            description,
            standard,
            status,
        };
        let details = format!(
            "Compliance item '{}' was created for project ID {}.",
            item.name, project_id
        );
        inner.audit.push(AuditEntry::new(
            Some(project_id),
            "Compliance Item Created",
            &details,
        ));
        inner.compliance.insert(item.id, item.clone());
        Ok(item)
    }

    pub async fn update_compliance_item(
        &self,
        item_id: Uuid,
        name: Option<String>,
        description: Option<String>,
        standard: Option<String>,
        status: Option<ComplianceStatus>,
    ) -> Result<ComplianceItem> {
        let mut inner = self.inner.write().await;
        let item = inner
            .compliance
            .get_mut(&item_id)
            .ok_or_else(|| VigilError::NotFound(format!("Compliance item {item_id} not found")))?;

        if let Some(v) = name {
            item.name = v;
        }
        if let Some(v) = description {
            item.description = v;
        }
        if let Some(v) = standard {
            item.standard = v;
        }
        if let Some(v) = status {
            item.status = v;
        }

        let updated = item.clone();
        let details = format!(
            "Compliance item '{}' (ID: {}) was updated.",
            updated.name, item_id
        );
        inner.audit.push(AuditEntry::new(
            Some(updated.project_id),
            "Compliance Item Updated",
            &details,
        ));
        Ok(updated)
    }

    pub async fn delete_compliance_item(&self, item_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let item = inner
            .compliance
            .remove(&item_id)
            .ok_or_else(|| VigilError::NotFound(format!("Compliance item {item_id} not found")))?;

        let details = format!(
            "Compliance item '{}' (ID: {}) was deleted.",
            item.name, item_id
        );
        inner.audit.push(AuditEntry::new(
            Some(item.project_id),
            "Compliance Item Deleted",
            &details,
        ));
        Ok(())
    }

    // --- Documents ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create_document(
        &self,
        project_id: Uuid,
        name: String,
        doc_type: String,
        version: String,
        content_ref: Option<String>,
        approval_status: ApprovalStatus,
        approved_by: Option<String>,
        approval_date: Option<NaiveDate>,
    ) -> Result<Document> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&project_id) {
            return Err(VigilError::Validation(format!(
                "Project {project_id} does not exist"
            )));
        }

        let doc = Document {
            id: Uuid::new_v4(),
            project_id,
            name,
            doc_type,
            version,
            content_ref,
            approval_status,
            approved_by,
            approval_date,
            created_at: Utc::now(),
        };
        let details = format!(
            "Document '{}' (Type: {}, Version: {}) created for project ID {}. Content ref: {}.",
            doc.name,
            doc.doc_type,
            doc.version,
            project_id,
            doc.content_ref.as_deref().unwrap_or("N/A")
        );
        inner.audit.push(AuditEntry::new(
            Some(project_id),
            "Document Created",
            &details,
        ));
        inner.documents.insert(doc.id, doc.clone());
        Ok(doc)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_document(
        &self,
        doc_id: Uuid,
        name: Option<String>,
        doc_type: Option<String>,
        version: Option<String>,
        content_ref: Option<String>,
        approval_status: Option<ApprovalStatus>,
        approved_by: Option<String>,
        approval_date: Option<NaiveDate>,
    ) -> Result<Document> {
        let mut inner = self.inner.write().await;
        let doc = inner
            .documents
            .get_mut(&doc_id)
            .ok_or_else(|| VigilError::NotFound(format!("Document {doc_id} not found")))?;

        if let Some(v) = name {
            doc.name = v;
        }
        if let Some(v) = doc_type {
            doc.doc_type = v;
        }
        if let Some(v) = version {
            doc.version = v;
        }

        // A replacement content reference releases the prior one. The blob
        // itself lives outside the record store; the release is recorded in
        // the audit trail for the storage layer to act on.
        let mut released = None;
        if let Some(new_ref) = content_ref {
            released = doc.content_ref.replace(new_ref);
        }

        if let Some(v) = approval_status {
            doc.approval_status = v;
        }
        if let Some(v) = approved_by {
            doc.approved_by = Some(v);
        }
        if let Some(v) = approval_date {
            doc.approval_date = Some(v);
        }

        let updated = doc.clone();
        let details = match released {
            Some(old) => format!(
                "Document '{}' (ID: {}) updated. Content ref replaced; released {}.",
                updated.name, doc_id, old
            ),
            None => format!("Document '{}' (ID: {}) updated.", updated.name, doc_id),
        };
        inner.audit.push(AuditEntry::new(
            Some(updated.project_id),
            "Document Updated",
            &details,
        ));
        Ok(updated)
    }

    pub async fn delete_document(&self, doc_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let doc = inner
            .documents
            .remove(&doc_id)
            .ok_or_else(|| VigilError::NotFound(format!("Document {doc_id} not found")))?;

        let details = format!(
            "Document '{}' (ID: {}) deleted. Content ref {} released.",
            doc.name,
            doc_id,
            doc.content_ref.as_deref().unwrap_or("N/A")
        );
        inner.audit.push(AuditEntry::new(
            Some(doc.project_id),
            "Document Deleted",
            &details,
        ));
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let inner = self.inner.read().await;
        Ok(inner.projects.values().cloned().collect())
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        let inner = self.inner.read().await;
        Ok(inner.projects.get(&id).cloned())
    }

    async fn list_risks(&self, project_id: Option<Uuid>) -> Result<Vec<Risk>> {
        let inner = self.inner.read().await;
        Ok(inner
            .risks
            .values()
            .filter(|r| project_id.map(|p| r.project_id == p).unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn list_documents(&self, project_id: Option<Uuid>) -> Result<Vec<Document>> {
        let inner = self.inner.read().await;
        Ok(inner
            .documents
            .values()
            .filter(|d| project_id.map(|p| d.project_id == p).unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn list_compliance_items(
        &self,
        project_id: Option<Uuid>,
    ) -> Result<Vec<ComplianceItem>> {
        let inner = self.inner.read().await;
        Ok(inner
            .compliance
            .values()
            .filter(|c| project_id.map(|p| c.project_id == p).unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn update_compliance_status(
        &self,
        item_id: Uuid,
        new_status: ComplianceStatus,
    ) -> Result<()> {
        let mut inner = self.inner.write().await;
        let item = inner
            .compliance
            .get_mut(&item_id)
            .ok_or_else(|| VigilError::NotFound(format!("Compliance item {item_id} not found")))?;
        item.status = new_status;

        tracing::debug!(item_id = %item_id, status = %new_status, "Updated compliance status");
        Ok(())
    }

    async fn append_audit_log(
        &self,
        project_id: Option<Uuid>,
        action: &str,
        details: &str,
    ) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.audit.push(AuditEntry::new(project_id, action, details));
        Ok(())
    }

    async fn list_audit_logs(&self, project_id: Option<Uuid>) -> Result<Vec<AuditEntry>> {
        let inner = self.inner.read().await;
        Ok(inner
            .audit
            .iter()
            .filter(|e| project_id.map(|p| e.project_id == Some(p)).unwrap_or(true))
            .cloned()
            .collect())
    }
}
