use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use vigil_core::error::{Result, VigilError};
use vigil_core::model::{ComplianceItem, ComplianceStatus, Document, Risk};
use vigil_core::model::{ApprovalStatus, RiskStatus};
use vigil_core::store::RecordStore;

use crate::matcher::{NameMatcher, SubstringNameMatcher};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub items_examined: u64,
    pub items_updated: u64,
}

/// Evidence that justified marking an item Compliant. Document matches take
/// priority over risk matches.
#[derive(Debug, Clone)]
enum MatchCause {
    ApprovedDocument(String),
    ResolvedRisk(String),
}

struct PendingUpdate {
    item: ComplianceItem,
    cause: MatchCause,
}

/// Scans compliance items against their project's documents and risks and
/// recomputes status. The reconciler only ever proposes "Compliant", never a
/// demotion, and each run is all-or-nothing: the decision pass is
/// read-only, updates are applied only after the whole pass succeeds, and an
/// apply-phase failure rolls back what was already written.
///
/// Concurrent runs over overlapping scopes are last-write-wins; callers that
/// need stronger guarantees add per-project locking around the invocation.
pub struct ComplianceReconciler {
    store: Arc<dyn RecordStore>,
    matcher: Box<dyn NameMatcher>,
}

impl ComplianceReconciler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_matcher(store, Box::new(SubstringNameMatcher))
    }

    pub fn with_matcher(store: Arc<dyn RecordStore>, matcher: Box<dyn NameMatcher>) -> Self {
        Self { store, matcher }
    }

    #[instrument(skip(self), fields(scope = ?scope))]
    pub async fn reconcile(&self, scope: Option<Uuid>) -> Result<ReconciliationReport> {
        match self.run(scope).await {
            Ok(report) => {
                info!(
                    examined = report.items_examined,
                    updated = report.items_updated,
                    "Reconciliation complete"
                );
                Ok(report)
            }
            Err(e) => {
                let scope_desc = scope
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "all projects".to_string());
                let details =
                    format!("Automated compliance check failed for scope {scope_desc}: {e}");
                if let Err(audit_err) = self
                    .store
                    .append_audit_log(scope, "Compliance Auto-Check Failed", &details)
                    .await
                {
                    error!(error = %audit_err, "Failed to audit-log reconciliation failure");
                }
                Err(e)
            }
        }
    }

    async fn run(&self, scope: Option<Uuid>) -> Result<ReconciliationReport> {
        if let Some(project_id) = scope {
            if self.store.get_project(project_id).await?.is_none() {
                return Err(VigilError::Validation(format!(
                    "Cannot reconcile nonexistent project {project_id}"
                )));
            }
        }

        let items = self.store.list_compliance_items(scope).await?;
        debug!(items = items.len(), "Scanning compliance items");

        // Decision pass: pure reads, evaluated independently per item.
        let mut documents: HashMap<Uuid, Vec<Document>> = HashMap::new();
        let mut risks: HashMap<Uuid, Vec<Risk>> = HashMap::new();
        let mut pending = Vec::new();
        let items_examined = items.len() as u64;

        for item in items {
            if !documents.contains_key(&item.project_id) {
                let docs = self.store.list_documents(Some(item.project_id)).await?;
                documents.insert(item.project_id, docs);
            }
            let project_docs = &documents[&item.project_id];

            let mut cause = self.match_documents(&item, project_docs);

            if cause.is_none() {
                if !risks.contains_key(&item.project_id) {
                    let project_risks = self.store.list_risks(Some(item.project_id)).await?;
                    risks.insert(item.project_id, project_risks);
                }
                cause = self.match_risks(&item, &risks[&item.project_id]);
            }

            match cause {
                Some(cause) if item.status != ComplianceStatus::Compliant => {
                    debug!(item = %item.name, cause = ?cause, "Item matched evidence");
                    pending.push(PendingUpdate { item, cause });
                }
                Some(_) => {
                    debug!(item = %item.name, "Item already Compliant, leaving unchanged");
                }
                None => {
                    debug!(item = %item.name, "No matching evidence, leaving unchanged");
                }
            }
        }

        // Apply pass.
        let items_updated = self.apply(pending).await?;

        Ok(ReconciliationReport {
            items_examined,
            items_updated,
        })
    }

    fn match_documents(&self, item: &ComplianceItem, docs: &[Document]) -> Option<MatchCause> {
        // First approved match wins; document evidence takes priority over
        // risk evidence.
        docs.iter()
            .find(|doc| {
                self.matcher.matches(&item.name, &doc.name)
                    && doc.approval_status == ApprovalStatus::Approved
            })
            .map(|doc| MatchCause::ApprovedDocument(doc.name.clone()))
    }

    fn match_risks(&self, item: &ComplianceItem, risks: &[Risk]) -> Option<MatchCause> {
        risks
            .iter()
            .find(|risk| {
                self.matcher.matches(&item.name, &risk.name)
                    && matches!(risk.status, RiskStatus::Mitigated | RiskStatus::Closed)
            })
            .map(|risk| MatchCause::ResolvedRisk(risk.name.clone()))
    }

    async fn apply(&self, pending: Vec<PendingUpdate>) -> Result<u64> {
        let mut applied: Vec<(Uuid, ComplianceStatus)> = Vec::new();

        // All status writes first, audit entries second: a failed write then
        // rolls back without leaving success audits for reverted changes.
        for update in &pending {
            if let Err(e) = self
                .store
                .update_compliance_status(update.item.id, ComplianceStatus::Compliant)
                .await
            {
                self.rollback(&applied).await;
                return Err(e);
            }
            applied.push((update.item.id, update.item.status));
        }

        for update in &pending {
            let details = match &update.cause {
                MatchCause::ApprovedDocument(doc_name) => format!(
                    "Compliance item '{}' (ID: {}) status automatically updated to 'Compliant' \
                     due to linked approved document '{doc_name}'.",
                    update.item.name, update.item.id
                ),
                MatchCause::ResolvedRisk(risk_name) => format!(
                    "Compliance item '{}' (ID: {}) status automatically updated to 'Compliant' \
                     due to linked mitigated/closed risk '{risk_name}'.",
                    update.item.name, update.item.id
                ),
            };
            if let Err(e) = self
                .store
                .append_audit_log(
                    Some(update.item.project_id),
                    "Compliance Auto-Checked",
                    &details,
                )
                .await
            {
                self.rollback(&applied).await;
                return Err(e);
            }
        }

        Ok(applied.len() as u64)
    }

    /// Best-effort restore of original statuses after an apply-phase failure,
    /// so a failed invocation leaves no partial commits.
    async fn rollback(&self, applied: &[(Uuid, ComplianceStatus)]) {
        for (item_id, original_status) in applied {
            if let Err(e) = self
                .store
                .update_compliance_status(*item_id, *original_status)
                .await
            {
                warn!(item_id = %item_id, error = %e, "Rollback of compliance status failed");
            }
        }
    }
}
