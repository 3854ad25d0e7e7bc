use std::sync::Arc;

use uuid::Uuid;

use vigil_core::model::{ApprovalStatus, ComplianceStatus, RiskStatus};
use vigil_core::{RecordStore, VigilError};
use vigil_reconcile::ComplianceReconciler;
use vigil_store::MemoryRecordStore;

async fn store_with_project(name: &str) -> (Arc<MemoryRecordStore>, Uuid) {
    let store = Arc::new(MemoryRecordStore::new());
    let project = store
        .create_project(name.into(), "Test project".into(), "Global".into(), None, None)
        .await
        .unwrap();
    (store, project.id)
}

fn reconciler(store: &Arc<MemoryRecordStore>) -> ComplianceReconciler {
    ComplianceReconciler::new(store.clone() as Arc<dyn RecordStore>)
}

async fn item_status(
    store: &MemoryRecordStore,
    project_id: Uuid,
    item_id: Uuid,
) -> ComplianceStatus {
    store
        .list_compliance_items(Some(project_id))
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.id == item_id)
        .unwrap()
        .status
}

// ---------------------------------------------------------------------------
// Evidence matching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approved_document_marks_item_compliant_with_one_audit_entry() {
    let (store, project_id) = store_with_project("Payments Platform").await;

    store
        .create_document(
            project_id,
            "GDPR Consent Form".into(),
            "Policy".into(),
            "1.0".into(),
            Some("blob://consent".into()),
            ApprovalStatus::Approved,
            Some("ciso".into()),
            None,
        )
        .await
        .unwrap();
    let item = store
        .create_compliance_item(
            project_id,
            "GDPR Consent".into(),
            "Explicit consent collection".into(),
            "GDPR".into(),
            ComplianceStatus::InProgress,
        )
        .await
        .unwrap();

    let report = reconciler(&store).reconcile(Some(project_id)).await.unwrap();

    assert_eq!(report.items_examined, 1);
    assert_eq!(report.items_updated, 1);
    assert_eq!(
        item_status(&store, project_id, item.id).await,
        ComplianceStatus::Compliant
    );

    let auto_checked: Vec<_> = store
        .list_audit_logs(Some(project_id))
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.action == "Compliance Auto-Checked")
        .collect();
    assert_eq!(auto_checked.len(), 1);
    assert!(auto_checked[0].details.contains("GDPR Consent Form"));
}

#[tokio::test]
async fn mitigated_risk_is_evidence_when_no_document_matches() {
    let (store, project_id) = store_with_project("Payments Platform").await;

    store
        .create_risk(
            project_id,
            "Access Control Review".into(),
            "Quarterly access audit".into(),
            "Medium".into(),
            "Low".into(),
            RiskStatus::Mitigated,
        )
        .await
        .unwrap();
    let item = store
        .create_compliance_item(
            project_id,
            "Access Control".into(),
            String::new(),
            "ISO 27001".into(),
            ComplianceStatus::NonCompliant,
        )
        .await
        .unwrap();

    let report = reconciler(&store).reconcile(Some(project_id)).await.unwrap();

    assert_eq!(report.items_updated, 1);
    assert_eq!(
        item_status(&store, project_id, item.id).await,
        ComplianceStatus::Compliant
    );

    let logs = store.list_audit_logs(Some(project_id)).await.unwrap();
    let entry = logs
        .iter()
        .find(|e| e.action == "Compliance Auto-Checked")
        .unwrap();
    assert!(entry.details.contains("Access Control Review"));
}

#[tokio::test]
async fn approved_document_takes_priority_over_resolved_risk() {
    let (store, project_id) = store_with_project("Payments Platform").await;

    store
        .create_risk(
            project_id,
            "Data Retention Gap".into(),
            String::new(),
            "High".into(),
            "Medium".into(),
            RiskStatus::Closed,
        )
        .await
        .unwrap();
    store
        .create_document(
            project_id,
            "Data Retention Policy".into(),
            "Policy".into(),
            "2.1".into(),
            None,
            ApprovalStatus::Approved,
            None,
            None,
        )
        .await
        .unwrap();
    store
        .create_compliance_item(
            project_id,
            "Data Retention".into(),
            String::new(),
            "GDPR".into(),
            ComplianceStatus::InProgress,
        )
        .await
        .unwrap();

    reconciler(&store).reconcile(Some(project_id)).await.unwrap();

    let logs = store.list_audit_logs(Some(project_id)).await.unwrap();
    let entry = logs
        .iter()
        .find(|e| e.action == "Compliance Auto-Checked")
        .unwrap();
    assert!(entry.details.contains("Data Retention Policy"));
    assert!(!entry.details.contains("Data Retention Gap"));
}

#[tokio::test]
async fn pending_documents_and_open_risks_are_not_evidence() {
    let (store, project_id) = store_with_project("Payments Platform").await;

    store
        .create_document(
            project_id,
            "Encryption Standard".into(),
            "Policy".into(),
            "0.9".into(),
            None,
            ApprovalStatus::Pending,
            None,
            None,
        )
        .await
        .unwrap();
    store
        .create_risk(
            project_id,
            "Encryption Weakness".into(),
            String::new(),
            "High".into(),
            "High".into(),
            RiskStatus::Open,
        )
        .await
        .unwrap();
    let item = store
        .create_compliance_item(
            project_id,
            "Encryption".into(),
            String::new(),
            "PCI DSS".into(),
            ComplianceStatus::NonCompliant,
        )
        .await
        .unwrap();

    let report = reconciler(&store).reconcile(Some(project_id)).await.unwrap();

    assert_eq!(report.items_examined, 1);
    assert_eq!(report.items_updated, 0);
    assert_eq!(
        item_status(&store, project_id, item.id).await,
        ComplianceStatus::NonCompliant
    );
    assert!(store
        .list_audit_logs(Some(project_id))
        .await
        .unwrap()
        .iter()
        .all(|e| e.action != "Compliance Auto-Checked"));
}

// ---------------------------------------------------------------------------
// Repeatability and scoping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_run_changes_nothing() {
    let (store, project_id) = store_with_project("Payments Platform").await;

    store
        .create_document(
            project_id,
            "GDPR Consent Form".into(),
            "Policy".into(),
            "1.0".into(),
            None,
            ApprovalStatus::Approved,
            None,
            None,
        )
        .await
        .unwrap();
    store
        .create_compliance_item(
            project_id,
            "GDPR Consent".into(),
            String::new(),
            "GDPR".into(),
            ComplianceStatus::InProgress,
        )
        .await
        .unwrap();

    let reconciler = reconciler(&store);
    let first = reconciler.reconcile(Some(project_id)).await.unwrap();
    let logs_after_first = store.list_audit_logs(None).await.unwrap().len();

    let second = reconciler.reconcile(Some(project_id)).await.unwrap();
    let logs_after_second = store.list_audit_logs(None).await.unwrap().len();

    assert_eq!(first.items_updated, 1);
    assert_eq!(second.items_updated, 0);
    assert_eq!(logs_after_first, logs_after_second);
}

#[tokio::test]
async fn scoped_run_leaves_other_projects_untouched() {
    let (store, in_scope) = store_with_project("In Scope").await;
    let out_of_scope = store
        .create_project("Out of Scope".into(), String::new(), String::new(), None, None)
        .await
        .unwrap()
        .id;

    for project_id in [in_scope, out_of_scope] {
        store
            .create_document(
                project_id,
                "Backup Policy".into(),
                "Policy".into(),
                "1.0".into(),
                None,
                ApprovalStatus::Approved,
                None,
                None,
            )
            .await
            .unwrap();
        store
            .create_compliance_item(
                project_id,
                "Backup".into(),
                String::new(),
                "ISO 27001".into(),
                ComplianceStatus::InProgress,
            )
            .await
            .unwrap();
    }

    let report = reconciler(&store).reconcile(Some(in_scope)).await.unwrap();
    assert_eq!(report.items_examined, 1);
    assert_eq!(report.items_updated, 1);

    let untouched = store
        .list_compliance_items(Some(out_of_scope))
        .await
        .unwrap();
    assert_eq!(untouched[0].status, ComplianceStatus::InProgress);
}

#[tokio::test]
async fn unknown_project_scope_fails_and_is_audited() {
    let store = Arc::new(MemoryRecordStore::new());
    let missing = Uuid::new_v4();

    let err = reconciler(&store).reconcile(Some(missing)).await.unwrap_err();
    assert!(matches!(err, VigilError::Validation(_)));

    let logs = store.list_audit_logs(None).await.unwrap();
    assert!(logs
        .iter()
        .any(|e| e.action == "Compliance Auto-Check Failed"));
}
