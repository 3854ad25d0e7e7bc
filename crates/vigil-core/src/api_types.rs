use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::index::ScoredChunk;
use crate::model::{ApprovalStatus, ComplianceStatus, RiskStatus};

// --- Health ---

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store_reachable: bool,
    pub index_reachable: bool,
    pub project_count: u64,
    pub indexed_chunk_count: u64,
}

// --- Projects ---

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scope: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// --- Risks ---

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRiskRequest {
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub severity: String,
    pub likelihood: String,
    pub status: RiskStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRiskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub likelihood: Option<String>,
    pub status: Option<RiskStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssessRiskRequest {
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssessRiskResponse {
    pub assessment: String,
}

// --- Controls ---

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateControlRequest {
    pub risk_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub control_type: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateControlRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub control_type: Option<String>,
    pub status: Option<String>,
}

// --- Compliance ---

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateComplianceRequest {
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub standard: String,
    pub status: ComplianceStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateComplianceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub standard: Option<String>,
    pub status: Option<ComplianceStatus>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReconcileRequest {
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub items_examined: u64,
    pub items_updated: u64,
}

// --- Documents ---

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    pub project_id: Uuid,
    pub name: String,
    pub doc_type: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub content_ref: Option<String>,
    #[serde(default = "default_approval")]
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<String>,
    pub approval_date: Option<NaiveDate>,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_approval() -> ApprovalStatus {
    ApprovalStatus::Pending
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    pub name: Option<String>,
    pub doc_type: Option<String>,
    pub version: Option<String>,
    /// Some(ref) replaces the stored content reference; the prior reference
    /// is released.
    pub content_ref: Option<String>,
    pub approval_status: Option<ApprovalStatus>,
    pub approved_by: Option<String>,
    pub approval_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DraftDocumentRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DraftDocumentResponse {
    pub text: String,
}

// --- RAG ---

#[derive(Debug, Serialize, Deserialize)]
pub struct RagQueryRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RagQueryResponse {
    pub answer: String,
    /// True when the answer was generated from retrieved context; false for
    /// the fixed no-evidence reply.
    pub grounded: bool,
    pub context: Vec<ScoredChunk>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    pub chunks_indexed: u64,
    pub documents_skipped: u64,
}

// --- Audit ---

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuditLogQuery {
    pub project_id: Option<Uuid>,
}
