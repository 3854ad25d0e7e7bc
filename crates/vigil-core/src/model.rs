use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub scope: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: String, description: String, scope: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            scope,
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Open,
    Mitigated,
    Closed,
}

/// Severity and likelihood are free text: in practice they come back from an
/// LLM assessment ("High", "Medium", "Low with caveats", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risk {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: String,
    pub severity: String,
    pub likelihood: String,
    pub status: RiskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    pub id: Uuid,
    pub risk_id: Uuid,
    pub name: String,
    pub description: String,
    pub control_type: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    InProgress,
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::NonCompliant => "Non-Compliant",
            ComplianceStatus::InProgress => "In Progress",
        };
        f.write_str(s)
    }
}

/// A tracked obligation (e.g. a regulatory control) whose status reflects
/// whether evidence of satisfaction exists. Updated both manually and by the
/// compliance reconciler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceItem {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: String,
    pub standard: String,
    pub status: ComplianceStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub doc_type: String,
    pub version: String,
    /// Opaque reference to the stored content (storage path or URL).
    /// Replacing it must release the prior stored content.
    pub content_ref: Option<String>,
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<String>,
    pub approval_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    /// None for global actions.
    pub project_id: Option<Uuid>,
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(project_id: Option<Uuid>, action: &str, details: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            action: action.to_string(),
            details: details.to_string(),
            timestamp: Utc::now(),
        }
    }
}
