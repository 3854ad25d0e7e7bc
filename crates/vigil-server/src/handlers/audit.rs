use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::error;

use vigil_core::api_types::AuditLogQuery;
use vigil_core::RecordStore;

use crate::handlers::error_response;
use crate::state::AppState;

pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
) -> impl IntoResponse {
    match state.store.list_audit_logs(query.project_id).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            error!("Failed to list audit logs: {e}");
            error_response(&e)
        }
    }
}
