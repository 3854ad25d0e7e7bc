use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use vigil_core::api_types::{
    CreateComplianceRequest, ReconcileRequest, ReconcileResponse, UpdateComplianceRequest,
};
use vigil_core::RecordStore;

use crate::handlers::error_response;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ComplianceListQuery {
    pub project_id: Option<Uuid>,
}

pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ComplianceListQuery>,
) -> impl IntoResponse {
    match state.store.list_compliance_items(query.project_id).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => {
            error!("Failed to list compliance items: {e}");
            error_response(&e)
        }
    }
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateComplianceRequest>,
) -> impl IntoResponse {
    info!(name = %request.name, project_id = %request.project_id, "Creating compliance item");

    match state
        .store
        .create_compliance_item(
            request.project_id,
            request.name,
            request.description,
            request.standard,
            request.status,
        )
        .await
    {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => {
            error!("Failed to create compliance item: {e}");
            error_response(&e)
        }
    }
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateComplianceRequest>,
) -> impl IntoResponse {
    match state
        .store
        .update_compliance_item(
            id,
            request.name,
            request.description,
            request.standard,
            request.status,
        )
        .await
    {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => {
            error!("Failed to update compliance item {id}: {e}");
            error_response(&e)
        }
    }
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.delete_compliance_item(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete compliance item {id}: {e}");
            error_response(&e)
        }
    }
}

pub async fn reconcile(
    State(state): State<AppState>,
    Json(request): Json<ReconcileRequest>,
) -> impl IntoResponse {
    info!(project_id = ?request.project_id, "Reconciliation requested");

    match state.reconciler.reconcile(request.project_id).await {
        Ok(report) => {
            let response = ReconcileResponse {
                items_examined: report.items_examined,
                items_updated: report.items_updated,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Reconciliation failed: {e}");
            error_response(&e)
        }
    }
}
