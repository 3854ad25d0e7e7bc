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
    AssessRiskRequest, AssessRiskResponse, CreateRiskRequest, UpdateRiskRequest,
};
use vigil_core::RecordStore;

use crate::handlers::error_response;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RiskListQuery {
    pub project_id: Option<Uuid>,
}

pub async fn list_risks(
    State(state): State<AppState>,
    Query(query): Query<RiskListQuery>,
) -> impl IntoResponse {
    match state.store.list_risks(query.project_id).await {
        Ok(risks) => (StatusCode::OK, Json(risks)).into_response(),
        Err(e) => {
            error!("Failed to list risks: {e}");
            error_response(&e)
        }
    }
}

pub async fn create_risk(
    State(state): State<AppState>,
    Json(request): Json<CreateRiskRequest>,
) -> impl IntoResponse {
    info!(name = %request.name, project_id = %request.project_id, "Creating risk");

    match state
        .store
        .create_risk(
            request.project_id,
            request.name,
            request.description,
            request.severity,
            request.likelihood,
            request.status,
        )
        .await
    {
        Ok(risk) => (StatusCode::CREATED, Json(risk)).into_response(),
        Err(e) => {
            error!("Failed to create risk: {e}");
            error_response(&e)
        }
    }
}

pub async fn update_risk(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRiskRequest>,
) -> impl IntoResponse {
    match state
        .store
        .update_risk(
            id,
            request.name,
            request.description,
            request.severity,
            request.likelihood,
            request.status,
        )
        .await
    {
        Ok(risk) => (StatusCode::OK, Json(risk)).into_response(),
        Err(e) => {
            error!("Failed to update risk {id}: {e}");
            error_response(&e)
        }
    }
}

pub async fn delete_risk(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.delete_risk(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete risk {id}: {e}");
            error_response(&e)
        }
    }
}

pub async fn assess_risk(
    State(state): State<AppState>,
    Json(request): Json<AssessRiskRequest>,
) -> impl IntoResponse {
    info!("Assessing risk description via LLM");

    match state.generation.assess_risk(&request.description).await {
        Ok(assessment) => {
            (StatusCode::OK, Json(AssessRiskResponse { assessment })).into_response()
        }
        Err(e) => {
            error!("Risk assessment failed: {e}");
            error_response(&e)
        }
    }
}
