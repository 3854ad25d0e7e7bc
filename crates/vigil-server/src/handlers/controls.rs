use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use vigil_core::api_types::{CreateControlRequest, UpdateControlRequest};

use crate::handlers::error_response;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ControlListQuery {
    pub risk_id: Option<Uuid>,
}

pub async fn list_controls(
    State(state): State<AppState>,
    Query(query): Query<ControlListQuery>,
) -> impl IntoResponse {
    match state.store.list_controls(query.risk_id).await {
        Ok(controls) => (StatusCode::OK, Json(controls)).into_response(),
        Err(e) => {
            error!("Failed to list controls: {e}");
            error_response(&e)
        }
    }
}

pub async fn create_control(
    State(state): State<AppState>,
    Json(request): Json<CreateControlRequest>,
) -> impl IntoResponse {
    info!(name = %request.name, risk_id = %request.risk_id, "Creating control");

    match state
        .store
        .create_control(
            request.risk_id,
            request.name,
            request.description,
            request.control_type,
            request.status,
        )
        .await
    {
        Ok(control) => (StatusCode::CREATED, Json(control)).into_response(),
        Err(e) => {
            error!("Failed to create control: {e}");
            error_response(&e)
        }
    }
}

pub async fn update_control(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateControlRequest>,
) -> impl IntoResponse {
    match state
        .store
        .update_control(
            id,
            request.name,
            request.description,
            request.control_type,
            request.status,
        )
        .await
    {
        Ok(control) => (StatusCode::OK, Json(control)).into_response(),
        Err(e) => {
            error!("Failed to update control {id}: {e}");
            error_response(&e)
        }
    }
}

pub async fn delete_control(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.delete_control(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete control {id}: {e}");
            error_response(&e)
        }
    }
}
