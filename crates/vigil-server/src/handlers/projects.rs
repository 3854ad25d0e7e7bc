use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{error, info};
use uuid::Uuid;

use vigil_core::api_types::CreateProjectRequest;
use vigil_core::RecordStore;

use crate::handlers::error_response;
use crate::state::AppState;

pub async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_projects().await {
        Ok(projects) => (StatusCode::OK, Json(projects)).into_response(),
        Err(e) => {
            error!("Failed to list projects: {e}");
            error_response(&e)
        }
    }
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.get_project(id).await {
        Ok(Some(project)) => (StatusCode::OK, Json(project)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("Project {id} not found") })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to fetch project {id}: {e}");
            error_response(&e)
        }
    }
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    info!(name = %request.name, "Creating project");

    match state
        .store
        .create_project(
            request.name,
            request.description,
            request.scope,
            request.start_date,
            request.end_date,
        )
        .await
    {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => {
            error!("Failed to create project: {e}");
            error_response(&e)
        }
    }
}
