use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use vigil_core::api_types::HealthResponse;
use vigil_core::{RecordStore, VectorIndex};

use crate::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    info!("Health check requested");

    let (store_reachable, project_count) = match state.store.list_projects().await {
        Ok(projects) => (true, projects.len() as u64),
        Err(e) => {
            tracing::warn!("Record store check failed: {e}");
            (false, 0)
        }
    };

    let (index_reachable, indexed_chunk_count) = match state.index.count().await {
        Ok(count) => (true, count),
        Err(e) => {
            tracing::warn!("Vector index check failed: {e}");
            (false, 0)
        }
    };

    let status = if store_reachable && index_reachable {
        "ok".to_string()
    } else {
        "degraded".to_string()
    };

    let response = HealthResponse {
        status,
        version: VERSION.to_string(),
        store_reachable,
        index_reachable,
        project_count,
        indexed_chunk_count,
    };

    (StatusCode::OK, Json(response))
}
