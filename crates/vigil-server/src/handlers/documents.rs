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
    CreateDocumentRequest, DraftDocumentRequest, DraftDocumentResponse, UpdateDocumentRequest,
};
use vigil_core::RecordStore;

use crate::handlers::error_response;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DocumentListQuery {
    pub project_id: Option<Uuid>,
}

pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<DocumentListQuery>,
) -> impl IntoResponse {
    match state.store.list_documents(query.project_id).await {
        Ok(documents) => (StatusCode::OK, Json(documents)).into_response(),
        Err(e) => {
            error!("Failed to list documents: {e}");
            error_response(&e)
        }
    }
}

pub async fn create_document(
    State(state): State<AppState>,
    Json(request): Json<CreateDocumentRequest>,
) -> impl IntoResponse {
    info!(name = %request.name, project_id = %request.project_id, "Creating document");

    match state
        .store
        .create_document(
            request.project_id,
            request.name,
            request.doc_type,
            request.version,
            request.content_ref,
            request.approval_status,
            request.approved_by,
            request.approval_date,
        )
        .await
    {
        Ok(document) => (StatusCode::CREATED, Json(document)).into_response(),
        Err(e) => {
            error!("Failed to create document: {e}");
            error_response(&e)
        }
    }
}

pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDocumentRequest>,
) -> impl IntoResponse {
    match state
        .store
        .update_document(
            id,
            request.name,
            request.doc_type,
            request.version,
            request.content_ref,
            request.approval_status,
            request.approved_by,
            request.approval_date,
        )
        .await
    {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => {
            error!("Failed to update document {id}: {e}");
            error_response(&e)
        }
    }
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.delete_document(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete document {id}: {e}");
            error_response(&e)
        }
    }
}

pub async fn draft_document(
    State(state): State<AppState>,
    Json(request): Json<DraftDocumentRequest>,
) -> impl IntoResponse {
    info!("Drafting document text via LLM");

    match state.generation.draft_document(&request.prompt).await {
        Ok(text) => (StatusCode::OK, Json(DraftDocumentResponse { text })).into_response(),
        Err(e) => {
            error!("Document drafting failed: {e}");
            error_response(&e)
        }
    }
}
