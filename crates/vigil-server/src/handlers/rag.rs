use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{error, info};

use vigil_core::api_types::{RagQueryRequest, RagQueryResponse, SyncResponse};
use vigil_rag::RagOutcome;

use crate::handlers::error_response;
use crate::state::AppState;

pub async fn sync_corpus(State(state): State<AppState>) -> impl IntoResponse {
    info!("Corpus synchronization requested");

    match state.synchronizer.sync().await {
        Ok(report) => {
            let response = SyncResponse {
                chunks_indexed: report.chunks_indexed,
                documents_skipped: report.documents_skipped,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Corpus synchronization failed: {e}");
            error_response(&e)
        }
    }
}

pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<RagQueryRequest>,
) -> impl IntoResponse {
    info!(question = %request.question, "RAG query");

    match state.answerer.answer(&request.question).await {
        Ok(RagOutcome::Answered(answered)) => {
            let response = RagQueryResponse {
                answer: answered.answer,
                grounded: true,
                context: answered.context,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(RagOutcome::NoAnswer { message }) => {
            let response = RagQueryResponse {
                answer: message,
                grounded: false,
                context: Vec::new(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("RAG query failed: {e}");
            error_response(&e)
        }
    }
}

pub async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    match state.synchronizer.summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            error!("Failed to summarize index: {e}");
            error_response(&e)
        }
    }
}
