pub mod audit;
pub mod compliance;
pub mod controls;
pub mod documents;
pub mod health;
pub mod projects;
pub mod rag;
pub mod risks;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};

use vigil_core::VigilError;

pub(crate) fn error_response(e: &VigilError) -> Response {
    let status = match e {
        VigilError::NotFound(_) => StatusCode::NOT_FOUND,
        VigilError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
}
