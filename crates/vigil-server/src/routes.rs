use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        // Health
        .route("/api/health", get(handlers::health::health_check))
        // Projects
        .route(
            "/api/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route("/api/projects/{id}", get(handlers::projects::get_project))
        // Risks
        .route(
            "/api/risks",
            get(handlers::risks::list_risks).post(handlers::risks::create_risk),
        )
        .route(
            "/api/risks/{id}",
            put(handlers::risks::update_risk).delete(handlers::risks::delete_risk),
        )
        .route("/api/risks/assess", post(handlers::risks::assess_risk))
        // Controls
        .route(
            "/api/controls",
            get(handlers::controls::list_controls).post(handlers::controls::create_control),
        )
        .route(
            "/api/controls/{id}",
            put(handlers::controls::update_control).delete(handlers::controls::delete_control),
        )
        // Compliance
        .route(
            "/api/compliance",
            get(handlers::compliance::list_items).post(handlers::compliance::create_item),
        )
        .route(
            "/api/compliance/{id}",
            put(handlers::compliance::update_item).delete(handlers::compliance::delete_item),
        )
        .route("/api/compliance/reconcile", post(handlers::compliance::reconcile))
        // Documents
        .route(
            "/api/documents",
            get(handlers::documents::list_documents).post(handlers::documents::create_document),
        )
        .route(
            "/api/documents/{id}",
            put(handlers::documents::update_document)
                .delete(handlers::documents::delete_document),
        )
        .route("/api/documents/draft", post(handlers::documents::draft_document))
        // Audit
        .route("/api/audit", get(handlers::audit::list_audit_logs))
        // RAG
        .route("/api/rag/sync", post(handlers::rag::sync_corpus))
        .route("/api/rag/query", post(handlers::rag::query))
        .route("/api/rag/summary", get(handlers::rag::summary))
}
