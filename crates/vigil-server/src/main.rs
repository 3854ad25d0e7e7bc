use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod handlers;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vigil=info".parse().unwrap()))
        .init();

    let config = vigil_core::AppConfig::from_env();
    let host = config.server_host.clone();
    let port = config.server_port;

    let store = Arc::new(vigil_store::MemoryRecordStore::new());
    let index = Arc::new(
        vigil_index::QdrantVectorIndex::new(&config).expect("Failed to connect to Qdrant"),
    );
    let extractor = Arc::new(vigil_extract::HttpContentExtractor::new(&config));
    let embedder = Arc::new(vigil_llm::HttpEmbeddingClient::new(&config));
    let generation = Arc::new(vigil_llm::AnthropicGenerationClient::new(&config));

    let reconciler = Arc::new(vigil_reconcile::ComplianceReconciler::new(
        store.clone() as Arc<dyn vigil_core::RecordStore>,
    ));
    let synchronizer = Arc::new(vigil_rag::CorpusSynchronizer::new(
        store.clone() as Arc<dyn vigil_core::RecordStore>,
        extractor.clone() as Arc<dyn vigil_core::ContentExtractor>,
        embedder.clone() as Arc<dyn vigil_core::EmbeddingModel>,
        index.clone() as Arc<dyn vigil_core::VectorIndex>,
    ));
    let answerer = Arc::new(vigil_rag::RagAnswerer::new(
        embedder.clone() as Arc<dyn vigil_core::EmbeddingModel>,
        index.clone() as Arc<dyn vigil_core::VectorIndex>,
        generation.clone() as Arc<dyn vigil_core::GenerationModel>,
    ));

    let state = AppState {
        config,
        store,
        index,
        generation,
        reconciler,
        synchronizer,
        answerer,
    };

    let app = routes::create_router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{host}:{port}");
    tracing::info!("Vigil server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
