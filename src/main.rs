// src/main.rs - HealthyEats AI engine: chat assistant + RAG workout plans
use axum::{routing::get, Extension, Json, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use healthyeats_ai::gemini_client::GeminiClient;
use healthyeats_ai::logging::init_logging;
use healthyeats_ai::model::GenerativeModel;
use healthyeats_ai::retrieval::ExerciseIndex;
use healthyeats_ai::{handlers, middleware, AppState};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging("HealthyEats AI engine").expect("Failed to initialize logging");

    // Missing credential is startup-fatal for this service
    let api_key = std::env::var("GEMINI_API_KEY").expect(
        "GEMINI_API_KEY environment variable is not set. Please set it to a valid Google API key.",
    );
    let model: Arc<dyn GenerativeModel> = Arc::new(GeminiClient::new(api_key));

    let catalog_path =
        std::env::var("EXERCISE_CATALOG").unwrap_or_else(|_| "data/exercise.json".to_string());
    tracing::info!("Building exercise index from {}...", catalog_path);
    let index = ExerciseIndex::from_catalog_file(model.as_ref(), Path::new(&catalog_path))
        .await
        .expect("Failed to build exercise index");
    tracing::info!("Exercise index ready: {} exercises embedded", index.len());

    let shared_state = Arc::new(AppState::new(model).with_exercise_index(Arc::new(index)));

    let app = Router::new()
        .merge(handlers::chat::chat_routes())
        .merge(handlers::plan::plan_routes())
        .route("/", get(root))
        .route("/api/status", get(api_status))
        .layer(axum::middleware::from_fn(
            middleware::logging::request_logging_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(Extension(shared_state));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(
        "listening on {}",
        listener.local_addr().expect("listener has a local address")
    );
    axum::serve(listener, app).await.expect("server error");
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "HealthyEats AI Chatbot is running." }))
}

async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    let indexed = state
        .exercise_index
        .as_ref()
        .map(|index| index.len())
        .unwrap_or(0);

    Json(serde_json::json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "gemini_ai": "configured",
            "exercise_index": indexed,
        },
        "sessions": state.conversations.session_count().await,
        "endpoints": {
            "chat": "/chat",
            "plan": "/plan",
            "status": "/api/status"
        }
    }))
}
