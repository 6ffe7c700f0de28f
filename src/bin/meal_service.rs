// src/bin/meal_service.rs - HealthyEats meal generator service
use axum::{routing::get, Extension, Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use healthyeats_ai::gemini_client::GeminiClient;
use healthyeats_ai::logging::init_logging;
use healthyeats_ai::model::GenerativeModel;
use healthyeats_ai::{handlers, middleware, AppState};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging("HealthyEats Meal Generator").expect("Failed to initialize logging");

    // Missing credential is startup-fatal for this service
    let api_key = std::env::var("GEMINI_API_KEY").expect(
        "GEMINI_API_KEY environment variable is not set. Please set it to a valid Google API key.",
    );
    let model: Arc<dyn GenerativeModel> = Arc::new(GeminiClient::new(api_key));

    let shared_state = Arc::new(AppState::new(model));

    let app = Router::new()
        .merge(handlers::meal::meal_routes())
        .route("/", get(root))
        .route("/api/status", get(api_status))
        .layer(axum::middleware::from_fn(
            middleware::logging::request_logging_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(Extension(shared_state));

    let addr = std::env::var("MEAL_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8001".to_string());
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
    Json(serde_json::json!({ "message": "HealthyEats Meal Generator API is running!" }))
}

async fn api_status() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "gemini_ai": "configured",
        },
        "endpoints": {
            "generate_meal": "/generate-meal",
            "generate_meal_structured": "/generate-meal/structured",
            "status": "/api/status"
        }
    }))
}
