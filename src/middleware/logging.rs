// src/middleware/logging.rs
use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// Request logging middleware that adds structured logging for all HTTP requests
pub async fn request_logging_middleware(req: Request, next: Next) -> Result<Response, StatusCode> {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "incoming request"
    );

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    match status.as_u16() {
        200..=299 => {
            tracing::info!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = status.as_u16(),
                duration_ms = duration.as_millis() as u64,
                "request completed"
            );
        }
        400..=499 => {
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = status.as_u16(),
                duration_ms = duration.as_millis() as u64,
                "client error"
            );
        }
        _ => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = status.as_u16(),
                duration_ms = duration.as_millis() as u64,
                "request failed"
            );
        }
    }

    Ok(response)
}
