// src/error.rs
//! Centralized error-to-response mapping for both services.
//!
//! Every failed request body is `{"detail": "..."}`. Upstream model failures
//! surface as 502, locally detected bad model output as 500. The original
//! chat behavior of folding errors into a 200 reply is intentionally not kept.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::model::ModelError;
use crate::prompts::TemplateError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The model or the network path to it failed.
    #[error("upstream model error: {0}")]
    Upstream(String),
    /// The model answered, but its output failed parsing or validation.
    #[error("{0}")]
    BadModelOutput(String),
    /// The generated plan violates the user's stated restrictions.
    #[error("generated plan rejected: {0}")]
    RejectedPlan(String),
    /// A subsystem this route depends on was not initialized at startup.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(_) | ApiError::RejectedPlan(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadModelOutput(_) | ApiError::NotConfigured(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = status.as_u16(), "request failed: {}", self);
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
