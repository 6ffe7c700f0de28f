// src/handlers/chat.rs
use axum::{routing::post, Extension, Json, Router};
use std::sync::Arc;

use crate::conversation::{render_history, ConversationMessage, DEFAULT_SESSION, HISTORY_LIMIT};
use crate::error::ApiError;
use crate::model::{GenerateRequest, CHAT_MODEL};
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::prompts::CHAT_PROMPT;
use crate::AppState;

pub fn chat_routes() -> Router {
    Router::new().route("/chat", post(chat))
}

async fn chat(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = request
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());

    let session = state.conversations.session(&session_id).await;
    // Holding the transcript lock across the model call serializes the
    // session's turns; other sessions proceed in parallel.
    let mut transcript = session.lock().await;

    let history = render_history(&transcript, HISTORY_LIMIT);
    let prompt = CHAT_PROMPT.render(&[("history", history), ("input", request.message.clone())])?;

    let reply = state
        .model
        .generate(
            GenerateRequest::new(CHAT_MODEL, prompt)
                .with_temperature(0.7)
                .with_max_output_tokens(2048),
        )
        .await?
        .ok_or_else(|| ApiError::Upstream("model returned an empty reply".to_string()))?;

    transcript.push(ConversationMessage::new_human(request.message));
    transcript.push(ConversationMessage::new_assistant(reply.clone()));

    tracing::info!(session_id = %session_id, turns = transcript.len(), "chat turn completed");

    Ok(Json(ChatResponse { reply, session_id }))
}
