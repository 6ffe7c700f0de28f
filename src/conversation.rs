// src/conversation.rs
//! Per-session conversation transcripts for the chat endpoint.
//!
//! Sessions are isolated: each transcript sits behind its own `Mutex` so a
//! session's turns are processed one at a time, while different sessions run
//! concurrently. Transcripts live for the process lifetime only.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

/// Session used when the caller does not supply a `session_id`. Legacy
/// clients that never send one all share this transcript, matching the
/// single-memory behavior they were written against.
pub const DEFAULT_SESSION: &str = "default";

/// Turns of history included in the prompt.
pub const HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageRole {
    Human,
    Assistant,
}

impl MessageRole {
    /// Label used when rendering the transcript into the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::Human => "User",
            MessageRole::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ConversationMessage {
    pub fn new_human(content: String) -> Self {
        Self {
            role: MessageRole::Human,
            content,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn new_assistant(content: String) -> Self {
        Self {
            role: MessageRole::Assistant,
            content,
            created_at: chrono::Utc::now(),
        }
    }
}

pub type SharedTranscript = Arc<Mutex<Vec<ConversationMessage>>>;

#[derive(Clone, Default)]
pub struct ConversationStore {
    sessions: Arc<RwLock<HashMap<String, SharedTranscript>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the transcript for a session.
    pub async fn session(&self, session_id: &str) -> SharedTranscript {
        if let Some(transcript) = self.sessions.read().await.get(session_id) {
            return transcript.clone();
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Vec::new())))
            .clone()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Render the last `limit` turns as "User: ...\nAssistant: ..." lines.
pub fn render_history(messages: &[ConversationMessage], limit: usize) -> String {
    let start = messages.len().saturating_sub(limit);
    messages[start..]
        .iter()
        .map(|message| format!("{}: {}", message.role.label(), message.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = ConversationStore::new();

        {
            let session_a = store.session("a").await;
            session_a
                .lock()
                .await
                .push(ConversationMessage::new_human("hello from a".to_string()));
        }
        {
            let session_b = store.session("b").await;
            session_b
                .lock()
                .await
                .push(ConversationMessage::new_human("hello from b".to_string()));
        }

        let session_a = store.session("a").await;
        let transcript = session_a.lock().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].content, "hello from a");
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_session_is_reused() {
        let store = ConversationStore::new();
        let first = store.session("s").await;
        first
            .lock()
            .await
            .push(ConversationMessage::new_assistant("hi".to_string()));

        let second = store.session("s").await;
        assert_eq!(second.lock().await.len(), 1);
        assert_eq!(store.session_count().await, 1);
    }

    #[test]
    fn test_render_history_caps_turns() {
        let messages: Vec<ConversationMessage> = (0..30)
            .map(|i| ConversationMessage::new_human(format!("message {}", i)))
            .collect();

        let rendered = render_history(&messages, HISTORY_LIMIT);
        assert!(!rendered.contains("message 9"));
        assert!(rendered.contains("message 10"));
        assert!(rendered.contains("message 29"));
        assert!(rendered.starts_with("User: message 10"));
    }
}
