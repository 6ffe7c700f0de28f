// src/model.rs
//! Generative model abstraction so request handlers can run against the real
//! Gemini client or a stub during tests.

use async_trait::async_trait;
use thiserror::Error;

/// Model used for the chat assistant and workout plan generation.
pub const CHAT_MODEL: &str = "gemini-2.5-flash";
pub const PLAN_MODEL: &str = "gemini-2.5-flash";
/// Model used for meal plan generation.
pub const MEAL_MODEL: &str = "gemini-2.0-flash-lite";
/// Embedding model backing the exercise index.
pub const EMBEDDING_MODEL: &str = "text-embedding-004";

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("API error: {0}")]
    Api(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A single text-generation call. Prompts are fully rendered before they get
/// here; the request only carries tuning knobs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: &'static str,
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    /// Set to "application/json" to have the model emit pure JSON.
    pub response_mime_type: Option<&'static str>,
}

impl GenerateRequest {
    pub fn new(model: &'static str, prompt: String) -> Self {
        Self {
            model,
            prompt,
            temperature: None,
            max_output_tokens: None,
            response_mime_type: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_json_output(mut self) -> Self {
        self.response_mime_type = Some("application/json");
        self
    }
}

/// Text generation plus embedding, the two upstream calls this system makes.
///
/// `generate` returns `Ok(None)` when the model answers with no candidates or
/// an empty candidate; callers decide whether that degrades or errors.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<Option<String>, ModelError>;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError>;
}
