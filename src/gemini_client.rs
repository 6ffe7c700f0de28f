// src/gemini_client.rs
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::model::{GenerateRequest, GenerativeModel, ModelError, EMBEDDING_MODEL};

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    model: String,
    content: EmbedContent,
    #[serde(rename = "outputDimensionality", skip_serializing_if = "Option::is_none")]
    output_dimensionality: Option<u32>,
}

#[derive(Debug, Serialize)]
struct EmbedContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: Embedding,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    values: Vec<f32>,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<Option<String>, ModelError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, request.model, self.api_key
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt,
                }],
                role: Some("user".to_string()),
            }],
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
                response_mime_type: request.response_mime_type.map(|m| m.to_string()),
            }),
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(format!("Gemini API error: {}", error_text)));
        }

        let response_text = response.text().await?;
        let preview: String = response_text.chars().take(500).collect();
        tracing::debug!("Gemini response (truncated): {}", preview);

        let result: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| ModelError::InvalidResponse(format!("error decoding response body: {}", e)))?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty());

        Ok(text)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let url = format!(
            "{}/models/{}:embedContent?key={}",
            self.base_url, EMBEDDING_MODEL, self.api_key
        );

        let request = EmbedContentRequest {
            model: format!("models/{}", EMBEDDING_MODEL),
            content: EmbedContent {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
            // Smaller dimension keeps the in-memory index light
            output_dimensionality: Some(768),
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(format!(
                "Gemini Embedding API error: {}",
                error_text
            )));
        }

        let result: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("error decoding response body: {}", e)))?;

        Ok(result.embedding.values)
    }
}
