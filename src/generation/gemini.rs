//! Google Gemini `generateContent` client.

use super::{Credential, TextGenerator};
use crate::error::{Result, YoyakError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini text generator.
pub struct GeminiGenerator {
    client: reqwest::Client,
    model: String,
    temperature: f32,
}

impl GeminiGenerator {
    pub fn new(client: reqwest::Client, model: &str, temperature: f32) -> Self {
        Self {
            client,
            model: model.to_string(),
            temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Join the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        YoyakError::GenerationFailed(format!("Failed to parse Gemini response: {}", e))
    })?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(YoyakError::GenerationFailed(
            "Empty response from Gemini".to_string(),
        ));
    }

    Ok(text)
}

/// Pull the message out of an error payload, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, credential, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate(&self, credential: &Credential, prompt: &str) -> Result<String> {
        info!("Requesting summary from Gemini");

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let body = serde_json::json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "temperature": self.temperature
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| YoyakError::GenerationFailed(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| YoyakError::GenerationFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(YoyakError::GenerationFailed(format!(
                "Gemini API error ({}): {}",
                status,
                error_message(&text)
            )));
        }

        let summary = extract_text(&text)?;
        debug!("Generated {} characters", summary.len());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "1. Topic overview\n"}, {"text": "More in the next part."}], "role": "model"},
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(
            extract_text(body).unwrap(),
            "1. Topic overview\nMore in the next part."
        );
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert!(matches!(
            extract_text(body),
            Err(YoyakError::GenerationFailed(_))
        ));
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid.");
        assert_eq!(error_message("quota exceeded "), "quota exceeded");
    }
}
