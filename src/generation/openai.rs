//! OpenAI chat completion client.

use super::{Credential, TextGenerator};
use crate::error::{Result, YoyakError};
use async_openai::config::OpenAIConfig;
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// OpenAI text generator.
pub struct OpenAiGenerator {
    http_client: reqwest::Client,
    model: String,
    temperature: f32,
}

impl OpenAiGenerator {
    pub fn new(http_client: reqwest::Client, model: &str, temperature: f32) -> Self {
        Self {
            http_client,
            model: model.to_string(),
            temperature,
        }
    }

    /// Client configured with the caller's key for this call only.
    fn client_for(&self, credential: &Credential) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new().with_api_key(credential.expose());
        Client::with_config(config).with_http_client(self.http_client.clone())
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self, credential, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate(&self, credential: &Credential, prompt: &str) -> Result<String> {
        info!("Requesting summary from OpenAI");

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| YoyakError::GenerationFailed(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message.into()])
            .temperature(self.temperature)
            .build()
            .map_err(|e| YoyakError::GenerationFailed(e.to_string()))?;

        let response = self
            .client_for(credential)
            .chat()
            .create(request)
            .await
            .map_err(|e| YoyakError::GenerationFailed(format!("OpenAI API error: {}", e)))?;

        let summary = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| YoyakError::GenerationFailed("Empty response from OpenAI".to_string()))?
            .clone();

        debug!("Generated {} characters", summary.len());
        Ok(summary)
    }
}
