//! Generative text providers.
//!
//! Every call takes the caller's credential explicitly; no provider keeps a
//! key in process-wide state.

mod gemini;
mod openai;

pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;

use crate::config::{GenerationProvider, GenerationSettings};
use crate::error::{Result, YoyakError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// An API key for a generative text provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key, rejecting missing or blank values.
    pub fn new(key: Option<&str>, provider: &str) -> Result<Self> {
        match key.map(str::trim) {
            Some(k) if !k.is_empty() => Ok(Self(k.to_string())),
            _ => Err(YoyakError::MissingCredential(provider.to_string())),
        }
    }

    /// The raw key, for building a request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// Trait for generative text services.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name, for messages.
    fn name(&self) -> &str;

    /// Generate a completion for a single prompt.
    async fn generate(&self, credential: &Credential, prompt: &str) -> Result<String>;
}

/// Build an HTTP client with an optional timeout.
pub(crate) fn http_client(timeout_secs: Option<u64>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Create the generator selected in settings.
pub fn create_generator(settings: &GenerationSettings) -> Result<Arc<dyn TextGenerator>> {
    let client = http_client(settings.request_timeout_secs)?;
    let model = settings.model_name();

    let generator: Arc<dyn TextGenerator> = match settings.provider {
        GenerationProvider::Gemini => {
            Arc::new(GeminiGenerator::new(client, model, settings.temperature))
        }
        GenerationProvider::OpenAi => {
            Arc::new(OpenAiGenerator::new(client, model, settings.temperature))
        }
    };

    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credential_is_missing() {
        assert!(matches!(
            Credential::new(None, "gemini"),
            Err(YoyakError::MissingCredential(_))
        ));
        assert!(matches!(
            Credential::new(Some("   "), "gemini"),
            Err(YoyakError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_credential_is_redacted() {
        let credential = Credential::new(Some(" secret-key "), "gemini").unwrap();
        assert_eq!(credential.expose(), "secret-key");
        assert_eq!(format!("{:?}", credential), "Credential(***)");
    }

    #[test]
    fn test_create_generator_follows_provider() {
        let mut settings = GenerationSettings::default();
        assert_eq!(create_generator(&settings).unwrap().name(), "gemini");

        settings.provider = GenerationProvider::OpenAi;
        assert_eq!(create_generator(&settings).unwrap().name(), "openai");
    }
}
