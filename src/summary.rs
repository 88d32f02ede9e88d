//! Structured video summaries.
//!
//! One prompt, one generation call. The prompt asks the model to cover the
//! sections that fit and to say the rest continues in a later part; that
//! note is passed through untouched and no follow-up call is made.

use crate::config::Prompts;
use crate::error::{Result, YoyakError};
use crate::generation::{Credential, TextGenerator};
use crate::language::SummaryLanguage;
use crate::transcript::TranscriptText;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Builds summary prompts and sends them to a text generator.
pub struct SummaryOrchestrator {
    generator: Arc<dyn TextGenerator>,
    prompts: Prompts,
}

impl SummaryOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Render the summary prompt for a transcript.
    pub fn build_prompt(
        &self,
        video_url: &str,
        language: SummaryLanguage,
        transcript: &TranscriptText,
    ) -> String {
        let mut vars = HashMap::new();
        vars.insert("language".to_string(), language.display_name().to_string());
        vars.insert("video_url".to_string(), video_url.to_string());
        vars.insert("transcript".to_string(), transcript.as_str().to_string());

        self.prompts
            .render_with_custom(&self.prompts.summary.template, &vars)
    }

    /// Summarize a transcript in the target language.
    ///
    /// Returns the model output verbatim, which may be a partial summary.
    #[instrument(skip(self, credential, transcript), fields(language = %language, transcript_chars = transcript.len()))]
    pub async fn summarize(
        &self,
        credential: &Credential,
        video_url: &str,
        language: SummaryLanguage,
        transcript: &TranscriptText,
    ) -> Result<String> {
        let prompt = self.build_prompt(video_url, language, transcript);
        info!("Generating summary with {}", self.generator.name());

        self.generator
            .generate(credential, &prompt)
            .await
            .map_err(|e| match e {
                YoyakError::GenerationFailed(_) => e,
                other => YoyakError::GenerationFailed(other.to_string()),
            })
    }
}
