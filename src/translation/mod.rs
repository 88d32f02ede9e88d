//! Machine translation for Yoyak.
//!
//! The relay is a thin, stateless pass-through to a [`Translator`]. It backs
//! both the transcript fallback path and the on-demand "show the transcript
//! in the other language" action.

mod google;

pub use google::GoogleTranslator;

use crate::error::{Result, YoyakError};
use crate::language::SummaryLanguage;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Source code meaning "detect the language".
pub const AUTO_DETECT: &str = "auto";

/// Trait for translation services.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` (or [`AUTO_DETECT`]) to `target`.
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// Routes translation requests to the configured translator.
#[derive(Clone)]
pub struct TranslationRelay {
    translator: Arc<dyn Translator>,
}

impl TranslationRelay {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Translate text between two language codes.
    ///
    /// Empty input is returned as-is without a call.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        debug!("Translating {} -> {}", source, target);

        self.translator
            .translate(text, source, target)
            .await
            .map_err(|e| match e {
                YoyakError::TranslationFailed(_) => e,
                other => YoyakError::TranslationFailed(other.to_string()),
            })
    }

    /// Render text written in `from` in the other summary language.
    pub async fn translate_to_other(&self, text: &str, from: SummaryLanguage) -> Result<String> {
        self.translate(text, from.code(), from.other().code()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTranslator;

    #[tokio::test]
    async fn test_routes_source_and_target() {
        let translator = Arc::new(FakeTranslator::new());
        let relay = TranslationRelay::new(translator.clone());

        relay.translate("안녕하세요", "ko", "en").await.unwrap();
        relay.translate("Hello", "en", "ko").await.unwrap();

        assert_eq!(
            translator.calls(),
            vec![
                ("안녕하세요".to_string(), "ko".to_string(), "en".to_string()),
                ("Hello".to_string(), "en".to_string(), "ko".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_translate_to_other() {
        let translator = Arc::new(FakeTranslator::new());
        let relay = TranslationRelay::new(translator.clone());

        relay.translate_to_other("text", SummaryLanguage::Ko).await.unwrap();
        relay.translate_to_other("text", SummaryLanguage::En).await.unwrap();

        let pairs: Vec<_> = translator
            .calls()
            .into_iter()
            .map(|(_, source, target)| (source, target))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("ko".to_string(), "en".to_string()),
                ("en".to_string(), "ko".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_text_skips_call() {
        let translator = Arc::new(FakeTranslator::new());
        let relay = TranslationRelay::new(translator.clone());

        assert_eq!(relay.translate("  ", "ko", "en").await.unwrap(), "");
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_maps_to_translation_failed() {
        let relay = TranslationRelay::new(Arc::new(FakeTranslator::failing()));

        let result = relay.translate("Hello", "en", "ko").await;
        assert!(matches!(result, Err(YoyakError::TranslationFailed(_))));
    }
}
