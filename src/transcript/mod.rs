//! Transcript acquisition for Yoyak.
//!
//! Captions are requested in the target language first. If that fails, the
//! default caption track is fetched and machine translated instead.

mod export;
mod youtube;

pub use export::TranscriptExport;
pub use youtube::YoutubeCaptions;

use crate::error::{Result, YoyakError};
use crate::translation::{TranslationRelay, AUTO_DETECT};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A single caption as returned by the caption provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    /// Caption text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl CaptionSegment {
    pub fn new(text: String, start: f64, duration: f64) -> Self {
        Self {
            text,
            start,
            duration,
        }
    }
}

/// Flattened transcript text. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptText(String);

impl TranscriptText {
    /// Wrap text, returning None when it has no content.
    pub fn new(text: String) -> Option<Self> {
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    /// Join caption texts in order with single spaces.
    pub fn from_segments(segments: &[CaptionSegment]) -> Option<Self> {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for TranscriptText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for caption providers.
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// Fetch the caption track of a video in `language`, or the video's
    /// default track when `language` is None.
    async fn fetch_captions(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<Vec<CaptionSegment>>;
}

/// Acquires transcripts with a translate-on-fallback strategy.
pub struct TranscriptAcquirer {
    captions: Arc<dyn CaptionProvider>,
    relay: TranslationRelay,
}

impl TranscriptAcquirer {
    pub fn new(captions: Arc<dyn CaptionProvider>, relay: TranslationRelay) -> Self {
        Self { captions, relay }
    }

    /// Get the transcript of `video_id` in `target_language`.
    #[instrument(skip(self))]
    pub async fn acquire(&self, video_id: &str, target_language: &str) -> Result<TranscriptText> {
        match self.direct(video_id, target_language).await {
            Ok(transcript) => {
                info!("Using {} captions ({} chars)", target_language, transcript.len());
                return Ok(transcript);
            }
            Err(e) => {
                warn!("No {} captions ({}), falling back to translation", target_language, e);
            }
        }

        self.translated(video_id, target_language)
            .await
            .map_err(|e| match e {
                YoyakError::TranscriptUnavailable(_) => e,
                other => YoyakError::TranscriptUnavailable(other.to_string()),
            })
    }

    /// Captions published in the target language.
    async fn direct(&self, video_id: &str, language: &str) -> Result<TranscriptText> {
        let segments = self.captions.fetch_captions(video_id, Some(language)).await?;
        TranscriptText::from_segments(&segments).ok_or_else(|| {
            YoyakError::TranscriptUnavailable(format!("{} captions are empty", language))
        })
    }

    /// Default captions, machine translated to the target language.
    async fn translated(&self, video_id: &str, language: &str) -> Result<TranscriptText> {
        let segments = self.captions.fetch_captions(video_id, None).await?;
        let original = TranscriptText::from_segments(&segments).ok_or_else(|| {
            YoyakError::TranscriptUnavailable("Default captions are empty".to_string())
        })?;

        debug!("Translating {} chars of default captions", original.len());
        let translated = self
            .relay
            .translate(original.as_str(), AUTO_DETECT, language)
            .await?;

        TranscriptText::new(translated).ok_or_else(|| {
            YoyakError::TranscriptUnavailable("Translation returned no text".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{segments, FakeCaptions, FakeTranslator};

    fn acquirer(
        captions: FakeCaptions,
        translator: FakeTranslator,
    ) -> (TranscriptAcquirer, Arc<FakeCaptions>, Arc<FakeTranslator>) {
        let captions = Arc::new(captions);
        let translator = Arc::new(translator);
        let acquirer = TranscriptAcquirer::new(
            captions.clone(),
            TranslationRelay::new(translator.clone()),
        );
        (acquirer, captions, translator)
    }

    #[test]
    fn test_from_segments_joins_with_spaces() {
        let text = TranscriptText::from_segments(&segments(&["Hello", "world"])).unwrap();
        assert_eq!(text.as_str(), "Hello world");
    }

    #[test]
    fn test_blank_transcript_is_absent() {
        assert!(TranscriptText::new("   ".to_string()).is_none());
        assert!(TranscriptText::from_segments(&[]).is_none());
    }

    #[tokio::test]
    async fn test_direct_track_skips_translation() {
        let (acquirer, captions, translator) = acquirer(
            FakeCaptions::new()
                .with_track("en", &["Hello", "world"])
                .with_default_track(&["안녕", "세계"]),
            FakeTranslator::new(),
        );

        let transcript = acquirer.acquire("abc123", "en").await.unwrap();

        assert_eq!(transcript.as_str(), "Hello world");
        assert!(translator.calls().is_empty());
        assert_eq!(
            captions.calls(),
            vec![("abc123".to_string(), Some("en".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_fallback_translates_default_track() {
        let (acquirer, captions, translator) = acquirer(
            FakeCaptions::new().with_default_track(&["안녕", "세계"]),
            FakeTranslator::new(),
        );

        let transcript = acquirer.acquire("abc123", "en").await.unwrap();

        assert_eq!(transcript.as_str(), "[en] 안녕 세계");
        assert_eq!(
            translator.calls(),
            vec![("안녕 세계".to_string(), "auto".to_string(), "en".to_string())]
        );
        assert_eq!(
            captions.calls(),
            vec![
                ("abc123".to_string(), Some("en".to_string())),
                ("abc123".to_string(), None),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_direct_track_falls_back() {
        let (acquirer, _, translator) = acquirer(
            FakeCaptions::new()
                .with_track("ko", &[" "])
                .with_default_track(&["Hello"]),
            FakeTranslator::new(),
        );

        let transcript = acquirer.acquire("abc123", "ko").await.unwrap();

        assert_eq!(transcript.as_str(), "[ko] Hello");
        assert_eq!(translator.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_no_tracks_is_unavailable() {
        let (acquirer, _, translator) = acquirer(FakeCaptions::new(), FakeTranslator::new());

        let result = acquirer.acquire("abc123", "en").await;

        assert!(matches!(result, Err(YoyakError::TranscriptUnavailable(_))));
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_translation_failure_is_unavailable() {
        let (acquirer, _, _) = acquirer(
            FakeCaptions::new().with_default_track(&["Hallo", "Welt"]),
            FakeTranslator::failing(),
        );

        let result = acquirer.acquire("abc123", "ko").await;
        assert!(matches!(result, Err(YoyakError::TranscriptUnavailable(_))));
    }
}
