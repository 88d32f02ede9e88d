//! Pipeline orchestrator for Yoyak.
//!
//! Wires the providers together and runs the three user actions: look up a
//! video, analyze it, and translate its transcript. Each action is one
//! sequential chain of calls with no retries.

use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::generation::{create_generator, Credential, TextGenerator};
use crate::language::SummaryLanguage;
use crate::summary::SummaryOrchestrator;
use crate::transcript::{
    CaptionProvider, TranscriptAcquirer, TranscriptExport, TranscriptText, YoutubeCaptions,
};
use crate::translation::{GoogleTranslator, TranslationRelay, Translator};
use crate::video_source::{MetadataProvider, VideoMetadata, VideoReference, YtDlpMetadata};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Result of looking up a URL.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub reference: VideoReference,
    pub metadata: VideoMetadata,
}

/// Result of analyzing a video.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub video_id: String,
    pub language: SummaryLanguage,
    pub transcript: TranscriptText,
    /// Model output, verbatim. May be a partial summary.
    pub summary: String,
    /// Where the transcript was saved, when exporting is enabled.
    pub export: Option<TranscriptExport>,
}

/// The main orchestrator for the Yoyak pipeline.
pub struct Pipeline {
    metadata: Arc<dyn MetadataProvider>,
    acquirer: TranscriptAcquirer,
    summarizer: SummaryOrchestrator,
    relay: TranslationRelay,
    generator_name: String,
    export_dir: Option<PathBuf>,
}

impl Pipeline {
    /// Create a pipeline with the providers selected in settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let metadata = Arc::new(YtDlpMetadata::with_program(&settings.metadata.ytdlp_path));
        let captions = Arc::new(YoutubeCaptions::new(
            &settings.transcript.user_agent,
            settings.transcript.request_timeout_secs,
        )?);
        let translator = Arc::new(GoogleTranslator::new(
            &settings.translation.endpoint,
            settings.translation.max_chars_per_request,
        ));
        let generator = create_generator(&settings.generation)?;

        info!(
            "Using {} ({}) for summaries",
            settings.generation.provider,
            settings.generation.model_name()
        );

        Ok(Self::with_components(
            &settings, prompts, metadata, captions, translator, generator,
        ))
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        metadata: Arc<dyn MetadataProvider>,
        captions: Arc<dyn CaptionProvider>,
        translator: Arc<dyn Translator>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let relay = TranslationRelay::new(translator);
        let generator_name = generator.name().to_string();

        Self {
            metadata,
            acquirer: TranscriptAcquirer::new(captions, relay.clone()),
            summarizer: SummaryOrchestrator::new(generator).with_prompts(prompts),
            relay,
            generator_name,
            export_dir: settings.export.enabled.then(|| settings.export_dir()),
        }
    }

    /// Resolve a URL and fetch its metadata.
    #[instrument(skip(self))]
    pub async fn lookup(&self, url: &str) -> Result<Lookup> {
        let reference = VideoReference::parse(url);
        reference.require_id()?;

        let metadata = self.metadata.fetch(reference.url()).await?;
        Ok(Lookup {
            reference,
            metadata,
        })
    }

    /// Resolve a URL and acquire its transcript in `language`.
    #[instrument(skip(self))]
    pub async fn transcript(&self, url: &str, language: &str) -> Result<(String, TranscriptText)> {
        let reference = VideoReference::parse(url);
        let video_id = reference.require_id()?.to_string();

        let transcript = self.acquirer.acquire(&video_id, language).await?;
        Ok((video_id, transcript))
    }

    /// Acquire the transcript and summarize it.
    ///
    /// The credential is checked before any network call.
    #[instrument(skip(self, credential))]
    pub async fn analyze(
        &self,
        credential: Option<&str>,
        url: &str,
        language: SummaryLanguage,
    ) -> Result<Analysis> {
        let credential = Credential::new(credential, &self.generator_name)?;
        let reference = VideoReference::parse(url);
        let video_id = reference.require_id()?.to_string();

        let transcript = self.acquirer.acquire(&video_id, language.code()).await?;

        let summary = self
            .summarizer
            .summarize(&credential, reference.url(), language, &transcript)
            .await?;

        let export = self.export(&video_id, &transcript);

        Ok(Analysis {
            video_id,
            language,
            transcript,
            summary,
            export,
        })
    }

    /// Render an acquired transcript in the other summary language.
    pub async fn translate_transcript(
        &self,
        transcript: &TranscriptText,
        from: SummaryLanguage,
    ) -> Result<String> {
        self.relay.translate_to_other(transcript.as_str(), from).await
    }

    /// The translation relay, for ad-hoc translations.
    pub fn relay(&self) -> &TranslationRelay {
        &self.relay
    }

    fn export(&self, video_id: &str, transcript: &TranscriptText) -> Option<TranscriptExport> {
        let dir = self.export_dir.as_ref()?;
        match TranscriptExport::write(dir, video_id, transcript) {
            Ok(export) => Some(export),
            Err(e) => {
                warn!("Failed to save transcript: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SUMMARY_OUTLINE;
    use crate::error::YoyakError;
    use crate::testing::{FakeCaptions, FakeGenerator, FakeMetadata, FakeTranslator};

    struct Harness {
        pipeline: Pipeline,
        metadata: Arc<FakeMetadata>,
        captions: Arc<FakeCaptions>,
        translator: Arc<FakeTranslator>,
        generator: Arc<FakeGenerator>,
        _dir: tempfile::TempDir,
    }

    fn harness(metadata: FakeMetadata, captions: FakeCaptions, generator: FakeGenerator) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.export.dir = dir.path().to_string_lossy().into_owned();

        let metadata = Arc::new(metadata);
        let captions = Arc::new(captions);
        let translator = Arc::new(FakeTranslator::new());
        let generator = Arc::new(generator);

        let pipeline = Pipeline::with_components(
            &settings,
            Prompts::default(),
            metadata.clone(),
            captions.clone(),
            translator.clone(),
            generator.clone(),
        );

        Harness {
            pipeline,
            metadata,
            captions,
            translator,
            generator,
            _dir: dir,
        }
    }

    #[tokio::test]
    async fn test_end_to_end_summary() {
        let h = harness(
            FakeMetadata::new(),
            FakeCaptions::new().with_track("en", &["Hello", "world"]),
            FakeGenerator::replying("Summary part 1. The rest continues in the next part."),
        );

        let analysis = h
            .pipeline
            .analyze(Some("key"), "https://youtu.be/abc123", SummaryLanguage::En)
            .await
            .unwrap();

        assert_eq!(analysis.video_id, "abc123");
        assert_eq!(analysis.transcript.as_str(), "Hello world");
        assert_eq!(
            analysis.summary,
            "Summary part 1. The rest continues in the next part."
        );

        let calls = h.generator.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1.contains("Hello world"));
        for heading in SUMMARY_OUTLINE {
            assert!(calls[0].1.contains(heading));
        }
        assert!(h.translator.calls().is_empty());

        let export = analysis.export.unwrap();
        assert_eq!(std::fs::read_to_string(export.path()).unwrap(), "Hello world");
    }

    #[tokio::test]
    async fn test_unrecognized_url_issues_no_calls() {
        let h = harness(
            FakeMetadata::new(),
            FakeCaptions::new().with_track("en", &["Hello"]),
            FakeGenerator::replying("ok"),
        );

        let lookup = h.pipeline.lookup("https://vimeo.com/123").await;
        let analysis = h
            .pipeline
            .analyze(Some("key"), "https://vimeo.com/123", SummaryLanguage::En)
            .await;

        assert!(matches!(lookup, Err(YoyakError::InvalidUrl(_))));
        assert!(matches!(analysis, Err(YoyakError::InvalidUrl(_))));
        assert!(h.metadata.calls().is_empty());
        assert!(h.captions.calls().is_empty());
        assert!(h.generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_checked_first() {
        let h = harness(
            FakeMetadata::new(),
            FakeCaptions::new().with_track("ko", &["안녕"]),
            FakeGenerator::replying("ok"),
        );

        let result = h
            .pipeline
            .analyze(None, "https://youtu.be/abc123", SummaryLanguage::Ko)
            .await;

        assert!(matches!(result, Err(YoyakError::MissingCredential(_))));
        assert!(h.captions.calls().is_empty());
        assert!(h.generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_no_transcript_skips_summary() {
        let h = harness(
            FakeMetadata::new(),
            FakeCaptions::new(),
            FakeGenerator::replying("ok"),
        );

        let result = h
            .pipeline
            .analyze(Some("key"), "https://youtube.com/watch?v=abc123&t=30", SummaryLanguage::En)
            .await;

        assert!(matches!(result, Err(YoyakError::TranscriptUnavailable(_))));
        assert_eq!(h.captions.calls().len(), 2);
        assert!(h.generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_uses_raw_url() {
        let h = harness(
            FakeMetadata::new(),
            FakeCaptions::new(),
            FakeGenerator::replying("ok"),
        );

        let lookup = h
            .pipeline
            .lookup("https://youtube.com/watch?v=abc123&t=30")
            .await
            .unwrap();

        assert_eq!(lookup.reference.id(), Some("abc123"));
        assert_eq!(lookup.metadata.title, "Sample");
        assert_eq!(
            h.metadata.calls(),
            vec!["https://youtube.com/watch?v=abc123&t=30".to_string()]
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_metadata_unavailable() {
        let h = harness(
            FakeMetadata::failing(),
            FakeCaptions::new(),
            FakeGenerator::replying("ok"),
        );

        let result = h.pipeline.lookup("https://youtu.be/abc123").await;
        assert!(matches!(result, Err(YoyakError::MetadataUnavailable(_))));
    }

    #[tokio::test]
    async fn test_translate_transcript_to_other_language() {
        let h = harness(
            FakeMetadata::new(),
            FakeCaptions::new(),
            FakeGenerator::replying("ok"),
        );

        let transcript = TranscriptText::new("Hello world".to_string()).unwrap();
        let translated = h
            .pipeline
            .translate_transcript(&transcript, SummaryLanguage::En)
            .await
            .unwrap();

        assert_eq!(translated, "[ko] Hello world");
        assert_eq!(
            h.translator.calls(),
            vec![("Hello world".to_string(), "en".to_string(), "ko".to_string())]
        );
    }
}
