//! In-memory providers that record their calls, for unit tests.

use crate::error::{Result, YoyakError};
use crate::generation::{Credential, TextGenerator};
use crate::transcript::{CaptionProvider, CaptionSegment};
use crate::translation::Translator;
use crate::video_source::{Count, MetadataProvider, VideoMetadata};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

/// Build caption segments one second apart.
pub fn segments(texts: &[&str]) -> Vec<CaptionSegment> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| CaptionSegment::new(text.to_string(), i as f64, 1.0))
        .collect()
}

/// Translator that tags its output with the target language.
pub struct FakeTranslator {
    fail: bool,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeTranslator {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorded `(text, source, target)` triples.
    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source.to_string(), target.to_string()));
        if self.fail {
            return Err(YoyakError::InvalidInput(
                "unsupported language pair".to_string(),
            ));
        }
        Ok(format!("[{}] {}", target, text))
    }
}

/// Caption provider serving fixed tracks. `None` is the default track.
pub struct FakeCaptions {
    tracks: HashMap<Option<String>, Vec<CaptionSegment>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeCaptions {
    pub fn new() -> Self {
        Self {
            tracks: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_track(mut self, language: &str, texts: &[&str]) -> Self {
        self.tracks.insert(Some(language.to_string()), segments(texts));
        self
    }

    pub fn with_default_track(mut self, texts: &[&str]) -> Self {
        self.tracks.insert(None, segments(texts));
        self
    }

    /// Recorded `(video_id, language)` pairs.
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CaptionProvider for FakeCaptions {
    async fn fetch_captions(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<Vec<CaptionSegment>> {
        let key = language.map(str::to_string);
        self.calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), key.clone()));
        self.tracks.get(&key).cloned().ok_or_else(|| {
            YoyakError::TranscriptUnavailable(format!("No track for {:?}", language))
        })
    }
}

/// Generator that echoes a canned reply and records prompts.
pub struct FakeGenerator {
    reply: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorded `(credential, prompt)` pairs.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate(&self, credential: &Credential, prompt: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((credential.expose().to_string(), prompt.to_string()));
        self.reply
            .clone()
            .ok_or_else(|| YoyakError::InvalidInput("API key not valid".to_string()))
    }
}

/// Metadata provider returning one fixed record.
pub struct FakeMetadata {
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn sample_metadata() -> VideoMetadata {
    VideoMetadata {
        title: "Sample".to_string(),
        description: "A sample video".to_string(),
        view_count: 42,
        duration_seconds: 90,
        publish_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        channel_name: "Channel".to_string(),
        like_count: Count::Known(7),
        dislike_count: Count::Undisclosed,
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadata {
    async fn fetch(&self, url: &str) -> Result<VideoMetadata> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(YoyakError::MetadataUnavailable("video removed".to_string()));
        }
        Ok(sample_metadata())
    }
}
