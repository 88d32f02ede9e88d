//! Video source abstraction for Yoyak.
//!
//! Turns user-supplied URLs into video references and looks up the
//! information shown before a summary is requested.

mod youtube;

pub use youtube::{VideoInfo, YtDlpMetadata};

use crate::error::{Result, YoyakError};
use crate::language::SummaryLanguage;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const SHORT_HOST: &str = "youtu.be";
const LONG_HOST: &str = "youtube.com";

/// Extract the video identifier from a YouTube URL.
///
/// Short links (`youtu.be/<id>`) use the last path segment; long links use
/// the `v=` query value up to the next `&`. The id itself is not validated.
pub fn resolve(url: &str) -> Option<String> {
    let id = if url.contains(SHORT_HOST) {
        url.rsplit('/').next()?
    } else if url.contains(LONG_HOST) {
        let (_, after) = url.split_once("v=")?;
        after.split('&').next()?
    } else {
        return None;
    };

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// A URL as entered, together with the id resolved from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoReference {
    url: String,
    id: Option<String>,
}

impl VideoReference {
    /// Resolve the id of `url` once.
    pub fn parse(url: &str) -> Self {
        let url = url.trim().to_string();
        let id = resolve(&url);
        Self { url, id }
    }

    /// The URL as entered (trimmed).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The resolved id, if the URL shape was recognized.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The resolved id, or `InvalidUrl`.
    pub fn require_id(&self) -> Result<&str> {
        self.id().ok_or_else(|| YoyakError::InvalidUrl(self.url.clone()))
    }
}

/// A count the uploader may choose to hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Count {
    Known(u64),
    Undisclosed,
}

impl From<Option<u64>> for Count {
    fn from(value: Option<u64>) -> Self {
        value.map(Count::Known).unwrap_or(Count::Undisclosed)
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Count::Known(n) => write!(f, "{}", n),
            Count::Undisclosed => write!(f, "private"),
        }
    }
}

/// Normalized information about a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub view_count: u64,
    pub duration_seconds: u64,
    pub publish_date: NaiveDate,
    pub channel_name: String,
    pub like_count: Count,
    pub dislike_count: Count,
}

impl VideoMetadata {
    /// Publish date as a long, locale-specific string.
    pub fn publish_date_long(&self, language: SummaryLanguage) -> String {
        format_long_date(self.publish_date, language)
    }
}

/// Format a calendar date the way each summary language writes it out.
pub fn format_long_date(date: NaiveDate, language: SummaryLanguage) -> String {
    match language {
        SummaryLanguage::Ko => date.format("%Y년 %m월 %d일").to_string(),
        SummaryLanguage::En => date.format("%B %-d, %Y").to_string(),
    }
}

/// Trait for video metadata providers.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up a video by its raw URL.
    ///
    /// Every failure is reported as `MetadataUnavailable`.
    async fn fetch(&self, url: &str) -> Result<VideoMetadata>;
}
