//! YouTube metadata via yt-dlp.

use super::{Count, MetadataProvider, VideoMetadata};
use crate::error::{Result, YoyakError};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// The subset of `yt-dlp --dump-json` output we read.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub view_count: Option<u64>,
    pub duration: Option<f64>,
    pub upload_date: String,
    pub uploader: String,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub dislike_count: Option<u64>,
}

impl VideoInfo {
    /// Map provider fields onto the fixed metadata schema.
    pub fn normalize(self) -> Result<VideoMetadata> {
        let publish_date = NaiveDate::parse_from_str(&self.upload_date, "%Y%m%d").map_err(|e| {
            YoyakError::MetadataUnavailable(format!(
                "Unexpected upload date '{}': {}",
                self.upload_date, e
            ))
        })?;

        let view_count = self
            .view_count
            .ok_or_else(|| YoyakError::MetadataUnavailable("Missing view count".to_string()))?;

        let duration_seconds = self
            .duration
            .map(|d| d.round() as u64)
            .ok_or_else(|| YoyakError::MetadataUnavailable("Missing duration".to_string()))?;

        Ok(VideoMetadata {
            title: self.title,
            description: self.description.unwrap_or_default(),
            view_count,
            duration_seconds,
            publish_date,
            channel_name: self.uploader,
            like_count: Count::from(self.like_count),
            dislike_count: Count::from(self.dislike_count),
        })
    }
}

/// Metadata provider backed by the yt-dlp executable.
pub struct YtDlpMetadata {
    program: String,
}

impl YtDlpMetadata {
    pub fn new() -> Self {
        Self::with_program("yt-dlp")
    }

    /// Use a specific yt-dlp executable.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    /// Run yt-dlp and return its JSON dump.
    async fn dump_json(&self, url: &str) -> Result<String> {
        let output = tokio::process::Command::new(&self.program)
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--no-playlist",
                url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    YoyakError::ToolNotFound(self.program.clone())
                } else {
                    YoyakError::MetadataUnavailable(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(YoyakError::MetadataUnavailable(format!(
                "Video {} not found or unavailable: {}",
                url,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for YtDlpMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a yt-dlp JSON dump into normalized metadata.
pub(crate) fn parse_dump(json: &str) -> Result<VideoMetadata> {
    let info: VideoInfo = serde_json::from_str(json).map_err(|e| {
        YoyakError::MetadataUnavailable(format!("Failed to parse yt-dlp output: {}", e))
    })?;
    info.normalize()
}

#[async_trait]
impl MetadataProvider for YtDlpMetadata {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<VideoMetadata> {
        info!("Fetching video information");

        let metadata = self
            .dump_json(url)
            .await
            .and_then(|json| parse_dump(&json))
            .map_err(|e| match e {
                YoyakError::MetadataUnavailable(_) => e,
                other => YoyakError::MetadataUnavailable(other.to_string()),
            })?;

        debug!(title = %metadata.title, "Video information loaded");
        Ok(metadata)
    }
}
