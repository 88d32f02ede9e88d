//! Transcript files offered back to the user.

use super::TranscriptText;
use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use uuid::Uuid;

/// A transcript written to disk.
#[derive(Debug, Clone)]
pub struct TranscriptExport {
    path: PathBuf,
    file_name: String,
}

impl TranscriptExport {
    /// Write a transcript under `dir` with a name unique to this request.
    #[instrument(skip(transcript))]
    pub fn write(dir: &Path, video_id: &str, transcript: &TranscriptText) -> Result<Self> {
        std::fs::create_dir_all(dir)?;

        let file_name = format!(
            "transcript-{}-{}.txt",
            sanitize(video_id),
            Uuid::new_v4().simple()
        );
        let path = dir.join(&file_name);
        std::fs::write(&path, transcript.as_str())?;

        debug!("Wrote transcript to {}", path.display());
        Ok(Self { path, file_name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The file contents as an `application/octet-stream` data URI.
    pub fn data_uri(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path)?;
        Ok(format!(
            "data:application/octet-stream;base64,{}",
            STANDARD.encode(bytes)
        ))
    }

    /// An HTML anchor that downloads the file under `label`.
    pub fn download_link(&self, label: &str) -> Result<String> {
        Ok(format!(
            "<a href=\"{}\" download=\"{}\">Download {}</a>",
            self.data_uri()?,
            label,
            label
        ))
    }
}

/// Keep ids file-name safe.
fn sanitize(video_id: &str) -> String {
    video_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
