//! Error types for Yoyak.

use thiserror::Error;

/// Library-level error type for Yoyak operations.
///
/// The first six variants are what components hand back to callers. The rest
/// are produced inside provider implementations and get mapped to one of the
/// domain kinds at the component boundary.
#[derive(Error, Debug)]
pub enum YoyakError {
    #[error("Not a recognized YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Video information unavailable: {0}")]
    MetadataUnavailable(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Summary generation failed: {0}")]
    GenerationFailed(String),

    #[error("No API key provided for {0}")]
    MissingCredential(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Yoyak operations.
pub type Result<T> = std::result::Result<T, YoyakError>;
