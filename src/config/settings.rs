//! Configuration settings for Yoyak.

use crate::language::SummaryLanguage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable checked for an explicit credential before anything else.
pub const CREDENTIAL_ENV: &str = "YOYAK_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub metadata: MetadataSettings,
    pub transcript: TranscriptSettings,
    pub translation: TranslationSettings,
    pub generation: GenerationSettings,
    pub summary: SummarySettings,
    pub export: ExportSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level when no -v flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.yoyak".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Video metadata lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// Path or name of the yt-dlp executable.
    pub ytdlp_path: String,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
        }
    }
}

/// Caption retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// User agent sent to YouTube.
    pub user_agent: String,
    /// HTTP timeout in seconds. None waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Machine translation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// Translation endpoint.
    pub endpoint: String,
    /// Longest text sent in a single request; longer input is split.
    pub max_chars_per_request: usize,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            max_chars_per_request: 5000,
        }
    }
}

/// Generative text provider type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    /// Google Gemini (default).
    #[default]
    Gemini,
    /// OpenAI chat completions.
    #[value(name = "openai")]
    OpenAi,
}

impl GenerationProvider {
    /// Conventional environment variable holding this provider's key.
    pub fn credential_env(self) -> &'static str {
        match self {
            GenerationProvider::Gemini => "GEMINI_API_KEY",
            GenerationProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(self) -> &'static str {
        match self {
            GenerationProvider::Gemini => "gemini-2.0-flash",
            GenerationProvider::OpenAi => "gpt-4o-mini",
        }
    }
}

impl std::str::FromStr for GenerationProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(GenerationProvider::Gemini),
            "openai" => Ok(GenerationProvider::OpenAi),
            _ => Err(format!("Unknown generation provider: {}", s)),
        }
    }
}

impl std::fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationProvider::Gemini => write!(f, "gemini"),
            GenerationProvider::OpenAi => write!(f, "openai"),
        }
    }
}

/// Generative text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Provider used for summaries.
    pub provider: GenerationProvider,
    /// Model name. Empty means the provider default.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// API key stored in config (optional; environment variables also work).
    pub api_key: Option<String>,
    /// HTTP timeout in seconds. None waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::Gemini,
            model: String::new(),
            temperature: 0.7,
            api_key: None,
            request_timeout_secs: None,
        }
    }
}

impl GenerationSettings {
    /// Configured model, or the provider default.
    pub fn model_name(&self) -> &str {
        if self.model.trim().is_empty() {
            self.provider.default_model()
        } else {
            &self.model
        }
    }
}

/// Summary settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SummarySettings {
    /// Language used when none is given on the command line.
    pub default_language: SummaryLanguage,
}

/// Transcript export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Write the transcript to a file after each summary.
    pub enabled: bool,
    /// Directory for exported transcripts.
    pub dir: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: "~/.yoyak/exports".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::YoyakError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yoyak")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded transcript export directory.
    pub fn export_dir(&self) -> PathBuf {
        Self::expand_path(&self.export.dir)
    }

    /// Pick the credential for the configured provider.
    ///
    /// An explicit value (command line or `YOYAK_API_KEY`) wins, then the
    /// config file, then the provider's own environment variable. Blank
    /// values are skipped.
    pub fn resolve_credential(&self, explicit: Option<&str>) -> Option<String> {
        let provider_env = std::env::var(self.generation.provider.credential_env()).ok();

        explicit
            .map(str::to_string)
            .into_iter()
            .chain(self.generation.api_key.clone())
            .chain(provider_env)
            .find(|key| !key.trim().is_empty())
    }
}
