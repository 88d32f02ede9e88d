//! Configuration module for Yoyak.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummaryPrompts, SUMMARY_OUTLINE};
pub use settings::{
    ExportSettings, GeneralSettings, GenerationProvider, GenerationSettings, MetadataSettings,
    PromptSettings, Settings, SummarySettings, TranscriptSettings, TranslationSettings,
    CREDENTIAL_ENV,
};
