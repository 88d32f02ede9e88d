//! Yoyak - YouTube video summaries
//!
//! Fetches a video's transcript and asks a generative model for a
//! structured summary in Korean or English.
//!
//! The name "Yoyak" comes from the Korean word 요약, "summary."
//!
//! # Architecture
//!
//! - `video_source` - URL parsing and video metadata
//! - `transcript` - Caption retrieval with translation fallback, transcript export
//! - `translation` - Machine translation relay
//! - `generation` - Generative model backends and credentials
//! - `summary` - Prompt assembly and summary generation
//! - `orchestrator` - Pipeline coordination
//! - `config` - Configuration and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use yoyak::config::Settings;
//! use yoyak::language::SummaryLanguage;
//! use yoyak::orchestrator::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credential = settings.resolve_credential(None);
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     let analysis = pipeline
//!         .analyze(credential.as_deref(), "https://youtu.be/dQw4w9WgXcQ", SummaryLanguage::En)
//!         .await?;
//!     println!("{}", analysis.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod language;
pub mod orchestrator;
pub mod summary;
pub mod transcript;
pub mod translation;
pub mod video_source;

#[cfg(test)]
mod testing;

pub use error::{Result, YoyakError};
