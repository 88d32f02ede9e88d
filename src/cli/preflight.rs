//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, YoyakError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Video information requires yt-dlp.
    Info,
    /// Summaries require yt-dlp (unless info is skipped) and a credential.
    Summarize { with_info: bool },
    /// Transcripts and translations only need network access.
    Transcript,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings, credential: Option<&str>) -> Result<()> {
    match operation {
        Operation::Info => {
            check_tool(&settings.metadata.ytdlp_path)?;
        }
        Operation::Summarize { with_info } => {
            check_credential(settings, credential)?;
            if with_info {
                check_tool(&settings.metadata.ytdlp_path)?;
            }
        }
        Operation::Transcript => {}
    }
    Ok(())
}

/// Check that a generation credential was found.
fn check_credential(settings: &Settings, credential: Option<&str>) -> Result<()> {
    match credential {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(YoyakError::MissingCredential(format!(
            "{}. Pass --api-key, set {} or {}, or add generation.api_key to the config",
            settings.generation.provider,
            crate::config::CREDENTIAL_ENV,
            settings.generation.provider.credential_env()
        ))),
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(YoyakError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(YoyakError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(YoyakError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
