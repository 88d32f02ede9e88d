//! Translate command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Pipeline;
use anyhow::{Context, Result};
use std::io::Read;

/// Run the translate command.
pub async fn run_translate(input: Option<&str>, from: &str, to: &str, settings: Settings) -> Result<()> {
    let text = match input {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner(&format!("Translating {} -> {}...", from, to));
    let translated = pipeline.relay().translate(&text, from, to).await;
    spinner.finish_and_clear();

    match translated {
        Ok(translated) => {
            println!("{}", translated);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e.into())
        }
    }
}
