//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Pipeline;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    url: &str,
    language: &str,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Transcript, &settings, None)?;
    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = pipeline.transcript(url, language).await;
    spinner.finish_and_clear();

    let (video_id, transcript) = match result {
        Ok(found) => found,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, transcript.as_str())?;
            Output::success(&format!(
                "Saved {} transcript of {} to {}",
                language, video_id, path
            ));
        }
        _ => {
            println!("{}", transcript);
        }
    }

    Ok(())
}
