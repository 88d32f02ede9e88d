//! Info command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::language::SummaryLanguage;
use crate::orchestrator::Pipeline;
use anyhow::Result;

/// Run the info command.
pub async fn run_info(url: &str, language: Option<SummaryLanguage>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Info, &settings, None) {
        Output::error(&format!("{}", e));
        Output::info("Run 'yoyak doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let language = language.unwrap_or(settings.summary.default_language);
    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner("Fetching video information...");
    let lookup = pipeline.lookup(url).await;
    spinner.finish_and_clear();

    match lookup {
        Ok(lookup) => {
            Output::video_info(&lookup.metadata, language);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e.into())
        }
    }
}
