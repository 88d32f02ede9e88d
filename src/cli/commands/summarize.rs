//! Summarize command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{GenerationProvider, Settings};
use crate::error::YoyakError;
use crate::language::SummaryLanguage;
use crate::orchestrator::Pipeline;
use anyhow::Result;

/// Options for the summarize command.
#[derive(Debug, Clone, Default)]
pub struct SummarizeOptions {
    pub language: Option<SummaryLanguage>,
    pub api_key: Option<String>,
    pub provider: Option<GenerationProvider>,
    pub model: Option<String>,
    pub translate: bool,
    pub data_uri: bool,
    pub html_link: bool,
    pub no_export: bool,
    pub no_info: bool,
}

/// Run the summarize command.
pub async fn run_summarize(url: &str, options: SummarizeOptions, mut settings: Settings) -> Result<()> {
    if let Some(provider) = options.provider {
        if provider != settings.generation.provider {
            settings.generation.model.clear();
        }
        settings.generation.provider = provider;
    }
    if let Some(model) = &options.model {
        settings.generation.model = model.clone();
    }
    if options.no_export {
        settings.export.enabled = false;
    }

    let language = options.language.unwrap_or(settings.summary.default_language);
    let credential = settings.resolve_credential(options.api_key.as_deref());

    if let Err(e) = preflight::check(
        Operation::Summarize {
            with_info: !options.no_info,
        },
        &settings,
        credential.as_deref(),
    ) {
        Output::error(&format!("{}", e));
        Output::info("Run 'yoyak doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let pipeline = Pipeline::new(settings)?;

    if !options.no_info {
        let spinner = Output::spinner("Fetching video information...");
        let lookup = pipeline.lookup(url).await;
        spinner.finish_and_clear();

        match lookup {
            Ok(lookup) => Output::video_info(&lookup.metadata, language),
            Err(e) => {
                Output::error(&format!("{}", e));
                return Err(e.into());
            }
        }
    }

    let spinner = Output::spinner("Analyzing video...");
    let analysis = pipeline.analyze(credential.as_deref(), url, language).await;
    spinner.finish_and_clear();

    let analysis = match analysis {
        Ok(analysis) => analysis,
        Err(e) => {
            Output::error(&format!("{}", e));
            if let Some(hint) = hint_for(&e) {
                Output::info(hint);
            }
            return Err(e.into());
        }
    };

    Output::header("Summary");
    println!("\n{}\n", analysis.summary);

    if let Some(export) = &analysis.export {
        Output::success(&format!("Transcript saved to {}", export.path().display()));
        if options.data_uri {
            println!("{}", export.data_uri()?);
        }
        if options.html_link {
            println!("{}", export.download_link(export.file_name())?);
        }
    }

    if options.translate {
        let spinner = Output::spinner("Translating transcript...");
        let translated = pipeline
            .translate_transcript(&analysis.transcript, language)
            .await;
        spinner.finish_and_clear();

        match translated {
            Ok(text) => {
                Output::header(&format!("Transcript ({})", language.other()));
                println!("\n{}\n", text);
            }
            Err(e) => {
                Output::error(&format!("{}", e));
                return Err(e.into());
            }
        }
    }

    Ok(())
}

/// What the user can do about a failed analysis.
fn hint_for(error: &YoyakError) -> Option<&'static str> {
    match error {
        YoyakError::InvalidUrl(_) => {
            Some("Use a youtu.be/<id> or youtube.com/watch?v=<id> link.")
        }
        YoyakError::MissingCredential(_) => Some("Pass --api-key or set YOYAK_API_KEY."),
        YoyakError::TranscriptUnavailable(_) => {
            Some("The video may have no captions. Try again later or another video.")
        }
        YoyakError::GenerationFailed(_) => {
            Some("Check the API key and quota, then try again.")
        }
        _ => None,
    }
}
