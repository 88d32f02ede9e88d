//! Yoyak CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yoyak::cli::{commands, Cli, Commands};
use yoyak::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("yoyak={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    std::fs::create_dir_all(settings.data_dir())?;

    match &cli.command {
        Commands::Info { url, language } => {
            commands::run_info(url, *language, settings).await?;
        }

        Commands::Summarize {
            url,
            language,
            api_key,
            provider,
            model,
            translate,
            data_uri,
            html_link,
            no_export,
            no_info,
        } => {
            let options = commands::SummarizeOptions {
                language: *language,
                api_key: api_key.clone(),
                provider: *provider,
                model: model.clone(),
                translate: *translate,
                data_uri: *data_uri,
                html_link: *html_link,
                no_export: *no_export,
                no_info: *no_info,
            };
            commands::run_summarize(url, options, settings).await?;
        }

        Commands::Transcript {
            url,
            language,
            output,
        } => {
            commands::run_transcript(url, language, output.clone(), settings).await?;
        }

        Commands::Translate { input, from, to } => {
            commands::run_translate(input.as_deref(), from, to, settings).await?;
        }

        Commands::Doctor => {
            let path = config_path.unwrap_or_else(Settings::default_config_path);
            commands::run_doctor(&settings, &path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path, settings)?;
        }
    }

    Ok(())
}
