//! CLI module for Yoyak.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::{GenerationProvider, CREDENTIAL_ENV};
use crate::language::SummaryLanguage;
use clap::{Parser, Subcommand};

/// Yoyak - YouTube video summaries
///
/// Fetches a video's transcript and asks an LLM for a structured summary.
/// The name comes from the Korean word 요약, "summary."
#[derive(Parser, Debug)]
#[command(name = "yoyak")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show information about a video
    Info {
        /// YouTube URL (youtu.be/... or youtube.com/watch?v=...)
        url: String,

        /// Language used to format dates
        #[arg(short, long, value_enum)]
        language: Option<SummaryLanguage>,
    },

    /// Summarize a video from its transcript
    Summarize {
        /// YouTube URL (youtu.be/... or youtube.com/watch?v=...)
        url: String,

        /// Summary language
        #[arg(short, long, value_enum)]
        language: Option<SummaryLanguage>,

        /// API key for the generation provider
        #[arg(long, env = CREDENTIAL_ENV, hide_env_values = true)]
        api_key: Option<String>,

        /// Generation provider (overrides config)
        #[arg(long, value_enum)]
        provider: Option<GenerationProvider>,

        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,

        /// Also show the transcript translated into the other language
        #[arg(long)]
        translate: bool,

        /// Print the saved transcript as a base64 data URI
        #[arg(long)]
        data_uri: bool,

        /// Print an HTML download link for the saved transcript
        #[arg(long)]
        html_link: bool,

        /// Do not save the transcript to a file
        #[arg(long)]
        no_export: bool,

        /// Skip printing video information
        #[arg(long)]
        no_info: bool,
    },

    /// Fetch a video's transcript
    Transcript {
        /// YouTube URL (youtu.be/... or youtube.com/watch?v=...)
        url: String,

        /// Transcript language code (any code, e.g. en, ko, ja)
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Translate text between two languages
    Translate {
        /// Input file ('-' or omitted for stdin)
        input: Option<String>,

        /// Source language code ('auto' to detect)
        #[arg(long, default_value = "auto")]
        from: String,

        /// Target language code
        #[arg(long)]
        to: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::try_parse_from([
            "yoyak",
            "summarize",
            "https://youtu.be/abc123",
            "-l",
            "en",
            "--provider",
            "openai",
            "--translate",
        ])
        .unwrap();

        match cli.command {
            Commands::Summarize {
                url,
                language,
                provider,
                translate,
                ..
            } => {
                assert_eq!(url, "https://youtu.be/abc123");
                assert_eq!(language, Some(SummaryLanguage::En));
                assert_eq!(provider, Some(GenerationProvider::OpenAi));
                assert!(translate);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_export_output_flags() {
        let cli = Cli::try_parse_from([
            "yoyak",
            "summarize",
            "https://youtu.be/abc123",
            "--html-link",
        ])
        .unwrap();

        match cli.command {
            Commands::Summarize {
                data_uri,
                html_link,
                ..
            } => {
                assert!(html_link);
                assert!(!data_uri);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_summary_language() {
        assert!(Cli::try_parse_from(["yoyak", "summarize", "https://youtu.be/x", "-l", "fr"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
