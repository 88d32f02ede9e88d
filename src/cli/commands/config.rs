//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the config command.
///
/// `path` is the `--config` override, if any.
pub fn run_config(action: &ConfigAction, path: Option<PathBuf>, settings: Settings) -> Result<()> {
    let config_path = path.unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let shown = redacted(settings);
            let toml_str =
                toml::to_string_pretty(&shown).context("Failed to serialize config")?;
            println!("{}", toml_str);
        }

        ConfigAction::Edit => {
            if !config_path.exists() {
                settings.save_to(&config_path)?;
                Output::info(&format!("Created default config at {}", config_path.display()));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            Output::info(&format!("Opening config in {}...", editor));

            match std::process::Command::new(&editor).arg(&config_path).status() {
                Ok(s) if s.success() => Output::success("Config saved."),
                Ok(_) => Output::warning("Editor exited with non-zero status."),
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {}", config_path.display()));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Hide the stored API key before printing.
fn redacted(mut settings: Settings) -> Settings {
    if settings
        .generation
        .api_key
        .as_deref()
        .is_some_and(|key| !key.is_empty())
    {
        settings.generation.api_key = Some("***".to_string());
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_hides_key() {
        let mut settings = Settings::default();
        settings.generation.api_key = Some("secret-key".to_string());
        let shown = redacted(settings);
        assert_eq!(shown.generation.api_key.as_deref(), Some("***"));
    }

    #[test]
    fn test_redacted_without_key() {
        let shown = redacted(Settings::default());
        assert!(shown.generation.api_key.is_none());
    }
}
