//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::{Settings, CREDENTIAL_ENV};
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Yoyak Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    let tool_check = check_ytdlp(&settings.metadata.ytdlp_path);
    tool_check.print();
    checks.push(tool_check);

    println!();

    println!("{}", style("Generation").bold());
    let credential_check = check_credential(settings);
    credential_check.print();
    checks.push(credential_check);
    Output::kv(
        "  Model",
        &format!("{} ({})", settings.generation.model_name(), settings.generation.provider),
    );

    println!();

    println!("{}", style("Directories").bold());
    let mut dir_checks = vec![check_directory("Data directory", &settings.data_dir())];
    if settings.export.enabled {
        dir_checks.push(check_directory("Export directory", &settings.export_dir()));
    }
    for check in &dir_checks {
        check.print();
    }
    checks.extend(dir_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Yoyak.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Yoyak is ready to use.");
    }

    Ok(())
}

/// Check that yt-dlp runs.
///
/// Only `info` and `summarize` need it, so a missing binary is a warning.
fn check_ytdlp(program: &str) -> CheckResult {
    let hint = install_hint_ytdlp();
    match Command::new(program).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok(program, &version)
        }
        Ok(_) => CheckResult::error(program, "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::warning(program, "not found (video info disabled)", hint)
        }
        Err(e) => CheckResult::error(program, &format!("error: {}", e), hint),
    }
}

/// Check whether a credential can be found for the configured provider.
fn check_credential(settings: &Settings) -> CheckResult {
    let provider_env = settings.generation.provider.credential_env();
    let hint = format!("Set with: export {}='...' (or {})", CREDENTIAL_ENV, provider_env);

    let explicit = std::env::var(CREDENTIAL_ENV).ok();
    match settings.resolve_credential(explicit.as_deref()) {
        Some(key) => CheckResult::ok("API key", &format!("configured ({})", mask_key(&key))),
        None => CheckResult::error("API key", "not set", &hint),
    }
}

/// Check a directory the tool writes into.
fn check_directory(name: &str, dir: &Path) -> CheckResult {
    if dir.is_dir() {
        CheckResult::ok(name, &format!("{}", dir.display()))
    } else if dir.exists() {
        CheckResult::error(
            name,
            &format!("{} is not a directory", dir.display()),
            "Remove the file or change the path in the config",
        )
    } else {
        CheckResult::warning(
            name,
            &format!("{} (will be created)", dir.display()),
            "Directory will be created on first use",
        )
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: yoyak config edit",
        )
    }
}

/// Show only the edges of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}
