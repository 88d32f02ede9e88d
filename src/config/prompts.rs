//! Prompt templates for Yoyak.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Headings of the nine-part analysis every summary follows.
pub const SUMMARY_OUTLINE: [&str; 9] = [
    "Topic overview",
    "Key-point summary",
    "Detailed analysis",
    "Methodology or approach",
    "Notable quotes and moments",
    "Guide for viewers",
    "Further resources",
    "Critical analysis (where applicable)",
    "Conclusion and outlook",
];

/// Prompt for structured video summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub template: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            template: r#"Summarize the following YouTube video transcript in {{language}}.

Video: {{video_url}}

Transcript:
{{transcript}}

Continue or complete the analysis using the structure below, building on any earlier part:

1. Topic overview
2. Key-point summary
3. Detailed analysis
    [For each major section or topic]
    • Explanation
    • Key points
    • Details
    • Practical application or significance
4. Methodology or approach
5. Notable quotes and moments
6. Guide for viewers
7. Further resources
8. Critical analysis (where applicable)
9. Conclusion and outlook

Analyze only the sections that suit the material in this part, and state explicitly that the remaining sections will continue in the next part."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// The template is scanned once; substituted values are copied through
    /// untouched even if they contain `{{name}}` tokens. Unknown tokens stay
    /// as written.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            result.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];

            let Some(close) = after_open.find("}}") else {
                result.push_str(&rest[open..]);
                return result;
            };

            let name = &after_open[..close];
            match vars.get(name) {
                Some(value) => result.push_str(value),
                None => result.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after_open[close + 2..];
        }

        result.push_str(rest);
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
