//! Summary language selection.

use serde::{Deserialize, Serialize};

/// Languages a summary can be requested in.
///
/// Transcript and translation calls take arbitrary language codes; only the
/// summary target is restricted to this set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLanguage {
    /// Korean.
    #[default]
    Ko,
    /// English.
    En,
}

impl SummaryLanguage {
    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            SummaryLanguage::Ko => "ko",
            SummaryLanguage::En => "en",
        }
    }

    /// Human-readable language name, used inside prompts.
    pub fn display_name(self) -> &'static str {
        match self {
            SummaryLanguage::Ko => "Korean (한국어)",
            SummaryLanguage::En => "English",
        }
    }

    /// The other member of the enumerated pair.
    pub fn other(self) -> Self {
        match self {
            SummaryLanguage::Ko => SummaryLanguage::En,
            SummaryLanguage::En => SummaryLanguage::Ko,
        }
    }
}

impl std::fmt::Display for SummaryLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for SummaryLanguage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko" | "korean" => Ok(SummaryLanguage::Ko),
            "en" | "english" => Ok(SummaryLanguage::En),
            _ => Err(format!("Unsupported summary language: {} (expected ko or en)", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_language() {
        assert_eq!(SummaryLanguage::Ko.other(), SummaryLanguage::En);
        assert_eq!(SummaryLanguage::En.other(), SummaryLanguage::Ko);
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("ko".parse::<SummaryLanguage>(), Ok(SummaryLanguage::Ko));
        assert_eq!("English".parse::<SummaryLanguage>(), Ok(SummaryLanguage::En));
        assert!("fr".parse::<SummaryLanguage>().is_err());
    }
}
