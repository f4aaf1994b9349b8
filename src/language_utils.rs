use anyhow::{Result, anyhow};
use isolang::Language;

/// Target-language utilities
///
/// The conversion pipeline accepts a fixed set of human-readable target
/// language names. This module maps those names to ISO 639-1 codes (used by
/// the external layout-preserving engine) and English names (used in the
/// translation system prompt).
/// Supported target languages, identified by their native display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    Chinese,
    English,
    Japanese,
    Korean,
    Indonesian,
    Thai,
    Arabic,
    Malay,
}

impl TargetLanguage {
    /// All supported target languages in menu order
    pub const ALL: [TargetLanguage; 8] = [
        TargetLanguage::Chinese,
        TargetLanguage::English,
        TargetLanguage::Japanese,
        TargetLanguage::Korean,
        TargetLanguage::Indonesian,
        TargetLanguage::Thai,
        TargetLanguage::Arabic,
        TargetLanguage::Malay,
    ];

    /// The native display name, as presented to users and to the translator
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Chinese => "中文",
            Self::English => "English",
            Self::Japanese => "日本語",
            Self::Korean => "한국어",
            Self::Indonesian => "Bahasa Indonesia",
            Self::Thai => "ภาษาไทย",
            Self::Arabic => "العربية",
            Self::Malay => "Bahasa Melayu",
        }
    }

    /// ISO 639-1 code, as passed to the external layout-preserving engine
    pub fn iso_code(&self) -> &'static str {
        match self {
            Self::Chinese => "zh",
            Self::English => "en",
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::Indonesian => "id",
            Self::Thai => "th",
            Self::Arabic => "ar",
            Self::Malay => "ms",
        }
    }

    /// English language name via the ISO registry
    pub fn english_name(&self) -> Result<String> {
        let lang = Language::from_639_1(self.iso_code())
            .ok_or_else(|| anyhow!("Failed to resolve language from code: {}", self.iso_code()))?;
        Ok(lang.to_name().to_string())
    }

    /// Whether the target script needs a CJK-capable font face
    pub fn needs_cjk_font(&self) -> bool {
        matches!(self, Self::Chinese | Self::Japanese | Self::Korean)
    }

    /// Parse a display name from the supported set
    pub fn from_display_name(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.display_name() == trimmed)
            .ok_or_else(|| {
                anyhow!(
                    "Unsupported target language '{}'. Supported: {}",
                    name,
                    Self::ALL
                        .iter()
                        .map(|l| l.display_name())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_display_name(s)
    }
}
