use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language display name (one of the supported set)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Font resolution config
    #[serde(default)]
    pub fonts: FontConfig,

    /// External layout-preserving engine config
    #[serde(default)]
    pub layout_engine: LayoutEngineConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Chat-completion endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: Max completion tokens per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic across reruns
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// System prompt template for translation
    /// Placeholder: {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// Font resolution configuration for the renderers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FontConfig {
    /// Ordered preference list of local font files; first existing wins
    #[serde(default = "default_preferred_fonts")]
    pub preferred: Vec<PathBuf>,

    /// Directory the downloaded fallback font family is cached in
    #[serde(default = "default_font_cache_dir")]
    pub cache_dir: PathBuf,

    /// URL of a zip archive carrying the fallback font family
    #[serde(default = "default_font_download_url")]
    pub download_url: String,

    /// File name of the face to pick out of the downloaded archive
    #[serde(default = "default_font_download_file")]
    pub download_file: String,

    /// Latin font family name used in DOCX output
    #[serde(default = "default_latin_family")]
    pub latin_family: String,

    /// East-asian font family name forced on every DOCX run
    #[serde(default = "default_east_asian_family")]
    pub east_asian_family: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            preferred: default_preferred_fonts(),
            cache_dir: default_font_cache_dir(),
            download_url: default_font_download_url(),
            download_file: default_font_download_file(),
            latin_family: default_latin_family(),
            east_asian_family: default_east_asian_family(),
        }
    }
}

/// Configuration for the optional external layout-preserving engine
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LayoutEngineConfig {
    /// Whether the engine may be attempted at all
    #[serde(default)]
    pub enabled: bool,

    // @field: Engine executable name or path
    #[serde(default = "default_layout_engine_command")]
    pub command: String,

    // @field: Timeout seconds for one engine invocation
    #[serde(default = "default_layout_engine_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LayoutEngineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: default_layout_engine_command(),
            timeout_secs: default_layout_engine_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_target_language() -> String {
    "中文".to_string()
}

fn default_endpoint() -> String {
    "https://api.siliconflow.cn/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "deepseek-ai/DeepSeek-V3".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_system_prompt() -> String {
    "You are a professional translation assistant. Translate the text into {target_language}. \
     Output only the translated content, preserving the original formatting and paragraph \
     structure. Do not add any explanations, notes, prefixes or suffixes, do not announce \
     the translation, and do not add parenthetical clarifications."
        .to_string()
}

fn default_preferred_fonts() -> Vec<PathBuf> {
    // Common multilingual faces across platforms, checked in order.
    // TrueType collections (.ttc) are skipped at resolution time.
    vec![
        PathBuf::from("C:/Windows/Fonts/ARIALUNI.TTF"),
        PathBuf::from("C:/Windows/Fonts/simhei.ttf"),
        PathBuf::from("/usr/share/fonts/opentype/source-han-sans/SourceHanSansSC-Regular.otf"),
        PathBuf::from("/usr/share/fonts/truetype/arphic/ukai.ttf"),
        PathBuf::from("/Library/Fonts/Arial Unicode.ttf"),
    ]
}

fn default_font_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("doctran")
        .join("fonts")
}

fn default_font_download_url() -> String {
    "https://github.com/adobe-fonts/source-han-sans/releases/download/2.004R/SourceHanSansSC.zip"
        .to_string()
}

fn default_font_download_file() -> String {
    "SourceHanSansSC-Regular.otf".to_string()
}

fn default_latin_family() -> String {
    "Calibri".to_string()
}

fn default_east_asian_family() -> String {
    "SimSun".to_string()
}

fn default_layout_engine_command() -> String {
    "pdf2zh".to_string()
}

fn default_layout_engine_timeout_secs() -> u64 {
    600
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate target language against the supported set
        let _target = crate::language_utils::TargetLanguage::from_display_name(&self.target_language)?;

        // The chat-completion API always requires a key
        if self.translation.api_key.is_empty() {
            return Err(anyhow!("Translation API key is required"));
        }

        // Validate the endpoint parses as a URL
        url::Url::parse(&self.translation.endpoint)
            .map_err(|e| anyhow!("Invalid translation endpoint '{}': {}", self.translation.endpoint, e))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            fonts: FontConfig::default(),
            layout_engine: LayoutEngineConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
