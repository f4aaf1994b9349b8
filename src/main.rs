// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::app_controller::{Controller, ConversionRequest};
use crate::file_utils::FileManager;
use crate::format::DocumentFormat;
use crate::language_utils::TargetLanguage;
use crate::progress::ProgressReporter;

mod app_config;
mod app_controller;
mod document_model;
mod errors;
mod extraction;
mod file_utils;
mod format;
mod language_utils;
mod layout_engine;
mod progress;
mod render;
mod translation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a PDF or DOCX document (default command)
    #[command(alias = "translate")]
    Convert(ConvertArgs),

    /// Generate shell completions for doctran
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input document (PDF or DOCX) to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Target language display name (e.g. '中文', 'English', '日本語')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output file path (defaults to translated_<input> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: pdf or docx (defaults to the input format)
    #[arg(long)]
    output_format: Option<String>,

    /// Show original and translated content side by side
    #[arg(short = 'c', long)]
    show_comparison: bool,

    /// Route through the external layout-preserving engine when available
    #[arg(long)]
    preserve_layout: bool,

    /// Translation API key (overrides the config file)
    #[arg(long, env = "DOCTRAN_API_KEY")]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// doctran - AI document translation
///
/// Translates PDF and DOCX documents using a chat-completion API,
/// preserving logical document structure.
#[derive(Parser, Debug)]
#[command(name = "doctran")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered document translation tool")]
#[command(long_about = "doctran extracts structured content from PDF and DOCX documents and \
translates it paragraph by paragraph using a chat-completion API.

EXAMPLES:
    doctran report.pdf                          # Translate using default config
    doctran -t English report.pdf               # Pick the target language
    doctran -c report.pdf                       # Side-by-side original/translation
    doctran --preserve-layout report.pdf        # Try the external layout engine first
    doctran --output-format docx report.pdf     # Render the translation as DOCX
    doctran completions bash > doctran.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The API key can also be supplied via the
    DOCTRAN_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input document (PDF or DOCX) to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Target language display name (e.g. '中文', 'English', '日本語')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output file path (defaults to translated_<input> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: pdf or docx (defaults to the input format)
    #[arg(long)]
    output_format: Option<String>,

    /// Show original and translated content side by side
    #[arg(short = 'c', long)]
    show_comparison: bool,

    /// Route through the external layout-preserving engine when available
    #[arg(long)]
    preserve_layout: bool,

    /// Translation API key (overrides the config file)
    #[arg(long, env = "DOCTRAN_API_KEY")]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");

            let mut stderr = std::io::stderr();
            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// indicatif-backed progress sink for the conversion pipeline
struct ProgressBarReporter {
    bar: ProgressBar,
}

impl ProgressBarReporter {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(template_result.progress_chars("█▓▒░"));
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for ProgressBarReporter {
    fn on_progress(&self, done: usize, total: usize, message: &str) {
        // Table cells push `done` past the paragraph-count denominator
        self.bar.set_length(total.max(done) as u64);
        self.bar.set_position(done as u64);
        self.bar.set_message(message.to_string());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "doctran", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let convert_args = ConvertArgs {
                input_path,
                target_language: cli.target_language,
                output: cli.output,
                output_format: cli.output_format,
                show_comparison: cli.show_comparison,
                preserve_layout: cli.preserve_layout,
                api_key: cli.api_key,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_convert(convert_args).await
        }
    }
}

async fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader::<_, Config>(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(api_key) = &options.api_key {
        config.translation.api_key = api_key.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    if !options.input_path.is_file() {
        return Err(anyhow!("Input file does not exist: {:?}", options.input_path));
    }

    // Resolve formats: input by magic bytes, output defaults to the input format
    let input_format = FileManager::detect_format(&options.input_path)?;
    let output_format = match &options.output_format {
        Some(token) => token
            .parse::<DocumentFormat>()
            .map_err(|e| anyhow!("{}", e))?,
        None => input_format,
    };

    let target = TargetLanguage::from_display_name(&config.target_language)?;

    let output_path = options.output.clone().unwrap_or_else(|| {
        let parent = options
            .input_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        FileManager::generate_output_path(&options.input_path, parent, output_format)
    });

    let request = ConversionRequest {
        input: options.input_path.clone(),
        input_format,
        output_format,
        target,
        show_comparison: options.show_comparison,
        preserve_layout: options.preserve_layout,
    };

    info!(
        "doctran: {} -> {} ({})",
        input_format,
        output_format,
        target.display_name()
    );

    let controller = Controller::with_config(config);
    let reporter = ProgressBarReporter::new();

    let result = controller
        .convert_to_file(&request, &output_path, &reporter)
        .await;
    reporter.finish();

    match result {
        Ok(conversion) => {
            info!(
                "Wrote {} bytes ({}) to {}",
                conversion.bytes.len(),
                conversion.mime_type(),
                output_path.display()
            );
            Ok(())
        }
        // One user-facing failure message; details are already logged
        Err(e) => Err(anyhow!("Conversion failed: {}", e)),
    }
}
