// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::opensubtitles::OpenSubtitlesClient;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod movie_hash;
mod opensubtitles;
mod ranking;
mod selection;

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
    /// Search, select and download subtitles (default command)
    #[command(alias = "download")]
    Fetch(FetchArgs),

    /// Generate shell completions for subgrab
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// Video files or directories with video files
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Comma separated list of language codes to search, most preferred first
    #[arg(short, long)]
    languages: Option<String>,

    /// Catalog account user name
    #[arg(short, long, requires = "password")]
    username: Option<String>,

    /// Catalog account password
    #[arg(short, long, requires = "username")]
    password: Option<String>,

    /// Wait for ENTER before exiting
    #[arg(long)]
    pause: bool,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subgrab - interactive subtitle fetcher
///
/// Identifies local video files by a content hash, searches the
/// OpenSubtitles catalog, and downloads the subtitles you pick from a
/// terminal table.
#[derive(Parser, Debug)]
#[command(name = "subgrab")]
#[command(version)]
#[command(about = "Find and download subtitles for local video files")]
#[command(long_about = "subgrab identifies local video files by a content hash, searches the
OpenSubtitles catalog, ranks the candidates by your language preference,
and downloads the ones you pick from an interactive terminal table.

EXAMPLES:
    subgrab movie.mkv                           # Search and pick subtitles
    subgrab -l cs,en movie.mkv                  # Prefer Czech, then English
    subgrab -u NAME -p PASS movie.mkv           # Credentials on the command line
    subgrab /media/movies/                      # All videos under a directory
    subgrab --log-level debug movie.mkv         # Verbose logging
    subgrab completions bash > subgrab.bash     # Generate bash completions

CONFIGURATION:
    Configuration is read from config.json in the user config directory
    (for example ~/.config/subgrab/config.json), or from --config-path.
    Recognized keys: username, password, languages, app_name, api_key.
    Command line options override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video files or directories with video files
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Comma separated list of language codes to search, most preferred first
    #[arg(short, long)]
    languages: Option<String>,

    /// Catalog account user name
    #[arg(short, long, requires = "password")]
    username: Option<String>,

    /// Catalog account password
    #[arg(short, long, requires = "username")]
    password: Option<String>,

    /// Wait for ENTER before exiting
    #[arg(long)]
    pause: bool,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum)]
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
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
            generate(shell, &mut cmd, "subgrab", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Fetch(args)) => run_fetch(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let fetch_args = FetchArgs {
                paths: cli.paths,
                languages: cli.languages,
                username: cli.username,
                password: cli.password,
                pause: cli.pause,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_fetch(fetch_args).await
        }
    }
}

async fn run_fetch(options: FetchArgs) -> Result<()> {
    let pause = options.pause;
    let result = fetch(options).await;

    if let Err(error) = &result {
        error!("{:#}", error);
    }

    // The prompt must run even when the run failed.
    if pause {
        print!("\nPress ENTER to finish...");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
    }

    // The error was already reported above; exit without repeating it.
    if result.is_err() {
        std::process::exit(1);
    }

    Ok(())
}

async fn fetch(options: FetchArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load configuration, falling back to defaults when no file exists
    let config_path = options.config_path.clone().or_else(Config::default_path);
    let mut config = match &config_path {
        Some(path) if FileManager::file_exists(path) => Config::from_file(path)?,
        Some(path) => {
            if options.config_path.is_some() {
                return Err(anyhow!("Config file does not exist: {:?}", path));
            }
            warn!("Config file not found at {:?}, using defaults.", path);
            Config::default()
        }
        None => Config::default(),
    };

    // Override config with CLI options if provided
    if let Some(languages) = &options.languages {
        config.languages = languages
            .split(',')
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect();
    }

    if let (Some(username), Some(password)) = (&options.username, &options.password) {
        config.username = username.clone();
        config.password = password.clone();
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

    // Expand directory arguments into their video files
    let videos = FileManager::expand_inputs(&options.paths)?;
    if videos.is_empty() {
        return Err(anyhow!("No video files found in the given paths"));
    }
    info!("Processing {} video file(s)", videos.len());

    // Create the catalog client, selector and controller
    let mut catalog = OpenSubtitlesClient::new(config.app_name.clone(), config.api_key.clone());
    let mut selector = selection::stdin_selector();
    let controller = Controller::with_config(config)?;

    controller.run(&mut catalog, &mut selector, &videos).await
}
