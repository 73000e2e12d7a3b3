use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and merging configuration settings with CLI overrides.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Catalog account user name
    #[serde(default)]
    pub username: String,

    /// Catalog account password
    #[serde(default)]
    pub password: String,

    /// Ordered language preference list (earlier = more preferred)
    #[serde(default)]
    pub languages: Vec<String>,

    /// Application identifier sent as the User-Agent header
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Catalog API key
    #[serde(default)]
    pub api_key: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
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

fn default_app_name() -> String {
    format!("subgrab v{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Default location of the configuration file:
    /// `<user config dir>/subgrab/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("subgrab").join("config.json"))
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("Failed to open config file: {:?}", path.as_ref()))?;
        let reader = std::io::BufReader::new(file);

        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Validate the configuration for consistency and required values
    ///
    /// Also normalizes the language preference list to the lowercase codes
    /// the catalog expects, preserving order.
    pub fn validate(&mut self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(anyhow!("An API key is required to query the subtitle catalog"));
        }

        if self.username.is_empty() || self.password.is_empty() {
            return Err(anyhow!(
                "Both username and password are required to download subtitles"
            ));
        }

        if self.app_name.is_empty() {
            self.app_name = default_app_name();
        }

        self.languages = crate::language_utils::normalize_preference(&self.languages)?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            username: String::new(),
            password: String::new(),
            languages: Vec::new(),
            app_name: default_app_name(),
            api_key: String::new(),
            log_level: LogLevel::default(),
        }
    }
}
