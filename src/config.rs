//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::metrics::DEFAULT_HISTOGRAM_BINS;
use crate::report::{ChartOptions, OutputFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Largest accepted histogram bin count, same bound as `--bins`
pub const MAX_HISTOGRAM_BINS: usize = u16::MAX as usize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub charts: ChartsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// CSV export read when no path is given on the command line
    #[serde(default = "default_csv_path")]
    pub path: PathBuf,

    /// Single-character field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("JIRA.csv")
}

fn default_delimiter() -> char {
    ','
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_csv_path(),
            delimiter: default_delimiter(),
        }
    }
}

/// Chart aggregation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl ChartsConfig {
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            histogram_bins: self.histogram_bins,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Include the completed-item table
    #[serde(default)]
    pub show_items: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("jira-flow").join("config.toml")),
            Some(PathBuf::from("./jira-flow.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_HISTOGRAM_BINS).contains(&self.charts.histogram_bins) {
            return Err(ConfigError::Invalid(format!(
                "charts.histogram_bins must be between 1 and {}, got {}",
                MAX_HISTOGRAM_BINS, self.charts.histogram_bins
            )));
        }
        if !self.source.delimiter.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "source.delimiter must be a single ASCII character, got {:?}",
                self.source.delimiter
            )));
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        // validated ASCII
        self.source.delimiter as u8
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("JIRA_FLOW_CSV") {
            self.source.path = PathBuf::from(path);
        }

        if let Ok(bins) = std::env::var("JIRA_FLOW_HISTOGRAM_BINS") {
            match bins.parse::<usize>() {
                Ok(b) if (1..=MAX_HISTOGRAM_BINS).contains(&b) => self.charts.histogram_bins = b,
                _ => tracing::warn!("Ignoring invalid JIRA_FLOW_HISTOGRAM_BINS: {}", bins),
            }
        }

        if let Ok(format) = std::env::var("JIRA_FLOW_OUTPUT_FORMAT") {
            match OutputFormat::parse(&format) {
                Some(f) => self.output.format = f,
                None => tracing::warn!("Ignoring invalid JIRA_FLOW_OUTPUT_FORMAT: {}", format),
            }
        }

        if let Ok(level) = std::env::var("JIRA_FLOW_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("JIRA_FLOW_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# jira-flow Configuration
#
# Environment variables override these settings:
# - JIRA_FLOW_CSV
# - JIRA_FLOW_HISTOGRAM_BINS
# - JIRA_FLOW_OUTPUT_FORMAT
# - JIRA_FLOW_LOG_LEVEL
# - JIRA_FLOW_LOG_FORMAT

[source]
# Jira CSV export read when no path is given
path = "JIRA.csv"

# Field delimiter
delimiter = ","

[charts]
# Number of equal-width bins in the cycle time histogram
histogram_bins = 20

[output]
# Report format: table or json
format = "table"

# Include the completed-item table in table output
show_items = false

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for machine consumption)
format = "pretty"
"#
    .to_string()
}
