//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::client::ClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream analytics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl From<&ApiConfig> for ClientConfig {
    fn from(api: &ApiConfig) -> Self {
        ClientConfig {
            base_url: api.base_url.clone(),
            request_timeout_ms: api.request_timeout_secs.saturating_mul(1000),
        }
    }
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
    "info".to_string()
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

impl LoggingConfig {
    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
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
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// Runs before logging is set up, so problems with candidate files are
    /// returned in [`LoadedConfig::skipped`] for the caller to report.
    pub fn load_default() -> LoadedConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("sentiview").join("config.toml")),
            Some(PathBuf::from("/etc/sentiview/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover(&config_paths)
    }

    /// Load the first readable config among `paths`, falling back to env-only
    pub fn discover(paths: &[PathBuf]) -> LoadedConfig {
        let mut skipped = Vec::new();

        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        return LoadedConfig {
                            config,
                            path: Some(path.clone()),
                            skipped,
                        };
                    }
                    Err(e) => skipped.push(e),
                }
            }
        }

        LoadedConfig {
            config: Self::from_env(),
            path: None,
            skipped,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("SENTIVIEW_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = var("SENTIVIEW_REQUEST_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.api.request_timeout_secs = s;
            }
        }

        if let Some(level) = var("SENTIVIEW_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SENTIVIEW_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of searching the default config locations
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from; `None` means defaults plus environment
    pub path: Option<PathBuf>,
    /// Candidate files that exist but could not be loaded
    pub skipped: Vec<ConfigError>,
}

impl LoadedConfig {
    /// Log where the config came from and any files that were skipped
    pub fn report(&self) {
        for e in &self.skipped {
            tracing::warn!("{}", e);
        }
        match &self.path {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
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
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sentiview Configuration
#
# Environment variables override these settings:
# - SENTIVIEW_API_URL
# - SENTIVIEW_REQUEST_TIMEOUT_SECS
# - SENTIVIEW_LOG_LEVEL
# - SENTIVIEW_LOG_FORMAT

[api]
# Base URL of the analytics API (serves /posts and /posts/{id}/history)
base_url = "http://localhost:3000"

# Request timeout in seconds
request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
