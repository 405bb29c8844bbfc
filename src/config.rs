//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::{normalize_base_url, HttpBackendConfig, DEFAULT_API_URL};

pub const ENV_API_URL: &str = "NUTRICHAT_API_URL";
pub const ENV_LOG_LEVEL: &str = "NUTRICHAT_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "NUTRICHAT_LOG_FORMAT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Unset means no client-side timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            request_timeout_secs: None,
        }
    }
}

impl BackendConfig {
    pub fn http(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            base_url: normalize_base_url(&self.url),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Invalid {
                key: ENV_LOG_FORMAT,
                value: other.to_string(),
            }),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<LoadedConfig, ConfigError> {
        let mut config = Self::load(path)?;
        let problems = config.apply_env_overrides();
        Ok(LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
            problems,
        })
    }

    /// Candidate files, checked in order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("nutrichat").join("config.toml")),
            Some(PathBuf::from("./nutrichat.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> LoadedConfig {
        Self::load_first(&Self::default_paths(), |key| std::env::var(key).ok())
    }

    /// Load the first readable file among `paths`, then apply overrides
    ///
    /// Files that exist but fail to load are skipped and reported in
    /// [`LoadedConfig::problems`], as are rejected override values.
    pub fn load_first(
        paths: &[PathBuf],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> LoadedConfig {
        let mut problems = Vec::new();
        let mut found = None;

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(config) => {
                    found = Some((config, path.clone()));
                    break;
                }
                Err(e) => problems.push(e),
            }
        }

        let (mut config, source) = match found {
            Some((config, path)) => (config, Some(path)),
            None => (Config::default(), None),
        };
        problems.extend(config.apply_overrides(lookup));

        LoadedConfig {
            config,
            source,
            problems,
        }
    }

    fn apply_env_overrides(&mut self) -> Vec<ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in practice)
    ///
    /// Returns the values that were rejected.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigError> {
        let mut rejected = Vec::new();

        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.backend.url = url;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            match format.parse() {
                Ok(f) => self.logging.format = f,
                Err(e) => rejected.push(e),
            }
        }

        rejected
    }
}

/// A loaded configuration and what went wrong on the way
///
/// Loading happens before logging is set up, so problems are handed back
/// for the caller to log once a subscriber exists.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the values came from, `None` for built-in defaults
    pub source: Option<PathBuf>,
    pub problems: Vec<ConfigError>,
}

impl LoadedConfig {
    /// Log where the config came from and every problem met
    pub fn report(&self) {
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::debug!("Using default config with environment overrides"),
        }
        for problem in &self.problems {
            tracing::warn!("Ignoring config: {}", problem);
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

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("Failed to write config file {path:?}: {error}")]
    Write { path: PathBuf, error: String },
}

/// Write the default config file to `path`
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, generate_default_config()).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Nutrichat Configuration
#
# Environment variables override these settings:
# - NUTRICHAT_API_URL
# - NUTRICHAT_LOG_LEVEL
# - NUTRICHAT_LOG_FORMAT

[backend]
# Base URL of the nutrition backend
url = "http://localhost:8000"

# Client-side request timeout in seconds (unset waits indefinitely)
# request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
