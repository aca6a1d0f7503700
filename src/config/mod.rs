//! Configuration module for runetrie.
//!
//! This module provides a configuration system that can load settings from
//! files (TOML, YAML, JSON) and override them with environment variables.
//! All configuration values are validated for correctness before use.

use std::path::{Path, PathBuf};

use crate::error::config::ConfigError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod dictionary;

pub use dictionary::DictionaryConfig;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "RUNETRIE";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for runetrie.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Dictionary loading configuration
    pub dictionary: DictionaryConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for AppConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.dictionary.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::Invalid {
                key: "log.level",
                reason: format!("unknown level {other:?}"),
            }),
        }
    }
}

/// Configuration loader for runetrie.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from defaults, a file and environment variables,
    /// later sources overriding earlier ones.
    ///
    /// Environment variables are named `<PREFIX>__<SECTION>__<KEY>`, e.g.
    /// `RUNETRIE__LOG__LEVEL=debug`.
    pub fn load(&self) -> ConfigResult<AppConfig> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = &self.config_path {
            builder = builder.add_source(File::from(path.as_path()).format(file_format(path)?));
        }

        let merged = builder
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = merged.try_deserialize()?;
        app_config.validate()?;

        debug!(
            path = ?self.config_path,
            prefix = %self.env_prefix,
            "Configuration loaded"
        );
        Ok(app_config)
    }
}

/// Picks the parser for `path` from its extension.
fn file_format(path: &Path) -> ConfigResult<FileFormat> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(FileFormat::Toml),
        Some("json") => Ok(FileFormat::Json),
        Some("yaml" | "yml") => Ok(FileFormat::Yaml),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}
