//! Configuration error module.
//!
//! Failures while locating, reading or validating the layered configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`crate::config::ConfigLoader`] and the `Validate` impls.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file named with `--config` does not exist.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file extension is not one of toml, json, yaml or yml.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A source could not be read or merged into [`crate::config::AppConfig`].
    #[error("Failed to read configuration: {0}")]
    Parse(#[from] ::config::ConfigError),

    /// A setting was read but holds an unusable value.
    #[error("Invalid {key}: {reason}")]
    Invalid {
        /// Dotted path of the setting, e.g. `log.level`
        key: &'static str,
        /// What is wrong with it
        reason: String,
    },
}
