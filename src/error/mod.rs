//! Error module for runetrie.
//!
//! The trie itself never fails: missing keys are ordinary negative results.
//! Errors only arise in the application layer around it, while loading
//! configuration, reading word lists and interpreting shell commands.

use thiserror::Error;

pub mod config;
pub mod input;

/// Result type alias used throughout the application layer.
pub type AppResult<T> = Result<T, AppError>;

/// Core error enum for runetrie.
#[derive(Error, Debug)]
pub enum AppError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors caused by malformed commands or dictionary lines.
    #[error("Input error: {0}")]
    Input(#[from] input::InputError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

impl AppError {
    /// Whether the error only concerns one line of input, so the caller can
    /// report it and carry on with the next line.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Input(_) | AppError::Serialization(_))
    }
}
