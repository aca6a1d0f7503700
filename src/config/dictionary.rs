//! Dictionary configuration module.
//!
//! This module defines how word lists are read into the trie and how long the
//! keys accepted from files and shell commands may be.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dictionary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Word list loaded at startup (None for an empty trie)
    pub path: Option<PathBuf>,

    /// Separator between the word and its value on each line
    pub separator: String,

    /// Lines starting with this prefix are skipped
    pub comment_prefix: String,

    /// Maximum key length in code points
    pub max_key_chars: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: None,
            separator: "\t".to_string(),
            comment_prefix: "#".to_string(),
            max_key_chars: 256,
        }
    }
}

impl Validate for DictionaryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.separator.is_empty() {
            return Err(ConfigError::Invalid {
                key: "dictionary.separator",
                reason: "must not be empty".to_string(),
            });
        }

        if self.comment_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                key: "dictionary.comment_prefix",
                reason: "must not be empty".to_string(),
            });
        }

        if self.max_key_chars == 0 || self.max_key_chars > 65_536 {
            return Err(ConfigError::Invalid {
                key: "dictionary.max_key_chars",
                reason: format!("must be between 1 and 65536, got {}", self.max_key_chars),
            });
        }

        Ok(())
    }
}
