//! Word list loading.
//!
//! A word list holds one entry per line, `word<separator>value`. The value
//! column is optional and read the same way shell values are. The whole list
//! is parsed before anything is inserted, so a bad line leaves the trie as it
//! was.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::{check_key_length, parse_value};
use crate::config::DictionaryConfig;
use crate::data_structures::Trie;
use crate::error::input::InputError;
use crate::error::AppResult;

/// Inserts every entry read from `reader` into `trie`.
///
/// # Returns
///
/// The number of entries inserted. Entries that repeat a word overwrite the
/// earlier value, so the count can exceed the growth of [`Trie::size`].
///
/// # Errors
///
/// Fails on I/O errors and on the first malformed line, reporting its
/// 1-based line number.
pub fn load_dictionary<R: BufRead>(
    trie: &Trie<Value>,
    reader: R,
    config: &DictionaryConfig,
) -> AppResult<usize> {
    let mut entries = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(entry) = parse_entry(&line, number + 1, config)? {
            entries.push(entry);
        }
    }

    let loaded = entries.len();
    for (word, value) in entries {
        trie.insert(word, value);
    }

    debug!(loaded, size = trie.size(), "Dictionary entries inserted");
    Ok(loaded)
}

/// Opens `path` and loads it with [`load_dictionary`].
pub fn load_dictionary_file<P: AsRef<Path>>(
    trie: &Trie<Value>,
    path: P,
    config: &DictionaryConfig,
) -> AppResult<usize> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let loaded = load_dictionary(trie, BufReader::new(file), config)?;
    info!(path = %path.display(), loaded, "Dictionary loaded");
    Ok(loaded)
}

/// Parses one line; `Ok(None)` for blank and comment lines.
fn parse_entry(
    line: &str,
    number: usize,
    config: &DictionaryConfig,
) -> Result<Option<(String, Value)>, InputError> {
    if line.trim().is_empty() || line.trim_start().starts_with(&config.comment_prefix) {
        return Ok(None);
    }

    let (word, value) = match line.split_once(config.separator.as_str()) {
        Some((word, value)) => (word.trim(), parse_value(value)),
        None => (line.trim(), Value::Null),
    };

    if word.is_empty() {
        return Err(InputError::InvalidEntry {
            line: number,
            reason: InputError::EmptyKey.to_string(),
        });
    }

    check_key_length(word, config.max_key_chars).map_err(|e| InputError::InvalidEntry {
        line: number,
        reason: e.to_string(),
    })?;

    Ok(Some((word.to_string(), value)))
}
