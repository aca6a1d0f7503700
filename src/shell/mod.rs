//! Line-oriented command shell over a [`Trie`].
//!
//! Every input line is one command; every command produces one JSON line on
//! the output. Malformed lines produce an `{"error": ...}` line and the session
//! carries on.
//!
//! ```text
//! insert <key> [value]     store a key, value parsed as JSON or one word of text
//! delete <key>             remove a key
//! find <key>               exact lookup, longest-prefix index in bytes
//! find-runes <key>         exact lookup, longest-prefix index in code points
//! prefix [prefix]          every key starting with prefix
//! prefix-runes [prefix]    same, prefix given as code points
//! size                     number of live keys
//! clear                    remove every key
//! ```
//!
//! A key holding whitespace is written as a JSON string: `insert "ice cream" 2`.

pub mod dictionary;

use std::io::{BufRead, Write};
use std::str::FromStr;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::DictionaryConfig;
use crate::data_structures::Trie;
use crate::error::input::{InputError, InputResult};
use crate::error::{AppError, AppResult};

pub use dictionary::{load_dictionary, load_dictionary_file};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Store `value` under `key`.
    Insert {
        /// Key to store
        key: String,
        /// Value to store
        value: Value,
    },
    /// Remove `key`.
    Delete {
        /// Key to remove
        key: String,
    },
    /// Look `key` up, indexing in bytes.
    Find {
        /// Key to look up
        key: String,
    },
    /// Look `key` up, indexing in code points.
    FindRunes {
        /// Key to look up
        key: String,
    },
    /// Enumerate keys under `prefix`.
    Prefix {
        /// Prefix to enumerate
        prefix: String,
    },
    /// Enumerate keys under `prefix`, split into code points first.
    PrefixRunes {
        /// Prefix to enumerate
        prefix: String,
    },
    /// Report the number of live keys.
    Size,
    /// Remove every key.
    Clear,
}

impl Command {
    /// The key or prefix the command walks, if any.
    fn key(&self) -> Option<&str> {
        match self {
            Command::Insert { key, .. }
            | Command::Delete { key }
            | Command::Find { key }
            | Command::FindRunes { key } => Some(key),
            Command::Prefix { prefix } | Command::PrefixRunes { prefix } => Some(prefix),
            Command::Size | Command::Clear => None,
        }
    }
}

impl FromStr for Command {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_word(line.trim());

        match name {
            "insert" => {
                let (key, value) = required_argument(name, "key", rest)?;
                Ok(Command::Insert {
                    key,
                    value: insert_value(name, value)?,
                })
            }
            "delete" => Ok(Command::Delete {
                key: sole(name, required_argument(name, "key", rest)?)?,
            }),
            "find" => Ok(Command::Find {
                key: sole(name, required_argument(name, "key", rest)?)?,
            }),
            "find-runes" => Ok(Command::FindRunes {
                key: sole(name, required_argument(name, "key", rest)?)?,
            }),
            "prefix" => Ok(Command::Prefix {
                prefix: optional_argument(name, rest)?,
            }),
            "prefix-runes" => Ok(Command::PrefixRunes {
                prefix: optional_argument(name, rest)?,
            }),
            "size" => sole(name, (String::new(), rest)).map(|_| Command::Size),
            "clear" => sole(name, (String::new(), rest)).map(|_| Command::Clear),
            other => Err(InputError::UnknownCommand(other.to_string())),
        }
    }
}

/// Splits off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

/// Splits off the first argument and returns it with the trimmed remainder.
///
/// A leading `"` starts a JSON string, so `"ice cream"` is one argument and
/// `""` is the empty key. Anything else runs to the next whitespace.
fn split_argument(s: &str) -> InputResult<(String, &str)> {
    let s = s.trim_start();
    if !s.starts_with('"') {
        let (word, rest) = split_word(s);
        return Ok((word.to_string(), rest));
    }

    let mut stream = serde_json::Deserializer::from_str(s).into_iter::<String>();
    let word = match stream.next() {
        Some(Ok(word)) => word,
        Some(Err(e)) => return Err(InputError::MalformedKey(e.to_string())),
        None => return Err(InputError::MalformedKey("unterminated string".to_string())),
    };

    let rest = &s[stream.byte_offset()..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return Err(InputError::MalformedKey(
            "quoted key must be followed by whitespace".to_string(),
        ));
    }
    Ok((word, rest.trim()))
}

/// First argument of `command`, which must be present.
fn required_argument<'a>(
    command: &str,
    argument: &'static str,
    rest: &'a str,
) -> InputResult<(String, &'a str)> {
    if rest.is_empty() {
        return Err(InputError::MissingArgument {
            command: command.to_string(),
            argument,
        });
    }
    split_argument(rest)
}

/// First argument of `command`, empty when absent.
fn optional_argument(command: &str, rest: &str) -> InputResult<String> {
    if rest.is_empty() {
        return Ok(String::new());
    }
    sole(command, split_argument(rest)?)
}

/// Rejects anything left over after the last argument `command` takes.
fn sole(command: &str, (argument, extra): (String, &str)) -> InputResult<String> {
    if extra.is_empty() {
        Ok(argument)
    } else {
        Err(InputError::UnexpectedArgument {
            command: command.to_string(),
            argument: extra.to_string(),
        })
    }
}

/// Reads the value of an `insert`: any JSON value, or a single bare word
/// taken as text. Text with whitespace has to be quoted.
fn insert_value(command: &str, text: &str) -> InputResult<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }
    let (word, extra) = split_word(text);
    let word = sole(command, (word.to_string(), extra))?;
    Ok(parse_value(&word))
}

/// Reads a value column: JSON when it parses, plain text otherwise, `null`
/// when absent.
pub(crate) fn parse_value(text: &str) -> Value {
    let text = text.trim();
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Counts of what a [`Session::run`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Commands that ran
    pub executed: usize,
    /// Lines rejected with an error
    pub rejected: usize,
}

/// Executes commands against a shared trie.
#[derive(Debug)]
pub struct Session<'a> {
    trie: &'a Trie<Value>,
    max_key_chars: usize,
}

impl<'a> Session<'a> {
    /// Creates a session over `trie`, bounding keys as `config` says.
    pub fn new(trie: &'a Trie<Value>, config: &DictionaryConfig) -> Self {
        Self {
            trie,
            max_key_chars: config.max_key_chars,
        }
    }

    /// Runs a single command and returns its JSON result.
    pub fn execute(&self, command: Command) -> AppResult<Value> {
        if let Some(key) = command.key() {
            check_key_length(key, self.max_key_chars)?;
        }

        let result = match command {
            Command::Insert { key, value } => {
                let previous = self.trie.insert(&key, value);
                json!({ "key": key, "previous": previous })
            }
            Command::Delete { key } => {
                let deleted = self.trie.delete(&key);
                json!({ "key": key, "deleted": deleted })
            }
            Command::Find { key } => serde_json::to_value(self.trie.find(&key))?,
            Command::FindRunes { key } => {
                let runes: Vec<char> = key.chars().collect();
                serde_json::to_value(self.trie.find_by_runes(&runes))?
            }
            Command::Prefix { prefix } => serde_json::to_value(self.trie.prefix_match(&prefix))?,
            Command::PrefixRunes { prefix } => {
                let runes: Vec<char> = prefix.chars().collect();
                serde_json::to_value(self.trie.prefix_match_by_runes(&runes))?
            }
            Command::Size => json!({ "size": self.trie.size() }),
            Command::Clear => json!({ "cleared": self.trie.clear() }),
        };

        Ok(result)
    }

    /// Reads commands from `input` until it ends, writing one JSON line per
    /// non-blank line to `output`.
    ///
    /// Lines starting with `#` are skipped. Bad commands are reported on
    /// `output` and counted; only I/O failures end the session early.
    pub fn run<R, W>(&self, input: R, mut output: W) -> AppResult<SessionStats>
    where
        R: BufRead,
        W: Write,
    {
        let mut stats = SessionStats::default();

        for (number, line) in input.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let outcome = trimmed
                .parse::<Command>()
                .map_err(AppError::from)
                .and_then(|command| {
                    debug!(line = number + 1, ?command, "Executing command");
                    self.execute(command)
                });

            match outcome {
                Ok(result) => {
                    stats.executed += 1;
                    writeln!(output, "{result}")?;
                }
                Err(e) if e.is_recoverable() => {
                    stats.rejected += 1;
                    warn!(line = number + 1, error = %e, "Rejected command");
                    writeln!(output, "{}", json!({ "error": e.to_string() }))?;
                }
                Err(e) => return Err(e),
            }
        }

        output.flush()?;
        Ok(stats)
    }
}

/// Rejects keys longer than `max_chars` code points.
pub(crate) fn check_key_length(key: &str, max_chars: usize) -> InputResult<()> {
    let chars = key.chars().count();
    if chars > max_chars {
        return Err(InputError::KeyTooLong { chars, max_chars });
    }
    Ok(())
}
