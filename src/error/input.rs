//! Input error module.
//!
//! Errors raised while reading dictionary files and shell commands. Each one
//! concerns a single line; none of them leaves the trie modified.

use thiserror::Error;

/// Errors that can occur while interpreting a line of input.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum InputError {
    /// The first word of a shell line is not a known command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A command was given without an argument it requires.
    #[error("Command {command} requires a {argument}")]
    MissingArgument {
        /// The command that was given
        command: String,
        /// What is missing
        argument: &'static str,
    },

    /// A command was given more arguments than it takes.
    #[error("Command {command} does not take {argument:?}")]
    UnexpectedArgument {
        /// The command that was given
        command: String,
        /// The text left over after its arguments
        argument: String,
    },

    /// A quoted key could not be read as a JSON string.
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    /// A key to be stored was empty.
    #[error("Empty key")]
    EmptyKey,

    /// A key exceeded the configured length limit.
    #[error("Key of {chars} code points exceeds the limit of {max_chars}")]
    KeyTooLong {
        /// Length of the rejected key in code points
        chars: usize,
        /// The configured limit
        max_chars: usize,
    },

    /// A dictionary line could not be used.
    #[error("Line {line}: {reason}")]
    InvalidEntry {
        /// 1-based line number within the dictionary
        line: usize,
        /// Why the line was rejected
        reason: String,
    },
}

/// Result type for input handling.
pub type InputResult<T> = Result<T, InputError>;
