//! Runetrie Library
//!
//! This library contains a concurrent prefix trie keyed by Unicode code
//! points, together with the configuration, error handling and command shell
//! used by the `runetrie` binary. The trie can also be used on its own as a
//! dependency by other projects.
//!
//! # Architecture
//!
//! - [`data_structures::rune_trie`] holds the trie itself
//! - [`shell`] loads word lists and interprets line commands against a trie
//! - [`config`] layers defaults, a config file and environment overrides
//! - [`error`] defines the error types shared by the application layer

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod shell;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for runetrie.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
