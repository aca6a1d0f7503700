//! Data structures for runetrie.
//!
//! This module contains the concurrent dictionary structures the rest of the
//! crate is built on. All implementations are free of unsafe code and return
//! owned copies rather than references into shared state.

pub mod rune_trie;

// Re-export common data structures
pub use rune_trie::{Lookup, Match, Trie};
