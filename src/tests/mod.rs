//! Test modules for runetrie.
//!
//! This module contains crate-level testing infrastructure:
//! - Property-based tests for the trie using proptest
//! - Configuration loading tests
//! - Error conversion tests
//! - Shell session tests
//! - Shared strategies and fixtures

pub mod config_tests;
pub mod rune_trie_tests;
