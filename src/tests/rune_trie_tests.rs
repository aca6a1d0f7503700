//! Property-based tests for the rune trie.
//!
//! Every property runs the trie side by side with a `BTreeMap` model and
//! checks that the public operations agree with it.

use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;

use super::test_utils::{key_strategy, keyed_ops_strategy, TrieOp};
use crate::data_structures::{Match, Trie};

/// Applies `ops` to both a trie and a model, checking each delete result.
fn apply(ops: &[TrieOp]) -> Result<(Trie<u32>, BTreeMap<String, u32>), TestCaseError> {
    let trie = Trie::new();
    let mut model = BTreeMap::new();

    for op in ops {
        match op {
            TrieOp::Insert(key, value) => {
                let previous = trie.insert(key, *value);
                prop_assert_eq!(previous, model.insert(key.clone(), *value));
            }
            TrieOp::Delete(key) => {
                let before = trie.size();
                let deleted = trie.delete(key);
                prop_assert_eq!(deleted, model.remove(key).is_some());
                let expected = if deleted { before - 1 } else { before };
                prop_assert_eq!(trie.size(), expected);
            }
        }
    }

    Ok((trie, model))
}

fn as_map(matches: Vec<Match<u32>>) -> HashMap<String, u32> {
    let len = matches.len();
    let map: HashMap<_, _> = matches.into_iter().map(|m| (m.word, m.value)).collect();
    assert_eq!(map.len(), len, "prefix enumeration reported a word twice");
    map
}

/// End offset of the longest model key that prefixes `query`.
fn longest_prefix(model: &BTreeMap<String, u32>, query: &str) -> usize {
    model
        .keys()
        .filter(|k| query.starts_with(k.as_str()))
        .map(String::len)
        .max()
        .unwrap_or(0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Inserted keys come back with their value and full length as index.
    #[test]
    fn prop_round_trip(key in key_strategy(), value in any::<u32>()) {
        prop_assume!(!key.is_empty());
        let trie = Trie::new();
        trie.insert(&key, value);

        let found = trie.find(&key);
        prop_assert!(found.exists);
        prop_assert_eq!(found.value, Some(value));
        prop_assert_eq!(found.index, key.len());

        let runes: Vec<char> = key.chars().collect();
        let found = trie.find_by_runes(&runes);
        prop_assert!(found.exists);
        prop_assert_eq!(found.index, runes.len());
    }

    /// Re-inserting a key keeps the size and replaces the value.
    #[test]
    fn prop_overwrite(key in key_strategy(), first in any::<u32>(), second in any::<u32>()) {
        let trie = Trie::new();
        trie.insert(&key, first);
        let size = trie.size();

        prop_assert_eq!(trie.insert(&key, second), Some(first));
        prop_assert_eq!(trie.size(), size);
        prop_assert_eq!(trie.get(&key), Some(second));
    }

    /// Deletes only succeed on live keys and move the size by exactly one.
    #[test]
    fn prop_delete_matches_model(ops in keyed_ops_strategy()) {
        let (trie, model) = apply(&ops)?;
        prop_assert_eq!(trie.size(), model.len());

        for (key, value) in &model {
            prop_assert!(trie.delete(key));
            prop_assert!(!trie.find(key).exists);
            prop_assert!(!trie.delete(key));
            prop_assert!(trie.get(key).is_none(), "deleted value for {} still visible", value);
        }
        prop_assert!(trie.is_empty());
        prop_assert!(trie.entries().is_empty());
    }

    /// After any mix of inserts and deletes every entry sits at the end of
    /// its own key's path and no node below the root is a childless
    /// non-terminal.
    #[test]
    fn prop_structure_stays_minimal(ops in keyed_ops_strategy()) {
        let (trie, model) = apply(&ops)?;
        prop_assert_eq!(trie.check_structure(), Ok(()));

        for key in model.keys() {
            trie.delete(key);
            prop_assert_eq!(trie.check_structure(), Ok(()));
        }
        prop_assert!(trie.is_empty());
    }

    /// Lookups agree with the model, including the longest-prefix index.
    #[test]
    fn prop_find_matches_model(ops in keyed_ops_strategy(), query in key_strategy()) {
        let (trie, model) = apply(&ops)?;

        let found = trie.find(&query);
        prop_assert_eq!(found.exists, model.contains_key(&query));
        prop_assert_eq!(found.value, model.get(&query).copied());
        prop_assert_eq!(found.index, longest_prefix(&model, &query));

        let runes: Vec<char> = query.chars().collect();
        let by_runes = trie.find_by_runes(&runes);
        let expected = query[..found.index].chars().count();
        prop_assert_eq!(by_runes.exists, found.exists);
        prop_assert_eq!(by_runes.index, expected);
    }

    /// Prefix enumeration returns exactly the model keys under the prefix.
    #[test]
    fn prop_prefix_matches_model(ops in keyed_ops_strategy(), prefix in key_strategy()) {
        let (trie, model) = apply(&ops)?;

        let expected: HashMap<String, u32> = model
            .iter()
            .filter(|(k, _)| k.starts_with(prefix.as_str()))
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        prop_assert_eq!(as_map(trie.prefix_match(&prefix)), expected.clone());

        let runes: Vec<char> = prefix.chars().collect();
        prop_assert_eq!(as_map(trie.prefix_match_by_runes(&runes)), expected);
    }

    /// Proper prefixes that were never inserted are not keys, but still reach
    /// the longer key through prefix enumeration.
    #[test]
    fn prop_prefix_containment(key in key_strategy(), value in any::<u32>()) {
        let trie = Trie::new();
        trie.insert(&key, value);

        for (cut, _) in key.char_indices() {
            let prefix = &key[..cut];
            prop_assert!(!trie.find(prefix).exists);
            prop_assert!(trie.prefix_match(prefix).iter().any(|m| m.word == key));
        }
    }
}
