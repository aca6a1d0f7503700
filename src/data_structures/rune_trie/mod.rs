// Copyright (c) 2025 Runetrie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Rune Trie Implementation
//!
//! A concurrent, mutable prefix trie keyed by Unicode scalar values. Besides
//! exact lookup it reports the longest stored prefix of a query, which makes
//! it suitable as the dictionary behind greedy longest-match scanning.
//!
//! # Concurrency
//!
//! The whole tree sits behind a single reader/writer lock. Inserts, deletes and
//! clears take it exclusively for their entire duration; every lookup takes it
//! shared for its entire duration. Results are returned by value, so no caller
//! ever holds a reference into the tree across a later mutation.
//!
//! # Example
//!
//! ```
//! use runetrie_lib::data_structures::rune_trie::Trie;
//!
//! let trie = Trie::new();
//! trie.insert("he", 1);
//! trie.insert("hello", 2);
//!
//! let found = trie.find("helloworld");
//! assert!(!found.exists);
//! assert_eq!(found.index, 5);
//!
//! let mut words: Vec<_> = trie.prefix_match("he").into_iter().map(|m| m.word).collect();
//! words.sort();
//! assert_eq!(words, vec!["he", "hello"]);
//! ```

mod node;

use parking_lot::RwLock;
use serde::Serialize;

use node::{Entry, Node};

/// Outcome of [`Trie::find`] and [`Trie::find_by_runes`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lookup<V> {
    /// Whether the whole query is a live key.
    pub exists: bool,

    /// The value stored under the query, if it is a live key.
    pub value: Option<V>,

    /// End offset of the longest live key that prefixes the query, or 0.
    ///
    /// Counted in bytes for [`Trie::find`] and in code points for
    /// [`Trie::find_by_runes`].
    pub index: usize,
}

impl<V> Lookup<V> {
    fn missing(index: usize) -> Self {
        Self {
            exists: false,
            value: None,
            index,
        }
    }
}

/// A key and its value, as produced by prefix enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match<V> {
    /// The stored key.
    pub word: String,

    /// The value stored under `word`.
    pub value: V,
}

#[derive(Debug)]
struct Inner<V> {
    root: Node<V>,
    count: usize,
}

/// Concurrent prefix trie keyed by code points.
///
/// Key features:
/// * Longest-prefix index in bytes or code points
/// * Lazy deletion for interior keys, leaf trimming for childless ones
/// * One tree-wide `RwLock`; readers run in parallel, writers run alone
#[derive(Debug)]
pub struct Trie<V> {
    inner: RwLock<Inner<V>>,
}

impl<V> Trie<V> {
    /// Creates a new empty `Trie`.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                root: Node::new(),
                count: 0,
            }),
        }
    }

    /// Returns the number of live keys.
    pub fn size(&self) -> usize {
        self.inner.read().count
    }

    /// Returns `true` if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Inserts a key-value pair, overwriting the value of an identical key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert. The empty key is stored on the root.
    /// * `value` - The value to associate with the key.
    ///
    /// # Returns
    ///
    /// The value previously stored under `key`, or `None` if the key is new.
    pub fn insert<K>(&self, key: K, value: V) -> Option<V>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let node = inner.root.descend_or_create(key.chars());
        let previous = node.entry.replace(Entry {
            key: key.to_owned(),
            value,
        });

        match previous {
            Some(entry) => Some(entry.value),
            None => {
                inner.count += 1;
                None
            }
        }
    }

    /// Removes a key from the trie.
    ///
    /// # Returns
    ///
    /// `true` if `key` was live and is now gone. A key that only exists as a
    /// path towards longer keys is not live, so deleting it returns `false`.
    pub fn delete<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        let path: Vec<char> = key.as_ref().chars().collect();
        let mut inner = self.inner.write();

        let removed = inner.root.remove(&path);
        if removed {
            inner.count -= 1;
        }
        removed
    }

    /// Removes every key, returning how many were live.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.write();
        inner.root = Node::new();
        std::mem::take(&mut inner.count)
    }

    /// Returns `true` if `key` is live.
    pub fn contains<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        let inner = self.inner.read();
        let (node, _) = inner.root.locate(byte_units(key.as_ref()));
        node.is_some_and(Node::is_terminal)
    }
}

impl<V: Clone> Trie<V> {
    /// Looks up `key`, reporting the longest-prefix index in bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use runetrie_lib::data_structures::rune_trie::Trie;
    ///
    /// let trie = Trie::new();
    /// trie.insert("世界", ());
    ///
    /// let found = trie.find("世界你好");
    /// assert!(!found.exists);
    /// assert_eq!(found.index, 6);
    /// ```
    pub fn find<K>(&self, key: K) -> Lookup<V>
    where
        K: AsRef<str>,
    {
        let inner = self.inner.read();
        let (node, index) = inner.root.locate(byte_units(key.as_ref()));
        resolve(node, index)
    }

    /// Looks up a pre-split key, reporting the longest-prefix index in code points.
    ///
    /// # Example
    ///
    /// ```
    /// use runetrie_lib::data_structures::rune_trie::Trie;
    ///
    /// let trie = Trie::new();
    /// trie.insert("世界", ());
    ///
    /// let runes: Vec<char> = "世界你好".chars().collect();
    /// assert_eq!(trie.find_by_runes(&runes).index, 2);
    /// ```
    pub fn find_by_runes(&self, runes: &[char]) -> Lookup<V> {
        let inner = self.inner.read();
        let (node, index) = inner.root.locate(rune_units(runes));
        resolve(node, index)
    }

    /// Returns a copy of the value stored under `key`.
    pub fn get<K>(&self, key: K) -> Option<V>
    where
        K: AsRef<str>,
    {
        self.find(key).value
    }

    /// Returns every live key starting with `prefix`, in no particular order.
    pub fn prefix_match<P>(&self, prefix: P) -> Vec<Match<V>>
    where
        P: AsRef<str>,
    {
        let inner = self.inner.read();
        let (node, _) = inner.root.locate(byte_units(prefix.as_ref()));
        enumerate(node)
    }

    /// Same as [`Trie::prefix_match`] for a pre-split prefix.
    pub fn prefix_match_by_runes(&self, runes: &[char]) -> Vec<Match<V>> {
        let inner = self.inner.read();
        let (node, _) = inner.root.locate(rune_units(runes));
        enumerate(node)
    }

    /// Returns every live key, in no particular order.
    pub fn entries(&self) -> Vec<Match<V>> {
        self.prefix_match("")
    }
}

#[cfg(test)]
impl<V> Trie<V> {
    /// Walks the whole tree and reports the first structural fault: an entry
    /// stored under a path other than its key, a childless node without an
    /// entry below the root, or a size that disagrees with the live entries.
    pub(crate) fn check_structure(&self) -> Result<(), String> {
        let inner = self.inner.read();
        let mut live = 0;
        let mut stack = vec![(&inner.root, String::new())];

        while let Some((node, path)) = stack.pop() {
            match &node.entry {
                Some(entry) if entry.key != path => {
                    return Err(format!("entry {:?} stored under {:?}", entry.key, path));
                }
                Some(_) => live += 1,
                None if !path.is_empty() && node.children.is_empty() => {
                    return Err(format!("dangling node at {path:?}"));
                }
                None => {}
            }

            for (&c, child) in &node.children {
                let mut child_path = path.clone();
                child_path.push(c);
                stack.push((child, child_path));
            }
        }

        if live != inner.count {
            return Err(format!("size {} but {live} live entries", inner.count));
        }
        Ok(())
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Trie<V>
where
    K: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let trie = Self::new();
        for (key, value) in iter {
            trie.insert(key, value);
        }
        trie
    }
}

/// Pairs each code point of `key` with the byte offset just past it.
fn byte_units(key: &str) -> impl Iterator<Item = (char, usize)> + '_ {
    key.char_indices().map(|(i, c)| (c, i + c.len_utf8()))
}

/// Pairs each code point of `runes` with the code point offset just past it.
fn rune_units(runes: &[char]) -> impl Iterator<Item = (char, usize)> + '_ {
    runes.iter().enumerate().map(|(i, &c)| (c, i + 1))
}

fn resolve<V: Clone>(node: Option<&Node<V>>, index: usize) -> Lookup<V> {
    match node.and_then(|n| n.entry.as_ref()) {
        Some(entry) => Lookup {
            exists: true,
            value: Some(entry.value.clone()),
            index,
        },
        None => Lookup::missing(index),
    }
}

fn enumerate<V: Clone>(node: Option<&Node<V>>) -> Vec<Match<V>> {
    let mut out = Vec::new();
    if let Some(node) = node {
        node.collect_into(&mut out);
    }
    out
}
