// Copyright (c) 2025 Runetrie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the rune trie.
//!
//! Nodes own their children outright. Locking happens once, around the whole
//! tree, in [`super::Trie`]; nothing in this module synchronizes.

use fnv::FnvHashMap;

use super::Match;

/// The key and value stored on a terminal node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry<V> {
    /// The full key this node terminates.
    pub key: String,

    /// The payload stored under `key`.
    pub value: V,
}

/// A node in the rune trie.
///
/// Each node represents one code point along a key path. A node is terminal
/// exactly when it carries an [`Entry`].
#[derive(Debug)]
pub(crate) struct Node<V> {
    /// Map of code points to child nodes
    pub children: FnvHashMap<char, Node<V>>,

    /// Key and value if a live key ends here
    pub entry: Option<Entry<V>>,
}

impl<V> Node<V> {
    /// Creates a new empty node.
    pub fn new() -> Self {
        Self {
            children: FnvHashMap::default(),
            entry: None,
        }
    }

    /// Whether a live key ends at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.entry.is_some()
    }

    /// Follows `units` from this node.
    ///
    /// Each unit is a code point paired with the offset just past it, in
    /// whatever unit the caller counts in. Returns the node reached (or `None`
    /// if an edge is missing) and the end offset of the last terminal node
    /// passed on the way, or 0 if there was none.
    pub fn locate<I>(&self, units: I) -> (Option<&Node<V>>, usize)
    where
        I: IntoIterator<Item = (char, usize)>,
    {
        let mut node = self;
        let mut index = 0;

        for (c, end) in units {
            match node.children.get(&c) {
                Some(child) => {
                    node = child;
                    if node.is_terminal() {
                        index = end;
                    }
                }
                None => return (None, index),
            }
        }

        (Some(node), index)
    }

    /// Walks down `path`, creating missing nodes.
    pub fn descend_or_create(&mut self, path: impl Iterator<Item = char>) -> &mut Node<V> {
        path.fold(self, |node, c| node.children.entry(c).or_default())
    }

    /// Walks down `path` without creating anything.
    fn descend_mut(&mut self, path: &[char]) -> Option<&mut Node<V>> {
        let mut node = self;
        for c in path {
            node = node.children.get_mut(c)?;
        }
        Some(node)
    }

    /// Removes the entry stored under `path`.
    ///
    /// Returns `false` without touching anything unless the path exists and
    /// ends on a terminal node. A target that still has children only loses
    /// its entry. A childless target is unlinked together with the chain of
    /// single-child, non-terminal ancestors that only existed to reach it.
    pub fn remove(&mut self, path: &[char]) -> bool {
        let mut node: &Node<V> = self;

        // Depth of the deepest node that must survive the removal. The edge
        // `path[cut]` below it is the one to unlink.
        let mut cut = 0;

        for (depth, c) in path.iter().enumerate() {
            if node.is_terminal() || node.children.len() > 1 {
                cut = depth;
            }
            match node.children.get(c) {
                Some(child) => node = child,
                None => return false,
            }
        }

        if !node.is_terminal() {
            return false;
        }

        if path.is_empty() || !node.children.is_empty() {
            if let Some(target) = self.descend_mut(path) {
                target.entry = None;
            }
            return true;
        }

        if let Some(parent) = self.descend_mut(&path[..cut]) {
            parent.children.remove(&path[cut]);
        }
        true
    }

    /// Pushes a copy of every entry in this subtree onto `out`.
    ///
    /// Uses an explicit stack, so deep keys cost heap rather than call stack.
    pub fn collect_into(&self, out: &mut Vec<Match<V>>)
    where
        V: Clone,
    {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(entry) = &node.entry {
                out.push(Match {
                    word: entry.key.clone(),
                    value: entry.value.clone(),
                });
            }
            stack.extend(node.children.values());
        }
    }
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self::new()
    }
}

// Dropping a chain one level per stack frame overflows on long keys, so
// subtrees are flattened onto a heap stack first.
impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        let mut stack: Vec<Node<V>> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}
