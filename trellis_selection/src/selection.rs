// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A key set with range anchors.

use alloc::vec::Vec;

use hashbrown::HashSet;
use trellis_collection::Key;

/// A set of selected keys plus the two ends of the most recent range.
///
/// `anchor_key` is where a range started (the last key toggled or replaced)
/// and `current_key` is where it currently ends. Iteration follows insertion
/// order.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    keys: Vec<Key>,
    members: HashSet<Key>,
    /// Start of the current range.
    pub anchor_key: Option<Key>,
    /// End of the current range, or the most recently selected key.
    pub current_key: Option<Key>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection of `keys` with explicit range ends.
    pub fn with_anchor(
        keys: impl IntoIterator<Item = Key>,
        anchor_key: Option<Key>,
        current_key: Option<Key>,
    ) -> Self {
        let mut selection = Self::from_iter(keys);
        selection.anchor_key = anchor_key;
        selection.current_key = current_key;
        selection
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether `key` is selected.
    pub fn contains(&self, key: &str) -> bool {
        self.members.contains(key)
    }

    /// Add `key`; returns `false` if it was already present.
    pub fn insert(&mut self, key: Key) -> bool {
        if !self.members.insert(key.clone()) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Remove `key`; returns `false` if it was not present.
    pub fn remove(&mut self, key: &str) -> bool {
        if !self.members.remove(key) {
            return false;
        }
        self.keys.retain(|k| k.as_str() != key);
        true
    }

    /// Iterate over selected keys in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Key> + '_ {
        self.keys.iter()
    }

    /// Whether both selections contain exactly the same keys.
    ///
    /// Range anchors and insertion order are ignored.
    pub fn same_keys(&self, other: &Self) -> bool {
        self.len() == other.len() && self.keys.iter().all(|k| other.contains(k.as_str()))
    }
}

impl FromIterator<Key> for Selection {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut selection = Self::new();
        for key in iter {
            selection.insert(key);
        }
        selection
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Key;
    type IntoIter = core::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
