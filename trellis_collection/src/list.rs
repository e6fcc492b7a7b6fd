// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The linked, keyed list collection.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::{BuildError, CollectionNode, Key};

/// Read-only, keyed, ordered view over collection nodes.
///
/// All lookups take `&str` so callers can pass a [`Key`] or a literal.
/// Unknown keys yield `None`; callers treat that as "the key is no longer in
/// the collection", never as an error.
pub trait Collection {
    /// Raw value type carried by each node.
    type Value;

    /// Number of item nodes (sections are not counted).
    fn size(&self) -> usize;

    /// Look up a node by key.
    fn get_item(&self, key: &str) -> Option<&CollectionNode<Self::Value>>;

    /// Key of the node following `key` in traversal order.
    fn get_key_after(&self, key: &str) -> Option<&Key>;

    /// Key of the node preceding `key` in traversal order.
    fn get_key_before(&self, key: &str) -> Option<&Key>;

    /// Key of the first node, item or section.
    fn get_first_key(&self) -> Option<&Key>;

    /// Key of the last node, item or section.
    fn get_last_key(&self) -> Option<&Key>;

    /// Node at a traversal position, counting sections.
    fn at(&self, index: usize) -> Option<&CollectionNode<Self::Value>>;

    /// All nodes in traversal order.
    fn nodes(&self) -> &[CollectionNode<Self::Value>];
}

/// A collection over a flat node list with O(1) key lookup and traversal.
///
/// Construction links every node to its neighbours and renumbers item nodes
/// with a contiguous ordinal, so that item ranges can be compared by
/// `index`. Section indices are not renumbered and are not comparable with
/// item indices.
///
/// ```rust
/// use trellis_collection::{BuildOptions, Collection, ListCollection, build_nodes};
///
/// let nodes = build_nodes(&["a", "b", "c"], &BuildOptions::default());
/// let list = ListCollection::try_new(nodes).unwrap();
///
/// assert_eq!(list.get_first_key().map(|k| k.as_str()), Some("a"));
/// assert_eq!(list.get_key_after("a").map(|k| k.as_str()), Some("b"));
/// assert_eq!(list.get_key_after("c"), None);
/// assert_eq!(list.size(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct ListCollection<T> {
    nodes: Vec<CollectionNode<T>>,
    key_map: HashMap<Key, usize>,
    item_count: usize,
}

impl<T> ListCollection<T> {
    /// Link `nodes` into a collection.
    ///
    /// Fails when two nodes share a key.
    pub fn try_new(mut nodes: Vec<CollectionNode<T>>) -> Result<Self, BuildError> {
        let mut key_map = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if key_map.insert(node.key.clone(), position).is_some() {
                return Err(BuildError::DuplicateKey {
                    key: node.key.clone(),
                });
            }
        }

        let mut item_count = 0;
        let len = nodes.len();
        for position in 0..len {
            let prev_key = position
                .checked_sub(1)
                .map(|p| nodes[p].key.clone());
            let next_key = nodes.get(position + 1).map(|n| n.key.clone());
            let node = &mut nodes[position];
            node.prev_key = prev_key;
            node.next_key = next_key;
            if node.is_item() {
                node.index = item_count;
                item_count += 1;
            }
        }

        Ok(Self {
            nodes,
            key_map,
            item_count,
        })
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            key_map: HashMap::new(),
            item_count: 0,
        }
    }

    /// Iterate over keys in traversal order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.nodes.iter().map(|n| &n.key)
    }

    /// Whether the collection has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, key: &str) -> Option<&CollectionNode<T>> {
        self.key_map.get(key).map(|&i| &self.nodes[i])
    }
}

impl<T> Default for ListCollection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Collection for ListCollection<T> {
    type Value = T;

    fn size(&self) -> usize {
        self.item_count
    }

    fn get_item(&self, key: &str) -> Option<&CollectionNode<T>> {
        self.node(key)
    }

    fn get_key_after(&self, key: &str) -> Option<&Key> {
        self.node(key).and_then(|n| n.next_key.as_ref())
    }

    fn get_key_before(&self, key: &str) -> Option<&Key> {
        self.node(key).and_then(|n| n.prev_key.as_ref())
    }

    fn get_first_key(&self) -> Option<&Key> {
        self.nodes.first().map(|n| &n.key)
    }

    fn get_last_key(&self) -> Option<&Key> {
        self.nodes.last().map(|n| &n.key)
    }

    fn at(&self, index: usize) -> Option<&CollectionNode<T>> {
        self.nodes.get(index)
    }

    fn nodes(&self) -> &[CollectionNode<T>] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildOptions, NodeKind, build_nodes};
    use alloc::string::String;

    fn list(keys: &[&'static str]) -> ListCollection<&'static str> {
        ListCollection::try_new(build_nodes(keys, &BuildOptions::default()))
            .expect("unique keys")
    }

    #[test]
    fn forward_chain_visits_every_item_once() {
        for len in 1..=6 {
            let keys = ["a", "b", "c", "d", "e", "f"];
            let collection = list(&keys[..len]);

            let mut visited = Vec::new();
            let mut key = collection.get_first_key().cloned();
            while let Some(k) = key {
                visited.push(k.clone());
                key = collection.get_key_after(k.as_str()).cloned();
            }

            assert_eq!(visited.len(), len, "every item visited exactly once");
            assert_eq!(visited.last(), collection.get_last_key());
            let last = collection.get_last_key().expect("non-empty");
            assert_eq!(collection.get_key_after(last.as_str()), None);
        }
    }

    #[test]
    fn adjacent_nodes_link_both_ways() {
        let collection = list(&["a", "b", "c"]);
        for pair in collection.nodes().windows(2) {
            assert_eq!(pair[0].next_key.as_ref(), Some(&pair[1].key));
            assert_eq!(pair[1].prev_key.as_ref(), Some(&pair[0].key));
        }
        assert_eq!(collection.get_key_before("a"), None);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let nodes = build_nodes(&["a", "b", "a"], &BuildOptions::default());
        let err = ListCollection::try_new(nodes).unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateKey {
                key: Key::from("a")
            }
        );
    }

    #[test]
    fn unknown_keys_yield_none() {
        let collection = list(&["a"]);
        assert!(collection.get_item("zzz").is_none());
        assert!(collection.get_key_after("zzz").is_none());
        assert!(collection.get_key_before("zzz").is_none());
    }

    #[test]
    fn size_counts_items_only_and_items_are_renumbered() {
        let mut nodes = build_nodes(&["a", "b"], &BuildOptions::default());
        nodes.insert(
            1,
            CollectionNode {
                kind: NodeKind::Section,
                raw_value: "group",
                key: Key::from("group"),
                text_value: String::new(),
                disabled: false,
                level: 0,
                index: 1,
                prev_key: None,
                next_key: None,
            },
        );
        let collection = ListCollection::try_new(nodes).expect("unique keys");

        assert_eq!(collection.size(), 2);
        assert_eq!(collection.get_item("a").map(|n| n.index), Some(0));
        assert_eq!(collection.get_item("b").map(|n| n.index), Some(1));
        assert_eq!(collection.at(1).map(|n| n.key.as_str()), Some("group"));
        assert_eq!(collection.at(2).map(|n| n.key.as_str()), Some("b"));
    }

    #[test]
    fn empty_collection_has_no_keys() {
        let collection: ListCollection<&str> = ListCollection::empty();
        assert!(collection.is_empty());
        assert_eq!(collection.get_first_key(), None);
        assert_eq!(collection.get_last_key(), None);
        assert_eq!(collection.size(), 0);
    }
}
