// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collection nodes.

use alloc::string::String;

use crate::Key;

/// Kind of a collection node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A selectable, focusable entry.
    Item,
    /// A grouping header. Sections are never selectable.
    Section,
}

/// One entry of a built collection.
///
/// Nodes are produced by [`build_nodes`](crate::build_nodes) and linked into
/// traversal order by [`ListCollection`](crate::ListCollection). They are not
/// mutated after the collection is constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionNode<T> {
    /// Whether this is an item or a section header.
    pub kind: NodeKind,
    /// The data-source value this node was built from.
    pub raw_value: T,
    /// Unique key within the collection.
    pub key: Key,
    /// Plain-text label, used for type-ahead.
    pub text_value: String,
    /// Whether the node is disabled.
    pub disabled: bool,
    /// Nesting depth; items inside a section are one level deeper.
    pub level: usize,
    /// Ordinal used to compare items.
    ///
    /// After linking, items carry a contiguous ordinal among items only.
    /// Sections keep the pre-order index they were built with, which may
    /// equal an item's ordinal, so compare `index` only between items and
    /// use [`Collection::at`](crate::Collection::at) or the
    /// `prev_key`/`next_key` links for traversal position.
    pub index: usize,
    /// Key of the previous node in traversal order.
    pub prev_key: Option<Key>,
    /// Key of the next node in traversal order.
    pub next_key: Option<Key>,
}

impl<T> CollectionNode<T> {
    /// Whether this node is an item.
    pub fn is_item(&self) -> bool {
        self.kind == NodeKind::Item
    }

    /// Whether this node is a section header.
    pub fn is_section(&self) -> bool {
        self.kind == NodeKind::Section
    }
}
