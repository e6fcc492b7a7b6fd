// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a data source into a flat, pre-ordered node list.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{Accessor, ChildrenAccessor, CollectionNode, DataItem, Key, NodeKind};

/// Options for [`build_nodes`].
///
/// The defaults read the `key`, `textValue`, and `disabled` fields and treat
/// nothing as a section.
#[derive(Debug)]
pub struct BuildOptions<T> {
    /// How to read an item key.
    pub get_key: Accessor<T, Key>,
    /// How to read an item label.
    pub get_text_value: Accessor<T, String>,
    /// How to read the disabled flag.
    pub get_disabled: Accessor<T, bool>,
    /// How to read the children of a section; `None` disables sections.
    pub get_section_children: Option<ChildrenAccessor<T>>,
    /// Index assigned to the first node.
    pub start_index: usize,
    /// Level assigned to top-level nodes.
    pub start_level: usize,
}

impl<T> Default for BuildOptions<T> {
    fn default() -> Self {
        Self {
            get_key: Accessor::field("key"),
            get_text_value: Accessor::field("textValue"),
            get_disabled: Accessor::field("disabled"),
            get_section_children: None,
            start_index: 0,
            start_level: 0,
        }
    }
}

impl<T> Clone for BuildOptions<T> {
    fn clone(&self) -> Self {
        Self {
            get_key: self.get_key.clone(),
            get_text_value: self.get_text_value.clone(),
            get_disabled: self.get_disabled.clone(),
            get_section_children: self.get_section_children.clone(),
            start_index: self.start_index,
            start_level: self.start_level,
        }
    }
}

impl<T> BuildOptions<T> {
    /// Whether `other` would build the same nodes from the same data source.
    pub fn same_identity(&self, other: &Self) -> bool {
        let sections_same = match (&self.get_section_children, &other.get_section_children) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_identity(b),
            _ => false,
        };
        sections_same
            && self.get_key.same_identity(&other.get_key)
            && self.get_text_value.same_identity(&other.get_text_value)
            && self.get_disabled.same_identity(&other.get_disabled)
            && self.start_index == other.start_index
            && self.start_level == other.start_level
    }
}

/// Build the flat node list for `data_source`.
///
/// Nodes are emitted by a single left-to-right pre-order walk. A record is a
/// section when its children accessor resolves; the section node comes first,
/// followed by its children one level deeper. Empty sections still emit their
/// header node. Primitive values are items keyed and labelled by their string
/// form.
///
/// ```rust
/// use trellis_collection::{BuildOptions, NodeKind, build_nodes};
///
/// let nodes = build_nodes(&["a", "b", "c"], &BuildOptions::default());
/// let keys: Vec<_> = nodes.iter().map(|n| n.key.as_str()).collect();
/// assert_eq!(keys, ["a", "b", "c"]);
/// assert!(nodes.iter().all(|n| n.kind == NodeKind::Item && n.level == 0));
/// assert_eq!(nodes[2].index, 2);
/// ```
pub fn build_nodes<T: DataItem + Clone>(
    data_source: &[T],
    options: &BuildOptions<T>,
) -> Vec<CollectionNode<T>> {
    let mut nodes = Vec::with_capacity(data_source.len());
    let mut index = options.start_index;
    build_into(
        data_source,
        options,
        options.start_level,
        &mut index,
        &mut nodes,
    );
    nodes
}

fn build_into<T: DataItem + Clone>(
    data_source: &[T],
    options: &BuildOptions<T>,
    level: usize,
    index: &mut usize,
    out: &mut Vec<CollectionNode<T>>,
) {
    for data in data_source {
        if let Some(key) = data.primitive() {
            out.push(CollectionNode {
                kind: NodeKind::Item,
                raw_value: data.clone(),
                text_value: String::from(key.as_str()),
                key,
                disabled: options.get_disabled.resolve(data).unwrap_or(false),
                level,
                index: *index,
                prev_key: None,
                next_key: None,
            });
            *index += 1;
            continue;
        }

        let children = options
            .get_section_children
            .as_ref()
            .and_then(|get| get.resolve(data));

        match children {
            Some(children) => {
                let key = options
                    .get_key
                    .resolve(data)
                    .filter(|k| !k.as_str().is_empty())
                    .unwrap_or_else(|| Key::from(format!("$section-{}", *index)));
                out.push(CollectionNode {
                    kind: NodeKind::Section,
                    raw_value: data.clone(),
                    key,
                    text_value: String::new(),
                    disabled: false,
                    level,
                    index: *index,
                    prev_key: None,
                    next_key: None,
                });
                *index += 1;
                build_into(children, options, level + 1, index, out);
            }
            None => {
                out.push(CollectionNode {
                    kind: NodeKind::Item,
                    raw_value: data.clone(),
                    key: options.get_key.resolve(data).unwrap_or_else(|| Key::from("")),
                    text_value: options.get_text_value.resolve(data).unwrap_or_default(),
                    disabled: options.get_disabled.resolve(data).unwrap_or(false),
                    level,
                    index: *index,
                    prev_key: None,
                    next_key: None,
                });
                *index += 1;
            }
        }
    }
}
