// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hiding everything but a modal from assistive technology.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// The document tree as seen by [`HideOutside`].
pub trait HideOutsideTree<N> {
    /// Element children of `node`, in document order.
    fn children(&self, node: &N) -> Vec<N>;

    /// Whether `node` is `container` or one of its descendants.
    fn contains(&self, container: &N, node: &N) -> bool;

    /// Whether `node` is the root of a region that must stay exposed, such as
    /// a live announcer or a toast region.
    fn is_top_layer(&self, node: &N) -> bool;

    /// Whether `node` currently has `aria-hidden="true"`.
    fn is_aria_hidden(&self, node: &N) -> bool;

    /// Set or remove `aria-hidden="true"` on `node`.
    fn set_aria_hidden(&mut self, node: &N, hidden: bool);
}

/// Nodes hidden by one [`HideOutside::hide_outside`] call.
///
/// Hand it back to [`HideOutside::restore`] when the modal closes.
#[derive(Clone, Debug)]
#[must_use = "hidden nodes stay hidden until passed to `HideOutside::restore`"]
pub struct HiddenNodes<N> {
    visible: Vec<N>,
    hidden: Vec<N>,
}

impl<N> HiddenNodes<N> {
    /// Nodes this call set `aria-hidden` on or added a reference to.
    pub fn hidden(&self) -> &[N] {
        &self.hidden
    }
}

/// Reference-counted `aria-hidden` registry.
///
/// Each modal hides every subtree outside its own elements. Overlapping
/// modals hide the same nodes more than once, so every node carries a count
/// and only loses `aria-hidden` when the last modal hiding it restores.
/// Nodes the application marked `aria-hidden` itself are left untouched.
///
/// Construct one registry per document at startup.
#[derive(Clone, Debug)]
pub struct HideOutside<N> {
    ref_counts: HashMap<N, usize>,
}

impl<N> Default for HideOutside<N> {
    fn default() -> Self {
        Self {
            ref_counts: HashMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash> HideOutside<N> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many modals currently hide `node`.
    pub fn ref_count(&self, node: &N) -> usize {
        self.ref_counts.get(node).copied().unwrap_or(0)
    }

    /// Hide every subtree under `root` that contains none of `targets` and no
    /// top-layer region.
    pub fn hide_outside<T: HideOutsideTree<N> + ?Sized>(
        &mut self,
        tree: &mut T,
        targets: &[N],
        root: &N,
    ) -> HiddenNodes<N> {
        let mut visible = targets.to_vec();
        collect_top_layers(tree, root, &mut visible);
        let mut set = HiddenNodes {
            visible,
            hidden: Vec::new(),
        };
        self.walk(tree, &mut set, root);
        tracing::debug!(hidden = set.hidden.len(), "hid content outside modal");
        set
    }

    /// Hide nodes added under `parent` after [`hide_outside`](Self::hide_outside).
    ///
    /// Additions inside a target or an already hidden subtree are ignored.
    pub fn on_children_added<T: HideOutsideTree<N> + ?Sized>(
        &mut self,
        tree: &mut T,
        set: &mut HiddenNodes<N>,
        parent: &N,
        added: &[N],
    ) {
        let covered = set
            .visible
            .iter()
            .chain(&set.hidden)
            .any(|n| tree.contains(n, parent));
        if covered {
            return;
        }
        for node in added {
            if tree.is_top_layer(node) {
                set.visible.push(node.clone());
            } else {
                self.walk(tree, set, node);
            }
        }
    }

    /// Release the references held by `set`, removing `aria-hidden` from
    /// nodes no other modal still hides.
    pub fn restore<T: HideOutsideTree<N> + ?Sized>(&mut self, tree: &mut T, set: HiddenNodes<N>) {
        for node in set.hidden {
            match self.ref_count(&node) {
                0 => {}
                1 => {
                    self.ref_counts.remove(&node);
                    tree.set_aria_hidden(&node, false);
                }
                count => {
                    self.ref_counts.insert(node, count - 1);
                }
            }
        }
    }

    fn walk<T: HideOutsideTree<N> + ?Sized>(
        &mut self,
        tree: &mut T,
        set: &mut HiddenNodes<N>,
        node: &N,
    ) {
        if set.visible.contains(node) {
            return;
        }
        if set.visible.iter().any(|v| tree.contains(node, v)) {
            for child in tree.children(node) {
                self.walk(tree, set, &child);
            }
            return;
        }
        self.hide(tree, set, node);
    }

    fn hide<T: HideOutsideTree<N> + ?Sized>(
        &mut self,
        tree: &mut T,
        set: &mut HiddenNodes<N>,
        node: &N,
    ) {
        let count = self.ref_count(node);
        if count == 0 {
            if tree.is_aria_hidden(node) {
                return;
            }
            tree.set_aria_hidden(node, true);
        }
        self.ref_counts.insert(node.clone(), count + 1);
        set.hidden.push(node.clone());
    }
}

fn collect_top_layers<N, T: HideOutsideTree<N> + ?Sized>(tree: &T, node: &N, out: &mut Vec<N>) {
    for child in tree.children(node) {
        if tree.is_top_layer(&child) {
            out.push(child);
        } else {
            collect_top_layers(tree, &child, out);
        }
    }
}
