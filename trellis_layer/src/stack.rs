// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered stack of mounted layers.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::{LayerHost, PointerEvents};

#[derive(Clone, Debug)]
struct Layer<N> {
    node: N,
    pointer_blocking: bool,
    parent: Option<N>,
    // Every layer registered beneath this one, at any depth.
    nested: SmallVec<[N; 2]>,
}

/// Every mounted layer of a document, bottom to top in mount order.
///
/// A pointer-blocking layer (a modal) disables pointer events for everything
/// under it: layers below the top-most blocking layer get
/// `pointer-events: none`, and while any blocking layer exists so does the
/// body. Layers above the top-most blocking layer stay interactive.
///
/// Construct one stack per document at startup and pass it to layer operations.
///
/// ```rust
/// use trellis_layer::LayerStack;
///
/// let mut stack = LayerStack::new();
/// stack.add_layer("menu", false);
/// stack.add_layer("dialog", true);
/// stack.add_layer("popover", false);
///
/// assert!(stack.is_top_most_layer(&"popover"));
/// assert!(stack.is_below_pointer_blocking_layer(&"menu"));
/// assert!(!stack.is_below_pointer_blocking_layer(&"popover"));
/// ```
#[derive(Clone, Debug)]
pub struct LayerStack<N> {
    layers: Vec<Layer<N>>,
    // `Some` while the body's pointer events are disabled, holding the value to restore.
    saved_body_pointer_events: Option<Option<PointerEvents>>,
}

impl<N> Default for LayerStack<N> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            saved_body_pointer_events: None,
        }
    }
}

impl<N: Clone + PartialEq> LayerStack<N> {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layer is mounted.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer nodes, bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = &N> + '_ {
        self.layers.iter().map(|l| &l.node)
    }

    fn index_of(&self, node: &N) -> Option<usize> {
        self.layers.iter().position(|l| l.node == *node)
    }

    fn find_mut(&mut self, node: &N) -> Option<&mut Layer<N>> {
        self.layers.iter_mut().find(|l| l.node == *node)
    }

    /// Whether `node` is a mounted layer.
    pub fn contains(&self, node: &N) -> bool {
        self.index_of(node).is_some()
    }

    /// Push a layer on top.
    pub fn add_layer(&mut self, node: N, pointer_blocking: bool) {
        self.layers.push(Layer {
            node,
            pointer_blocking,
            parent: None,
            nested: SmallVec::new(),
        });
        tracing::debug!(depth = self.layers.len(), pointer_blocking, "layer added");
    }

    /// Remove a layer wherever it is in the stack. Unknown nodes are ignored.
    ///
    /// Nested registrations made through [`register_nested`](Self::register_nested)
    /// are undone as well.
    pub fn remove_layer(&mut self, node: &N) {
        let Some(index) = self.index_of(node) else {
            return;
        };
        if let Some(parent) = self.layers[index].parent.clone() {
            self.unregister_nested(&parent, node);
        }
        self.layers.remove(index);
        tracing::debug!(depth = self.layers.len(), "layer removed");
    }

    /// Whether `node` is the most recently added layer.
    pub fn is_top_most_layer(&self, node: &N) -> bool {
        self.layers.last().is_some_and(|l| l.node == *node)
    }

    /// Whether `node` is a pointer-blocking layer.
    pub fn is_pointer_blocking(&self, node: &N) -> bool {
        self.layers
            .iter()
            .any(|l| l.node == *node && l.pointer_blocking)
    }

    /// Change whether a layer blocks pointer events outside it.
    pub fn set_pointer_blocking(&mut self, node: &N, pointer_blocking: bool) {
        if let Some(layer) = self.find_mut(node) {
            layer.pointer_blocking = pointer_blocking;
        }
    }

    /// Pointer-blocking layers, bottom to top.
    pub fn pointer_blocking_layers(&self) -> impl Iterator<Item = &N> + '_ {
        self.layers
            .iter()
            .filter(|l| l.pointer_blocking)
            .map(|l| &l.node)
    }

    /// Whether any pointer-blocking layer is mounted.
    pub fn has_pointer_blocking_layer(&self) -> bool {
        self.layers.iter().any(|l| l.pointer_blocking)
    }

    fn top_most_pointer_blocking_index(&self) -> Option<usize> {
        self.layers.iter().rposition(|l| l.pointer_blocking)
    }

    /// Whether `node` sits strictly below the top-most pointer-blocking layer.
    ///
    /// A node that is not a layer counts as below whenever a blocking layer exists.
    pub fn is_below_pointer_blocking_layer(&self, node: &N) -> bool {
        match (self.index_of(node), self.top_most_pointer_blocking_index()) {
            (Some(index), Some(blocking)) => index < blocking,
            (None, Some(_)) => true,
            (_, None) => false,
        }
    }

    /// Write `pointer-events` to every layer root.
    pub fn assign_pointer_events<H: LayerHost<N> + ?Sized>(&self, host: &mut H) {
        let blocking = self.top_most_pointer_blocking_index();
        for (index, layer) in self.layers.iter().enumerate() {
            let value = if blocking.is_some_and(|b| index < b) {
                PointerEvents::None
            } else {
                PointerEvents::Auto
            };
            host.set_pointer_events(&layer.node, value);
        }
    }

    /// Disable pointer events on the body if a blocking layer exists and they
    /// are not already disabled. The body's previous inline value is saved.
    pub fn disable_body_pointer_events<H: LayerHost<N> + ?Sized>(&mut self, host: &mut H) {
        if self.has_pointer_blocking_layer() && self.saved_body_pointer_events.is_none() {
            self.saved_body_pointer_events = Some(host.body_pointer_events());
            host.set_body_pointer_events(Some(PointerEvents::None));
        }
    }

    /// Restore the body's saved `pointer-events` once no blocking layer remains.
    pub fn restore_body_pointer_events<H: LayerHost<N> + ?Sized>(&mut self, host: &mut H) {
        if self.has_pointer_blocking_layer() {
            return;
        }
        if let Some(saved) = self.saved_body_pointer_events.take() {
            host.set_body_pointer_events(saved);
        }
    }

    /// Whether body pointer events are currently disabled by this stack.
    pub fn has_disabled_body_pointer_events(&self) -> bool {
        self.saved_body_pointer_events.is_some()
    }

    /// Record `child` as nested under `parent` and every ancestor of `parent`.
    ///
    /// Interaction inside a nested layer never counts as outside its
    /// ancestors. Returns `false` if either layer is not mounted.
    pub fn register_nested(&mut self, parent: &N, child: N) -> bool {
        if !self.contains(parent) {
            tracing::trace!("nested layer registered without a mounted parent");
            return false;
        }
        let Some(layer) = self.find_mut(&child) else {
            return false;
        };
        layer.parent = Some(parent.clone());

        let mut current = Some(parent.clone());
        while let Some(node) = current {
            let Some(layer) = self.find_mut(&node) else {
                break;
            };
            if !layer.nested.contains(&child) {
                layer.nested.push(child.clone());
            }
            current = layer.parent.clone();
        }
        true
    }

    /// Undo [`register_nested`](Self::register_nested).
    pub fn unregister_nested(&mut self, parent: &N, child: &N) {
        if let Some(layer) = self.find_mut(child) {
            if layer.parent.as_ref() == Some(parent) {
                layer.parent = None;
            }
        }
        let mut current = Some(parent.clone());
        while let Some(node) = current {
            let Some(layer) = self.find_mut(&node) else {
                break;
            };
            layer.nested.retain(|n| n != child);
            current = layer.parent.clone();
        }
    }

    /// Layers nested under `node`, at any depth.
    pub fn nested_layers(&self, node: &N) -> &[N] {
        self.layers
            .iter()
            .find(|l| l.node == *node)
            .map(|l| l.nested.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Default)]
    struct Styles {
        pointer_events: Vec<(u32, PointerEvents)>,
        body: Option<PointerEvents>,
    }

    impl LayerHost<u32> for Styles {
        fn contains(&self, container: &u32, node: &u32) -> bool {
            container == node
        }

        fn is_in_top_layer(&self, _: &u32) -> bool {
            false
        }

        fn is_connected(&self, _: &u32) -> bool {
            true
        }

        fn set_pointer_events(&mut self, node: &u32, value: PointerEvents) {
            self.pointer_events.retain(|(n, _)| n != node);
            self.pointer_events.push((*node, value));
        }

        fn body_pointer_events(&self) -> Option<PointerEvents> {
            self.body
        }

        fn set_body_pointer_events(&mut self, value: Option<PointerEvents>) {
            self.body = value;
        }
    }

    impl Styles {
        fn of(&self, node: u32) -> Option<PointerEvents> {
            self.pointer_events
                .iter()
                .find(|(n, _)| *n == node)
                .map(|(_, v)| *v)
        }
    }

    const A: u32 = 1;
    const B: u32 = 2;
    const C: u32 = 3;

    #[test]
    fn nested_blocking_layers_partition_the_stack() {
        let mut stack = LayerStack::new();
        let mut host = Styles::default();
        for (node, blocking) in [(A, true), (B, false), (C, true)] {
            stack.add_layer(node, blocking);
            stack.assign_pointer_events(&mut host);
            stack.disable_body_pointer_events(&mut host);
        }

        assert_eq!(stack.pointer_blocking_layers().copied().collect::<Vec<_>>(), [A, C]);
        assert!(stack.is_below_pointer_blocking_layer(&A));
        assert!(stack.is_below_pointer_blocking_layer(&B));
        assert!(!stack.is_below_pointer_blocking_layer(&C));
        assert_eq!(host.of(A), Some(PointerEvents::None));
        assert_eq!(host.of(B), Some(PointerEvents::None));
        assert_eq!(host.of(C), Some(PointerEvents::Auto));

        stack.remove_layer(&C);
        stack.assign_pointer_events(&mut host);
        assert_eq!(host.of(A), Some(PointerEvents::Auto));
        assert_eq!(host.of(B), Some(PointerEvents::Auto));
    }

    #[test]
    fn body_pointer_events_restore_only_when_no_blocking_layer_remains() {
        let mut stack = LayerStack::new();
        let mut host = Styles {
            body: Some(PointerEvents::Auto),
            ..Styles::default()
        };
        stack.add_layer(A, true);
        stack.disable_body_pointer_events(&mut host);
        stack.add_layer(B, true);
        stack.disable_body_pointer_events(&mut host);
        assert_eq!(host.body, Some(PointerEvents::None));

        stack.remove_layer(&B);
        stack.restore_body_pointer_events(&mut host);
        assert_eq!(host.body, Some(PointerEvents::None));

        stack.remove_layer(&A);
        stack.restore_body_pointer_events(&mut host);
        assert_eq!(host.body, Some(PointerEvents::Auto), "prior inline value");
        assert!(!stack.has_disabled_body_pointer_events());
    }

    #[test]
    fn most_recent_remaining_layer_is_top_most() {
        // Every sequence of three operations over three nodes: add if absent, else remove.
        let nodes = [A, B, C];
        for a in 0..3 {
            for b in 0..3 {
                for c in 0..3 {
                    let mut stack = LayerStack::new();
                    let mut order: Vec<u32> = vec![];
                    for &i in &[a, b, c] {
                        let node = nodes[i];
                        if stack.contains(&node) {
                            stack.remove_layer(&node);
                            order.retain(|n| *n != node);
                        } else {
                            stack.add_layer(node, false);
                            order.push(node);
                        }
                    }
                    let tops: Vec<u32> = nodes
                        .iter()
                        .copied()
                        .filter(|n| stack.is_top_most_layer(n))
                        .collect();
                    assert_eq!(tops, order.last().copied().into_iter().collect::<Vec<_>>());
                }
            }
        }
    }

    #[test]
    fn nested_registration_propagates_to_ancestors() {
        let mut stack = LayerStack::new();
        stack.add_layer(A, false);
        stack.add_layer(B, false);
        stack.add_layer(C, false);
        assert!(stack.register_nested(&A, B));
        assert!(stack.register_nested(&B, C));
        assert_eq!(stack.nested_layers(&A), [B, C]);
        assert_eq!(stack.nested_layers(&B), [C]);

        stack.remove_layer(&C);
        assert_eq!(stack.nested_layers(&A), [B]);
        assert!(stack.nested_layers(&B).is_empty());
        assert!(!stack.register_nested(&C, B), "parent not mounted");
    }
}
