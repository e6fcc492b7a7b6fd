// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document operations used by layers.

/// Value of the CSS `pointer-events` property as layers set it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEvents {
    /// The element receives pointer events.
    Auto,
    /// Pointer events pass through the element.
    None,
}

/// Access to the host document for [`LayerStack`](crate::LayerStack) and
/// [`DismissableLayer`](crate::DismissableLayer), generic over a node handle `N`.
pub trait LayerHost<N> {
    /// Whether `node` is `container` or one of its descendants.
    fn contains(&self, container: &N, node: &N) -> bool;

    /// Whether `node` is inside a host top layer, such as a toast region.
    /// Interaction there never counts as outside any layer.
    fn is_in_top_layer(&self, node: &N) -> bool;

    /// Whether `node` is still attached to the document.
    fn is_connected(&self, node: &N) -> bool;

    /// Set the inline `pointer-events` of a layer's root element.
    fn set_pointer_events(&mut self, node: &N, value: PointerEvents);

    /// The body's inline `pointer-events`, or `None` if unset.
    fn body_pointer_events(&self) -> Option<PointerEvents>;

    /// Set or clear the body's inline `pointer-events`.
    fn set_body_pointer_events(&mut self, value: Option<PointerEvents>);
}
