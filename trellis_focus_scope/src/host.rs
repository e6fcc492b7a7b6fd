// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document operations a focus scope needs from its host.

use alloc::vec::Vec;

/// Access to the host document, generic over an opaque node handle `N`.
///
/// Containment is inclusive: a node contains itself.
pub trait FocusHost<N> {
    /// The focused node, if any.
    fn active_element(&self) -> Option<N>;

    /// Whether `node` is `container` or one of its descendants.
    fn contains(&self, container: &N, node: &N) -> bool;

    /// Tabbable descendants of `container`, in document order.
    fn tabbables(&self, container: &N) -> Vec<N>;

    /// Whether `node` can receive focus at all.
    fn is_focusable(&self, node: &N) -> bool;

    /// Whether `node` belongs to a layer that sits above every focus scope,
    /// such as a toast region. Focus is allowed to move there.
    fn is_in_top_layer(&self, node: &N) -> bool;

    /// Move focus to `node` without scrolling it into view.
    fn focus(&mut self, node: &N);

    /// The document body, which receives focus when nothing else can.
    fn body(&self) -> N;

    /// Create a visually hidden, tabbable element used as a focus-trap sentinel.
    fn create_sentinel(&mut self) -> N;

    /// Detach `node` from the document.
    fn remove(&mut self, node: &N);

    /// Insert `child` as the first child of `container`.
    fn prepend(&mut self, container: &N, child: &N);

    /// Insert `child` as the last child of `container`.
    fn append(&mut self, container: &N, child: &N);

    /// First child of `container`.
    fn first_child(&self, container: &N) -> Option<N>;

    /// Last child of `container`.
    fn last_child(&self, container: &N) -> Option<N>;
}
