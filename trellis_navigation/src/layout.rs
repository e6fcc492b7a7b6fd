// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendered geometry consulted by page navigation.

use kurbo::Rect;

/// Axis along which a list's items are laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Items stack top to bottom; Up/Down arrows move.
    #[default]
    Vertical,
    /// Items flow start to end; Left/Right arrows move.
    Horizontal,
}

impl Orientation {
    /// Start and end of `rect` along this axis.
    pub fn span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.y0, rect.y1),
            Self::Horizontal => (rect.x0, rect.x1),
        }
    }
}

/// Geometry of rendered items, in the scroll container's content coordinates.
///
/// Only page navigation needs this; without a layout, Page Up and Page Down
/// are not handled.
pub trait ItemLayout {
    /// Bounds of the rendered item for `key`, or `None` if it is not rendered.
    fn item_rect(&self, key: &str) -> Option<Rect>;

    /// Size of the scroll container's visible area along the list axis.
    fn viewport_extent(&self) -> f64;

    /// Size of the scroll container's content along the list axis.
    fn content_extent(&self) -> f64;
}
