// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Layer: overlay layering for dialogs, popovers, and menus.
//!
//! - [`LayerStack`]: every mounted layer of a document in mount order, with
//!   pointer-blocking (modal) layers disabling pointer events beneath them.
//! - [`DismissableLayer`]: closes a layer on an outside pointer-down, on focus
//!   moving outside, or on Escape, with callbacks through [`DismissHandler`]
//!   that can keep it open.
//! - [`PointerGraceTracker`]: the triangle-ish polygon that keeps a submenu
//!   open while the pointer moves diagonally toward it.
//! - [`HideOutside`]: reference-counted `aria-hidden` for everything outside
//!   a modal.
//!
//! The document is reached through the [`LayerHost`] and [`HideOutsideTree`]
//! traits, implemented by the host over its own node handle type.
//!
//! ```rust
//! use trellis_event_state::{KeyCode, KeyboardEvent};
//! use trellis_layer::{DismissableLayer, DismissableLayerOptions, LayerHost, LayerStack, PointerEvents};
//!
//! struct Page;
//!
//! impl LayerHost<&'static str> for Page {
//!     fn contains(&self, container: &&'static str, node: &&'static str) -> bool {
//!         container == node
//!     }
//!     fn is_in_top_layer(&self, _: &&'static str) -> bool {
//!         false
//!     }
//!     fn is_connected(&self, _: &&'static str) -> bool {
//!         true
//!     }
//!     fn set_pointer_events(&mut self, _: &&'static str, _: PointerEvents) {}
//!     fn body_pointer_events(&self) -> Option<PointerEvents> {
//!         None
//!     }
//!     fn set_body_pointer_events(&mut self, _: Option<PointerEvents>) {}
//! }
//!
//! let mut stack = LayerStack::new();
//! let mut page = Page;
//! let mut popover = DismissableLayer::new("popover", DismissableLayerOptions::default());
//! popover.mount(&mut stack, &mut page);
//!
//! let mut open = true;
//! let escape = KeyboardEvent::new(KeyCode::Escape);
//! assert!(popover.on_key_down(&stack, &mut || open = false, &escape));
//! assert!(!open);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dismissable;
mod grace;
mod hide_outside;
mod host;
mod stack;

pub use dismissable::{
    DismissHandler, DismissableLayer, DismissableLayerOptions, EscapeKeyDownEvent,
    InteractOutsideEvent, LayerPointerDown, OutsideInteraction,
};
pub use grace::{GRACE_BUFFER, PointerGraceTracker, Polygon, Side, grace_area, is_point_in_polygon};
pub use hide_outside::{HiddenNodes, HideOutside, HideOutsideTree};
pub use host::{LayerHost, PointerEvents};
pub use stack::LayerStack;
