// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Navigation: keyboard movement over collections.
//!
//! A [`KeyboardDelegate`] answers directional questions ("what is below this
//! key?", "what is one page down?", "which item starts with `ch`?") without
//! touching selection. Interaction layers ask the delegate where focus should
//! go and then decide, from modifiers and options, whether selection follows.
//!
//! - [`ListKeyboardDelegate`] implements the delegate for lists, skipping
//!   section headers and disabled items. It never wraps around.
//! - Page movement needs rendered geometry, supplied through [`ItemLayout`].
//!   It is a coarse heuristic: it moves roughly one viewport of items.
//! - Type-ahead compares label prefixes with a [`Collator`]. The built-in
//!   [`CaseInsensitiveCollator`] ignores case only.
//! - [`TypeSelect`] holds a type-ahead session: the search buffer and its
//!   500 ms idle reset.
//!
//! Time is passed in explicitly as millisecond timestamps, so sessions are
//! deterministic under test.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collator;
mod delegate;
mod layout;
mod type_select;

pub use collator::{CaseInsensitiveCollator, Collator};
pub use delegate::{KeyboardDelegate, ListKeyboardDelegate};
pub use layout::{ItemLayout, Orientation};
pub use type_select::{TypeSelect, TypeSelectResult};
