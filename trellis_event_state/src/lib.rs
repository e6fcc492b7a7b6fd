// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Event State: input vocabulary and small event state machines.
//!
//! Trellis interaction crates do not receive DOM events. Hosts translate their
//! native events into the plain values defined here:
//!
//! - [`KeyboardEvent`] with a logical [`KeyCode`] and [`Modifiers`].
//! - [`PointerType`] to tell mouse, touch, and pen apart, since selection
//!   timing and outside-click handling differ per device.
//! - [`Platform`] for modifier conventions (Cmd vs Ctrl, Option vs Ctrl).
//! - [`Direction`] for right-to-left aware arrow keys.
//!
//! The [`press`] module tracks where a press started so that releasing over
//! a different item does not select it.
//!
//! ```rust
//! use trellis_event_state::{KeyCode, KeyboardEvent, Modifiers, Platform};
//!
//! let select_all = KeyboardEvent::new(KeyCode::Character('a')).with_modifiers(Modifiers::META);
//! assert!(Platform::Apple.is_ctrl_key_pressed(select_all.modifiers));
//! assert!(!Platform::Other.is_ctrl_key_pressed(select_all.modifiers));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod input;
pub mod press;

pub use input::{Direction, KeyCode, KeyboardEvent, Modifiers, Platform, PointerType};
