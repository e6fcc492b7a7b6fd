// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Focus Scope: stacked focus containment for dialogs, popovers, and menus.
//!
//! A [`FocusScope`] manages focus for one container element:
//!
//! - On mount it moves focus inside (first tabbable element, else the
//!   container) unless focus is already there or the auto-focus event is
//!   prevented.
//! - With `trap_focus`, two sentinel elements at the container's edges make
//!   Tab and Shift+Tab loop, and focus that escapes is pulled back to the
//!   last focused element inside.
//! - On unmount it restores focus to the element that had it before mount.
//!
//! Scopes nest through a shared [`FocusScopeStack`]: mounting a scope pauses
//! the one below, so only the innermost scope contains focus.
//!
//! The document is reached only through the [`FocusHost`] trait, implemented
//! by the embedding platform over its own node handle type.
//!
//! ```rust
//! use trellis_focus_scope::{AutoFocusEvent, FocusScope, FocusScopeOptions, FocusScopeStack};
//!
//! let mut stack = FocusScopeStack::new();
//! let mut scope = FocusScope::new(&mut stack, "dialog", FocusScopeOptions { trap_focus: true });
//! scope.set_on_mount_auto_focus(|event: &mut AutoFocusEvent| event.prevent_default());
//! assert!(!scope.is_mounted());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod host;
mod scope;
mod stack;

pub use host::FocusHost;
pub use scope::{AutoFocusEvent, AutoFocusHandler, FocusScope, FocusScopeOptions};
pub use stack::{FocusScopeStack, ScopeId};
