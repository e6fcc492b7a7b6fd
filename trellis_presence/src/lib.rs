// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Presence: mount and unmount elements without clipping exit animations.
//!
//! [`Presence`] wraps a three-state [`StateMachine`]:
//!
//! | State | Event | Next |
//! |---|---|---|
//! | mounted | unmount | unmounted |
//! | mounted | animation out | unmount suspended |
//! | unmount suspended | mount | mounted |
//! | unmount suspended | animation end | unmounted |
//! | unmounted | mount | mounted |
//!
//! The host reports the element's computed animation styles through
//! [`ComputedAnimation`] along with each update.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod machine;
mod presence;

pub use machine::StateMachine;
pub use presence::{
    ComputedAnimation, PRESENCE_TRANSITIONS, Presence, PresenceEvent, PresenceState,
};
