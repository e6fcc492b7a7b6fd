// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press-origin tracking for selectable items.
//!
//! A "press" starts with a pointer down on some target and ends with the
//! matching pointer up. List items must not select when the user presses on
//! one option, drags, and releases on another.
//!
//! [`PressState`] remembers where each pointer went down and decides on
//! release whether the press completed on its origin. Each pointer is
//! tracked on its own, so a second finger going down does not change how the
//! first finger's release is classified.
//!
//! ```
//! use trellis_event_state::PointerType;
//! use trellis_event_state::press::{PressResult, PressState};
//!
//! let mut presses: PressState<&str> = PressState::new();
//!
//! presses.on_down(None, PointerType::Mouse, 0, "apple");
//! let PressResult::Press(press) = presses.on_up(None, 0, &"apple") else {
//!     panic!("released on the origin");
//! };
//! assert_eq!(press.origin, "apple");
//!
//! // Pressing one item and releasing on another is not a press.
//! presses.on_down(None, PointerType::Mouse, 0, "apple");
//! let result = presses.on_up(None, 0, &"pear");
//! assert_eq!(result, PressResult::Suppressed(Some("apple")));
//! ```

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;

use crate::PointerType;

/// Pointer identifier for tracking concurrent presses.
pub type PointerId = NonZeroU64;

/// Pointer button index, `0` being the main button.
pub type Button = u8;

const DEFAULT_POINTER: PointerId = NonZeroU64::MIN;

/// A press in progress, or one that just completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Press<K> {
    /// Target under the pointer when the press started.
    pub origin: K,
    /// Device that started the press.
    pub pointer_type: PointerType,
    /// Button that was pressed.
    pub button: Button,
}

/// Outcome of releasing a pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PressResult<K> {
    /// The press completed on its origin.
    Press(Press<K>),
    /// No press; carries the origin if one was being tracked for this pointer.
    Suppressed(Option<K>),
}

/// Tracks pointer presses per pointer id.
#[derive(Clone, Debug)]
pub struct PressState<K> {
    presses: BTreeMap<PointerId, Press<K>>,
}

impl<K: PartialEq> PressState<K> {
    /// A tracker with no active press.
    pub fn new() -> Self {
        Self {
            presses: BTreeMap::new(),
        }
    }

    /// Record a pointer down on `target`, replacing any earlier press of the
    /// same pointer.
    pub fn on_down(
        &mut self,
        pointer_id: Option<PointerId>,
        pointer_type: PointerType,
        button: Button,
        target: K,
    ) {
        self.presses.insert(
            pointer_id.unwrap_or(DEFAULT_POINTER),
            Press {
                origin: target,
                pointer_type,
                button,
            },
        );
    }

    /// Record a pointer up over `current_target` and decide whether the press completed.
    pub fn on_up(
        &mut self,
        pointer_id: Option<PointerId>,
        button: Button,
        current_target: &K,
    ) -> PressResult<K> {
        let Some(press) = self.presses.remove(&pointer_id.unwrap_or(DEFAULT_POINTER)) else {
            return PressResult::Suppressed(None);
        };
        if press.button != button || press.origin != *current_target {
            return PressResult::Suppressed(Some(press.origin));
        }
        PressResult::Press(press)
    }

    /// Abandon the press of one pointer, as on `pointercancel`.
    ///
    /// Returns whether a press was being tracked.
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) -> bool {
        self.presses
            .remove(&pointer_id.unwrap_or(DEFAULT_POINTER))
            .is_some()
    }
}

impl<K: PartialEq> Default for PressState<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(id: u64) -> Option<PointerId> {
        NonZeroU64::new(id)
    }

    #[test]
    fn release_without_press_is_suppressed() {
        let mut state: PressState<u32> = PressState::new();
        assert_eq!(state.on_up(None, 0, &7), PressResult::Suppressed(None));
    }

    #[test]
    fn button_mismatch_is_suppressed() {
        let mut state: PressState<u32> = PressState::new();
        state.on_down(None, PointerType::Mouse, 0, 7);
        assert_eq!(state.on_up(None, 2, &7), PressResult::Suppressed(Some(7)));
        assert_eq!(state.on_up(None, 0, &7), PressResult::Suppressed(None), "already consumed");
    }

    #[test]
    fn pointers_are_tracked_independently() {
        let mut state: PressState<u32> = PressState::new();
        state.on_down(pointer(1), PointerType::Touch, 0, 1);
        state.on_down(pointer(2), PointerType::Mouse, 0, 2);

        // The first pointer keeps its own device even though a mouse went down later.
        assert_eq!(
            state.on_up(pointer(1), 0, &1),
            PressResult::Press(Press {
                origin: 1,
                pointer_type: PointerType::Touch,
                button: 0,
            })
        );
        assert!(state.cancel(pointer(2)));
        assert!(!state.cancel(pointer(2)));
        assert_eq!(state.on_up(pointer(2), 0, &2), PressResult::Suppressed(None));
    }
}
