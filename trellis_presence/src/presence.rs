// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presence: keep an element mounted until its exit animation finishes.

use alloc::string::String;

use crate::StateMachine;

/// Mount state of an element managed by [`Presence`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PresenceState {
    /// Shown and mounted.
    Mounted,
    /// Hidden, but still mounted while the exit animation runs.
    UnmountSuspended,
    /// Removed.
    Unmounted,
}

/// Input to the presence state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PresenceEvent {
    /// The element should be shown.
    Mount,
    /// The element should go away immediately.
    Unmount,
    /// An exit animation started.
    AnimationOut,
    /// The exit animation ended or was canceled.
    AnimationEnd,
}

/// Transition table of [`Presence`].
pub const PRESENCE_TRANSITIONS: &[(PresenceState, PresenceEvent, PresenceState)] = &[
    (PresenceState::Mounted, PresenceEvent::Unmount, PresenceState::Unmounted),
    (PresenceState::Mounted, PresenceEvent::AnimationOut, PresenceState::UnmountSuspended),
    (PresenceState::UnmountSuspended, PresenceEvent::Mount, PresenceState::Mounted),
    (PresenceState::UnmountSuspended, PresenceEvent::AnimationEnd, PresenceState::Unmounted),
    (PresenceState::Unmounted, PresenceEvent::Mount, PresenceState::Mounted),
];

/// The element's computed animation styles at the time of an update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComputedAnimation<'a> {
    /// Computed `animation-name`, possibly a comma-separated list.
    pub animation_name: &'a str,
    /// Computed `display` is `none`.
    pub display_none: bool,
}

impl<'a> ComputedAnimation<'a> {
    /// A displayed element running `animation_name`.
    pub fn new(animation_name: &'a str) -> Self {
        Self {
            animation_name,
            display_none: false,
        }
    }

    /// A displayed element with no animation.
    pub fn none() -> Self {
        Self::new("none")
    }

    /// An element with `display: none`.
    pub fn hidden() -> Self {
        Self {
            animation_name: "none",
            display_none: true,
        }
    }

    fn has_no_animation(&self) -> bool {
        self.display_none || self.animation_name.trim().is_empty() || self.animation_name == "none"
    }

    fn runs(&self, name: &str) -> bool {
        self.animation_name.split(',').any(|n| n.trim() == name)
    }
}

/// Whether an element should be in the tree, given its `present` flag and
/// its exit animation.
///
/// Hiding an element that is animating out (its `animation-name` changed
/// since it was shown) suspends the unmount until `animationend` or
/// `animationcancel` for that animation. Hiding an element without an
/// animation, or with `display: none`, unmounts it at once.
///
/// ```rust
/// use trellis_presence::{ComputedAnimation, Presence};
///
/// let mut presence = Presence::new(true, Some("dialog"), &ComputedAnimation::new("fade-in"));
/// presence.set_present(false, &ComputedAnimation::new("fade-out"));
/// assert!(presence.is_present(), "still animating out");
///
/// presence.on_animation_end(&"dialog", "fade-out", &ComputedAnimation::new("fade-out"));
/// assert!(!presence.is_present());
/// ```
#[derive(Clone, Debug)]
pub struct Presence<N> {
    machine: StateMachine<PresenceState, PresenceEvent>,
    node: Option<N>,
    present: bool,
    prev_animation_name: String,
}

impl<N: PartialEq> Presence<N> {
    /// Start mounted when `present`, tracking `node` and its current `style`.
    pub fn new(present: bool, node: Option<N>, style: &ComputedAnimation<'_>) -> Self {
        let initial = if present {
            PresenceState::Mounted
        } else {
            PresenceState::Unmounted
        };
        let mut presence = Self {
            machine: StateMachine::new(initial, PRESENCE_TRANSITIONS),
            node,
            present,
            prev_animation_name: String::new(),
        };
        presence.record_animation_name(style);
        presence
    }

    /// Whether the element should be rendered: mounted, or suspended while
    /// animating out.
    pub fn is_present(&self) -> bool {
        matches!(
            self.machine.state(),
            PresenceState::Mounted | PresenceState::UnmountSuspended
        )
    }

    /// The current state.
    pub fn state(&self) -> PresenceState {
        self.machine.state()
    }

    /// The tracked element.
    pub fn node(&self) -> Option<&N> {
        self.node.as_ref()
    }

    /// Change the `present` flag. `style` is the element's computed style now.
    pub fn set_present(&mut self, present: bool, style: &ComputedAnimation<'_>) {
        if present == self.present {
            return;
        }
        let was_present = self.present;
        self.present = present;

        let event = if present {
            PresenceEvent::Mount
        } else if style.has_no_animation() {
            PresenceEvent::Unmount
        } else {
            let animating = self.prev_animation_name != style.animation_name;
            if was_present && animating {
                PresenceEvent::AnimationOut
            } else {
                PresenceEvent::Unmount
            }
        };
        self.send(event, style);
    }

    /// Swap the tracked element. Losing the element ends any exit animation.
    pub fn set_node(&mut self, node: Option<N>, style: &ComputedAnimation<'_>) {
        let lost = node.is_none();
        self.node = node;
        if lost {
            self.send(PresenceEvent::AnimationEnd, style);
        }
    }

    /// Handle `animationstart` on `target`.
    pub fn on_animation_start(&mut self, target: &N, style: &ComputedAnimation<'_>) {
        if self.node.as_ref() == Some(target) {
            self.prev_animation_name.clear();
            self.prev_animation_name.push_str(style.animation_name);
        }
    }

    /// Handle `animationend` or `animationcancel` of `animation_name` on `target`.
    ///
    /// Events from descendants or for animations other than the element's
    /// current one are ignored.
    pub fn on_animation_end(
        &mut self,
        target: &N,
        animation_name: &str,
        style: &ComputedAnimation<'_>,
    ) {
        if self.node.as_ref() == Some(target) && style.runs(animation_name) {
            self.send(PresenceEvent::AnimationEnd, style);
        }
    }

    fn send(&mut self, event: PresenceEvent, style: &ComputedAnimation<'_>) {
        let from = self.machine.state();
        if self.machine.send(event) {
            tracing::debug!(?from, to = ?self.machine.state(), ?event, "presence transition");
            self.record_animation_name(style);
        }
    }

    fn record_animation_name(&mut self, style: &ComputedAnimation<'_>) {
        self.prev_animation_name.clear();
        if self.machine.state() == PresenceState::Mounted {
            self.prev_animation_name.push_str(style.animation_name);
        } else {
            self.prev_animation_name.push_str("none");
        }
    }
}
