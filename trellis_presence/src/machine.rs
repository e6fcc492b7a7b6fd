// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table-driven finite state machine.

/// A state machine whose transitions are a static `(from, event, to)` table.
///
/// Events with no entry for the current state are ignored.
///
/// ```rust
/// use trellis_presence::StateMachine;
///
/// #[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// enum Door { Open, Closed }
/// #[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// enum Push { Open, Close }
///
/// let mut door = StateMachine::new(
///     Door::Closed,
///     &[(Door::Closed, Push::Open, Door::Open), (Door::Open, Push::Close, Door::Closed)],
/// );
/// assert!(!door.send(Push::Close));
/// assert!(door.send(Push::Open));
/// assert_eq!(door.state(), Door::Open);
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine<S: 'static, E: 'static> {
    state: S,
    transitions: &'static [(S, E, S)],
}

impl<S: Copy + PartialEq, E: Copy + PartialEq> StateMachine<S, E> {
    /// A machine starting in `initial`.
    pub fn new(initial: S, transitions: &'static [(S, E, S)]) -> Self {
        Self {
            state: initial,
            transitions,
        }
    }

    /// The current state.
    pub fn state(&self) -> S {
        self.state
    }

    /// The state `event` leads to from the current state, if any.
    pub fn next(&self, event: E) -> Option<S> {
        self.transitions
            .iter()
            .find(|(from, on, _)| *from == self.state && *on == event)
            .map(|(_, _, to)| *to)
    }

    /// Apply `event`. Returns whether the state changed.
    pub fn send(&mut self, event: E) -> bool {
        match self.next(event) {
            Some(next) if next != self.state => {
                self.state = next;
                true
            }
            _ => false,
        }
    }
}
