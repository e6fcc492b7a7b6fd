// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-ahead sessions.

use alloc::string::String;

use trellis_collection::Key;
use trellis_event_state::{KeyboardEvent, Modifiers};

use crate::KeyboardDelegate;

/// Outcome of feeding one key press to a [`TypeSelect`] session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSelectResult {
    /// Key that should receive focus, if the search matched.
    pub matched: Option<Key>,
    /// The key press was a space typed mid-search; the caller must not treat
    /// it as a selection key.
    pub consumes_space: bool,
}

/// Accumulates typed characters into a search and resolves them against a delegate.
///
/// The buffer resets [`TypeSelect::DEFAULT_TIMEOUT_MS`] after the last
/// keystroke. A search made of one repeated character ("aaa") is treated as
/// that single character, so typing the same letter cycles through the items
/// starting with it.
///
/// ```rust
/// use trellis_collection::{BuildOptions, Key, ListCollection, build_nodes};
/// use trellis_event_state::{KeyCode, KeyboardEvent};
/// use trellis_navigation::{ListKeyboardDelegate, TypeSelect};
///
/// let list = ListCollection::try_new(build_nodes(
///     &["Banana", "Blueberry", "Cherry"],
///     &BuildOptions::default(),
/// ))
/// .unwrap();
/// let delegate = ListKeyboardDelegate::new(&list);
/// let mut type_select = TypeSelect::new();
///
/// let b = KeyboardEvent::new(KeyCode::Character('b'));
/// let first = type_select.on_key_down(&b, None, &delegate, 0).matched;
/// assert_eq!(first, Some(Key::from("Banana")));
/// let second = type_select.on_key_down(&b, first.as_deref(), &delegate, 100).matched;
/// assert_eq!(second, Some(Key::from("Blueberry")));
/// ```
#[derive(Clone, Debug)]
pub struct TypeSelect {
    search: String,
    last_input: Option<u64>,
    timeout_ms: u64,
}

impl Default for TypeSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeSelect {
    /// Idle time after which the search buffer is cleared.
    pub const DEFAULT_TIMEOUT_MS: u64 = 500;

    /// An empty session with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT_MS)
    }

    /// An empty session that resets after `timeout_ms` of inactivity.
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            search: String::new(),
            last_input: None,
            timeout_ms,
        }
    }

    /// The current search buffer, as of the last keystroke.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether a non-blank search is in progress at `now`.
    pub fn is_searching(&self, now: u64) -> bool {
        !self.expired(now) && !self.search.trim().is_empty()
    }

    /// Forget the search buffer.
    pub fn reset(&mut self) {
        self.search.clear();
        self.last_input = None;
    }

    fn expired(&self, now: u64) -> bool {
        self.last_input
            .is_none_or(|t| now.saturating_sub(t) >= self.timeout_ms)
    }

    /// Feed a key press.
    ///
    /// `focused_key` is where the search continues from. Keys that do not type
    /// a character, or are pressed with Ctrl or Meta, are ignored.
    pub fn on_key_down<D: KeyboardDelegate + ?Sized>(
        &mut self,
        event: &KeyboardEvent,
        focused_key: Option<&str>,
        delegate: &D,
        now: u64,
    ) -> TypeSelectResult {
        let Some(character) = event.key.typed_char() else {
            return TypeSelectResult::default();
        };
        if event.modifiers.intersects(Modifiers::CTRL | Modifiers::META) {
            return TypeSelectResult::default();
        }
        if self.expired(now) {
            self.search.clear();
        }
        self.last_input = Some(now);

        let consumes_space = character == ' ' && !self.search.trim().is_empty();
        if character == ' ' && !consumes_space {
            return TypeSelectResult::default();
        }
        self.search.push(character);

        let matched = self.find(focused_key, delegate);
        if matched.is_none() {
            tracing::trace!(search = %self.search, "type-ahead found no match");
        }
        TypeSelectResult {
            matched,
            consumes_space,
        }
    }

    fn find<D: KeyboardDelegate + ?Sized>(
        &self,
        focused_key: Option<&str>,
        delegate: &D,
    ) -> Option<Key> {
        let mut chars = self.search.chars();
        let first = chars.next()?;
        let repeated = chars.all(|c| c == first);

        let mut buf = [0_u8; 4];
        let (query, from) = if repeated {
            // Cycle: always move past the focused item.
            (&*first.encode_utf8(&mut buf), focused_key.map(Key::from))
        } else {
            // Refine: the focused item may still match the longer search.
            (
                self.search.as_str(),
                focused_key.and_then(|k| delegate.get_key_above(k)),
            )
        };

        match from {
            Some(from) => delegate
                .get_key_for_search(query, Some(from.as_str()))
                .or_else(|| delegate.get_key_for_search(query, None)),
            None => delegate.get_key_for_search(query, None),
        }
    }
}
