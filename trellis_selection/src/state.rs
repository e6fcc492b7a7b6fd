// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-list selection and focus state.

use alloc::boxed::Box;
use core::fmt;

use trellis_collection::Key;

use crate::Selection;

/// How many keys may be selected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// Selection is disabled; every mutator is a no-op.
    #[default]
    None,
    /// At most one key.
    Single,
    /// Any number of keys, including ranges.
    Multiple,
}

/// What a plain press does in [`SelectionMode::Multiple`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SelectionBehavior {
    /// Pressing adds or removes the key, like checkboxes.
    #[default]
    Toggle,
    /// Pressing replaces the selection, like a file manager.
    Replace,
}

/// Which child should receive focus when focus enters a composite item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusStrategy {
    /// The first child.
    First,
    /// The last child.
    Last,
}

/// Configuration of a [`SelectionState`].
#[derive(Clone, Debug, Default)]
pub struct SelectionOptions {
    /// How many keys may be selected.
    pub selection_mode: SelectionMode,
    /// What a plain press does in multiple mode.
    pub selection_behavior: SelectionBehavior,
    /// Reject mutations that would leave nothing selected.
    pub disallow_empty_selection: bool,
    /// Notify the change callback even when the new selection equals the old one.
    pub allow_duplicate_selection_events: bool,
    /// Keys selected initially.
    pub default_selected_keys: Selection,
}

/// Callback invoked with the new selection after every accepted change.
pub type SelectionChangeHandler = Box<dyn FnMut(&Selection)>;

/// Selection and focus state owned by one list-like component.
///
/// This is plain data plus change notification. Policy (what a toggle or a
/// range extension means) lives in [`SelectionManager`](crate::SelectionManager),
/// which is the only intended mutator.
pub struct SelectionState {
    selection_mode: SelectionMode,
    configured_behavior: SelectionBehavior,
    selection_behavior: SelectionBehavior,
    disallow_empty_selection: bool,
    allow_duplicate_selection_events: bool,
    is_focused: bool,
    focused_key: Option<Key>,
    child_focus_strategy: Option<FocusStrategy>,
    selected_keys: Selection,
    on_selection_change: Option<SelectionChangeHandler>,
}

impl fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionState")
            .field("selection_mode", &self.selection_mode)
            .field("selection_behavior", &self.selection_behavior)
            .field("disallow_empty_selection", &self.disallow_empty_selection)
            .field("is_focused", &self.is_focused)
            .field("focused_key", &self.focused_key)
            .field("selected_keys", &self.selected_keys)
            .finish_non_exhaustive()
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(SelectionOptions::default())
    }
}

impl SelectionState {
    /// Create state from options.
    pub fn new(options: SelectionOptions) -> Self {
        Self {
            selection_mode: options.selection_mode,
            configured_behavior: options.selection_behavior,
            selection_behavior: options.selection_behavior,
            disallow_empty_selection: options.disallow_empty_selection,
            allow_duplicate_selection_events: options.allow_duplicate_selection_events,
            is_focused: false,
            focused_key: None,
            child_focus_strategy: None,
            selected_keys: options.default_selected_keys,
            on_selection_change: None,
        }
    }

    /// Register the selection change callback, replacing any previous one.
    pub fn set_on_selection_change(&mut self, handler: impl FnMut(&Selection) + 'static) {
        self.on_selection_change = Some(Box::new(handler));
    }

    /// Current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Change the selection mode. Existing selected keys are kept.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection_mode = mode;
    }

    /// Current selection behavior.
    pub fn selection_behavior(&self) -> SelectionBehavior {
        self.selection_behavior
    }

    /// Temporarily switch selection behavior.
    ///
    /// When the list is configured for [`SelectionBehavior::Replace`] and was
    /// switched to toggle (for example by a long press on touch), it reverts
    /// to replace as soon as the selection becomes empty.
    pub fn set_selection_behavior(&mut self, behavior: SelectionBehavior) {
        self.selection_behavior = behavior;
    }

    /// Whether mutations that would empty the selection are rejected.
    pub fn disallow_empty_selection(&self) -> bool {
        self.disallow_empty_selection
    }

    /// Whether the list currently contains focus.
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Record whether the list contains focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    /// The key of the focused item.
    pub fn focused_key(&self) -> Option<&Key> {
        self.focused_key.as_ref()
    }

    /// Which child of the focused item should receive focus, if it is composite.
    pub fn child_focus_strategy(&self) -> Option<FocusStrategy> {
        self.child_focus_strategy
    }

    /// Move the focused key.
    pub fn set_focused_key(&mut self, key: Option<Key>, child_focus: Option<FocusStrategy>) {
        self.focused_key = key;
        self.child_focus_strategy = child_focus;
    }

    /// The selected keys.
    pub fn selected_keys(&self) -> &Selection {
        &self.selected_keys
    }

    /// Replace the selection and notify the change callback.
    ///
    /// Returns `false` and does nothing when the keys are unchanged, unless
    /// duplicate events are allowed.
    pub fn set_selected_keys(&mut self, keys: Selection) -> bool {
        if !self.allow_duplicate_selection_events && keys.same_keys(&self.selected_keys) {
            // Still keep the new range ends.
            self.selected_keys.anchor_key = keys.anchor_key;
            self.selected_keys.current_key = keys.current_key;
            return false;
        }
        self.selected_keys = keys;
        if self.configured_behavior == SelectionBehavior::Replace
            && self.selection_behavior == SelectionBehavior::Toggle
            && self.selected_keys.is_empty()
        {
            self.selection_behavior = SelectionBehavior::Replace;
        }
        if let Some(handler) = self.on_selection_change.as_mut() {
            handler(&self.selected_keys);
        }
        true
    }
}
