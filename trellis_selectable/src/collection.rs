// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collection-level keyboard, focus, and scroll handling.

use kurbo::Vec2;
use trellis_collection::{Collection, Key};
use trellis_event_state::{Direction, KeyCode, KeyboardEvent, Modifiers, Platform};
use trellis_navigation::{KeyboardDelegate, TypeSelect};
use trellis_selection::{FocusStrategy, SelectionManager, SelectionMode};

/// Which key receives focus when the collection mounts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AutoFocus {
    /// Focus the container itself, unless something is selected.
    Container,
    /// Focus the first key, unless something is selected.
    First,
    /// Focus the last key, unless something is selected.
    Last,
}

/// Options for a [`SelectableCollection`].
#[derive(Clone, Debug, Default)]
pub struct SelectableCollectionOptions {
    /// Replace the selection whenever keyboard navigation moves focus.
    pub select_on_focus: bool,
    /// Do not search item labels as the user types.
    pub disallow_type_ahead: bool,
    /// Ignore Ctrl/Cmd+A.
    pub disallow_select_all: bool,
    /// Let Tab move focus through the collection's focusable content instead
    /// of treating the collection as one tab stop.
    pub allows_tab_navigation: bool,
    /// Arrow Up on the first key moves to the last key, and vice versa.
    pub should_focus_wrap: bool,
    /// Items are rendered on demand; scrolling is delegated to the host.
    pub is_virtualized: bool,
    /// DOM focus stays on the container; the focused key is only announced.
    pub should_use_virtual_focus: bool,
    /// Focus on mount.
    pub auto_focus: Option<AutoFocus>,
    /// Apply `auto_focus` from the host's next macrotask instead of on mount.
    pub defer_auto_focus: bool,
    /// Reading direction, which decides what Left and Right mean.
    pub direction: Direction,
    /// Modifier conventions.
    pub platform: Platform,
}

/// How the host should bring a newly focused key into view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollMode {
    /// Scroll the rendered item into view within the scroll container.
    IntoView,
    /// Ask the virtualizer to scroll to the key; it may not be rendered yet.
    ToKey,
}

/// Focus moved to a new key; the host reflects it in the DOM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusChange {
    /// The newly focused key.
    pub key: Key,
    /// Move DOM focus to the item's element. `false` under virtual focus.
    pub focus_element: bool,
    /// How to scroll the item into view.
    pub scroll: ScrollMode,
}

/// Where Tab should send DOM focus before the browser's default handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TabRedirect {
    /// Shift+Tab: focus the container, so the browser leaves it backwards.
    Container,
    /// Tab: focus the last tabbable descendant, so the browser leaves it forwards.
    LastTabbable,
}

/// What the host should do after a key press.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyDownOutcome {
    /// Cancel the event's default action.
    pub prevent_default: bool,
    /// Stop the event from reaching items (a space typed into a search).
    pub stop_propagation: bool,
    /// Move DOM focus before the browser handles Tab.
    pub tab_redirect: Option<TabRedirect>,
    /// Focus moved.
    pub focus_change: Option<FocusChange>,
}

/// What the host should do after focus entered the collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FocusInOutcome {
    /// Restore this scroll offset on the scroll container.
    pub restore_scroll: Option<Vec2>,
    /// Focus the item for this key.
    pub focus_change: Option<FocusChange>,
}

/// Result of mounting a collection with auto-focus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AutoFocusOutcome {
    /// No auto-focus configured.
    None,
    /// Call [`SelectableCollection::flush_auto_focus`] from the next macrotask.
    Deferred,
    /// Focus the container element.
    FocusContainer,
    /// Focus moved to a key.
    Focused(FocusChange),
}

/// Turns collection-level input into selection manager calls.
///
/// The collection is a single tab stop by default. Arrow keys, Home/End, and
/// Page Up/Down move the focused key through a [`KeyboardDelegate`]; Shift
/// extends the selection in multiple mode; typing searches labels.
///
/// Every handler returns what the host must do to the DOM (cancel the event,
/// move focus, scroll). The selection state itself is updated in place.
///
/// ```rust
/// use trellis_collection::{BuildOptions, Key, ListCollection, build_nodes};
/// use trellis_event_state::{KeyCode, KeyboardEvent, Modifiers};
/// use trellis_navigation::ListKeyboardDelegate;
/// use trellis_selectable::{SelectableCollection, SelectableCollectionOptions};
/// use trellis_selection::{SelectionManager, SelectionMode, SelectionOptions, SelectionState};
///
/// let list = ListCollection::try_new(build_nodes(&["a", "b", "c"], &BuildOptions::default())).unwrap();
/// let mut state = SelectionState::new(SelectionOptions {
///     selection_mode: SelectionMode::Multiple,
///     ..Default::default()
/// });
/// let mut manager = SelectionManager::new(&list, &mut state);
/// let delegate = ListKeyboardDelegate::new(&list);
/// let mut collection = SelectableCollection::new(SelectableCollectionOptions::default());
///
/// manager.set_focused_key(Some(Key::from("a")), None);
/// manager.replace_selection("a");
/// let shift_down = KeyboardEvent::new(KeyCode::ArrowDown).with_modifiers(Modifiers::SHIFT);
/// let outcome = collection.on_key_down(&mut manager, &delegate, &shift_down, 0);
///
/// assert!(outcome.prevent_default);
/// assert_eq!(manager.focused_key().map(Key::as_str), Some("b"));
/// assert_eq!(manager.selected_keys().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SelectableCollection {
    options: SelectableCollectionOptions,
    type_select: TypeSelect,
    scroll_position: Vec2,
}

impl SelectableCollection {
    /// Create handlers with `options`.
    pub fn new(options: SelectableCollectionOptions) -> Self {
        Self {
            options,
            type_select: TypeSelect::new(),
            scroll_position: Vec2::ZERO,
        }
    }

    /// The options.
    pub fn options(&self) -> &SelectableCollectionOptions {
        &self.options
    }

    /// Mutable access to the options, for prop updates.
    pub fn options_mut(&mut self) -> &mut SelectableCollectionOptions {
        &mut self.options
    }

    /// `tabindex` for the container: `None` under virtual focus, `0` while no
    /// key is focused, `-1` once an item holds the tab stop.
    pub fn tab_index<C: Collection>(&self, manager: &SelectionManager<'_, C>) -> Option<i32> {
        if self.options.should_use_virtual_focus {
            None
        } else if manager.focused_key().is_none() {
            Some(0)
        } else {
            Some(-1)
        }
    }

    fn focus_change(&self, key: Key) -> FocusChange {
        FocusChange {
            key,
            focus_element: !self.options.should_use_virtual_focus,
            scroll: if self.options.is_virtualized {
                ScrollMode::ToKey
            } else {
                ScrollMode::IntoView
            },
        }
    }

    /// Apply mount-time auto-focus, or defer it.
    pub fn mount<C: Collection, D: KeyboardDelegate + ?Sized>(
        &mut self,
        manager: &mut SelectionManager<'_, C>,
        delegate: &D,
    ) -> AutoFocusOutcome {
        if self.options.auto_focus.is_none() {
            return AutoFocusOutcome::None;
        }
        if self.options.defer_auto_focus {
            return AutoFocusOutcome::Deferred;
        }
        self.flush_auto_focus(manager, delegate)
    }

    /// Perform the auto-focus configured in the options.
    ///
    /// A selected key wins over [`AutoFocus::First`] and [`AutoFocus::Last`].
    pub fn flush_auto_focus<C: Collection, D: KeyboardDelegate + ?Sized>(
        &mut self,
        manager: &mut SelectionManager<'_, C>,
        delegate: &D,
    ) -> AutoFocusOutcome {
        let Some(auto_focus) = self.options.auto_focus else {
            return AutoFocusOutcome::None;
        };
        let mut key = match auto_focus {
            AutoFocus::Container => None,
            AutoFocus::First => delegate.get_first_key(None, false),
            AutoFocus::Last => delegate.get_last_key(None, false),
        };
        if let Some(selected) = manager.selected_keys().iter().next() {
            key = Some(selected.clone());
        }

        manager.set_focused(true);
        manager.set_focused_key(key.clone(), None);
        tracing::debug!(key = ?key, "collection auto-focused");
        match key {
            Some(key) => AutoFocusOutcome::Focused(self.focus_change(key)),
            None if !self.options.should_use_virtual_focus => AutoFocusOutcome::FocusContainer,
            None => AutoFocusOutcome::None,
        }
    }

    /// Handle a key press on the container or one of its items.
    pub fn on_key_down<C: Collection, D: KeyboardDelegate + ?Sized>(
        &mut self,
        manager: &mut SelectionManager<'_, C>,
        delegate: &D,
        event: &KeyboardEvent,
        now: u64,
    ) -> KeyDownOutcome {
        let mut outcome = KeyDownOutcome::default();

        if !self.options.disallow_type_ahead {
            let focused = manager.focused_key().cloned();
            let typed = self
                .type_select
                .on_key_down(event, focused.as_deref(), delegate, now);
            if typed.consumes_space {
                outcome.prevent_default = true;
                outcome.stop_propagation = true;
            }
            if let Some(key) = typed.matched {
                manager.set_focused_key(Some(key.clone()), None);
                outcome.focus_change = Some(self.focus_change(key));
            }
            if typed.consumes_space {
                return outcome;
            }
        }

        let alt = event.modifiers.contains(Modifiers::ALT);
        if alt && event.key == KeyCode::Tab {
            outcome.prevent_default = true;
        }

        let platform = self.options.platform;
        let ctrl = platform.is_ctrl_key_pressed(event.modifiers);
        let focused = manager.focused_key().cloned();
        let focused = focused.as_deref();
        let rtl = self.options.direction == Direction::Rtl;

        match event.key {
            KeyCode::ArrowDown => {
                let mut next = match focused {
                    Some(k) => delegate.get_key_below(k),
                    None => delegate.get_first_key(None, false),
                };
                if next.is_none() && self.options.should_focus_wrap {
                    next = delegate.get_first_key(focused, false);
                }
                if let Some(next) = next {
                    outcome.prevent_default = true;
                    self.navigate_to_key(manager, event, next, None, &mut outcome);
                }
            }
            KeyCode::ArrowUp => {
                let mut next = match focused {
                    Some(k) => delegate.get_key_above(k),
                    None => delegate.get_last_key(None, false),
                };
                if next.is_none() && self.options.should_focus_wrap {
                    next = delegate.get_last_key(focused, false);
                }
                if let Some(next) = next {
                    outcome.prevent_default = true;
                    self.navigate_to_key(manager, event, next, None, &mut outcome);
                }
            }
            KeyCode::ArrowLeft | KeyCode::ArrowRight => {
                let towards_start = (event.key == KeyCode::ArrowLeft) != rtl;
                let next = focused.and_then(|k| {
                    if towards_start {
                        delegate.get_key_left_of(k)
                    } else {
                        delegate.get_key_right_of(k)
                    }
                });
                if let Some(next) = next {
                    outcome.prevent_default = true;
                    let child = if towards_start {
                        FocusStrategy::Last
                    } else {
                        FocusStrategy::First
                    };
                    self.navigate_to_key(manager, event, next, Some(child), &mut outcome);
                }
            }
            KeyCode::Home | KeyCode::End => {
                let next = if event.key == KeyCode::Home {
                    delegate.get_first_key(focused, ctrl)
                } else {
                    delegate.get_last_key(focused, ctrl)
                };
                if let Some(next) = next {
                    outcome.prevent_default = true;
                    manager.set_focused_key(Some(next.clone()), None);
                    if ctrl && event.shift() && manager.selection_mode() == SelectionMode::Multiple
                    {
                        manager.extend_selection(next.as_str());
                    } else if self.options.select_on_focus {
                        manager.replace_selection(next.as_str());
                    }
                    outcome.focus_change = Some(self.focus_change(next));
                }
            }
            KeyCode::PageDown | KeyCode::PageUp => {
                let next = focused.and_then(|k| {
                    if event.key == KeyCode::PageDown {
                        delegate.get_key_page_below(k)
                    } else {
                        delegate.get_key_page_above(k)
                    }
                });
                if let Some(next) = next {
                    outcome.prevent_default = true;
                    self.navigate_to_key(manager, event, next, None, &mut outcome);
                }
            }
            KeyCode::Character('a' | 'A')
                if ctrl
                    && manager.selection_mode() == SelectionMode::Multiple
                    && !self.options.disallow_select_all =>
            {
                outcome.prevent_default = true;
                manager.select_all();
            }
            KeyCode::Escape => {
                outcome.prevent_default = true;
                if !manager.disallow_empty_selection() {
                    manager.clear_selection();
                }
            }
            KeyCode::Tab if !self.options.allows_tab_navigation => {
                outcome.tab_redirect = Some(if event.shift() {
                    TabRedirect::Container
                } else {
                    TabRedirect::LastTabbable
                });
            }
            _ => {}
        }

        outcome
    }

    fn navigate_to_key<C: Collection>(
        &self,
        manager: &mut SelectionManager<'_, C>,
        event: &KeyboardEvent,
        key: Key,
        child_focus: Option<FocusStrategy>,
        outcome: &mut KeyDownOutcome,
    ) {
        manager.set_focused_key(Some(key.clone()), child_focus);
        if event.shift() && manager.selection_mode() == SelectionMode::Multiple {
            manager.extend_selection(key.as_str());
        } else if self.options.select_on_focus
            && !self
                .options
                .platform
                .is_non_contiguous_selection_modifier(event.modifiers)
        {
            manager.replace_selection(key.as_str());
        }
        outcome.focus_change = Some(self.focus_change(key));
    }

    /// Handle focus entering the container or one of its descendants.
    ///
    /// `target_inside` is whether the newly focused element is inside the
    /// container. `entered_from_after` is whether the element that lost focus
    /// comes after the container in document order, which means the user
    /// tabbed in backwards.
    pub fn on_focus_in<C: Collection, D: KeyboardDelegate + ?Sized>(
        &mut self,
        manager: &mut SelectionManager<'_, C>,
        delegate: &D,
        target_inside: bool,
        entered_from_after: bool,
    ) -> FocusInOutcome {
        let mut outcome = FocusInOutcome::default();
        if manager.is_focused() {
            if !target_inside {
                manager.set_focused(false);
            }
            return outcome;
        }
        if !target_inside {
            return outcome;
        }

        manager.set_focused(true);
        match manager.focused_key().cloned() {
            None => {
                let key = if entered_from_after {
                    manager
                        .last_selected_key()
                        .or_else(|| delegate.get_last_key(None, false))
                } else {
                    manager
                        .first_selected_key()
                        .or_else(|| delegate.get_first_key(None, false))
                };
                if let Some(key) = key {
                    manager.set_focused_key(Some(key.clone()), None);
                    if self.options.select_on_focus {
                        manager.replace_selection(key.as_str());
                    }
                    outcome.focus_change = Some(self.focus_change(key));
                }
            }
            Some(key) if !self.options.is_virtualized => {
                outcome.restore_scroll = Some(self.scroll_position);
                outcome.focus_change = Some(FocusChange {
                    key,
                    focus_element: true,
                    scroll: ScrollMode::IntoView,
                });
            }
            Some(_) => {}
        }
        outcome
    }

    /// Handle focus leaving an element; `related_inside` is whether the
    /// element receiving focus is inside the container.
    pub fn on_focus_out<C: Collection>(
        &mut self,
        manager: &mut SelectionManager<'_, C>,
        related_inside: bool,
    ) {
        if !related_inside {
            manager.set_focused(false);
        }
    }

    /// Record the scroll container's offset.
    pub fn on_scroll(&mut self, offset: Vec2) {
        if !self.options.is_virtualized {
            self.scroll_position = offset;
        }
    }

    /// The last recorded scroll offset.
    pub fn scroll_position(&self) -> Vec2 {
        self.scroll_position
    }

    /// Handle a mouse down; returns whether to cancel it.
    ///
    /// Pressing the scroll container itself (its scrollbar) must not move
    /// focus to the container.
    pub fn on_mouse_down(&self, target_is_scroll_container: bool) -> bool {
        target_is_scroll_container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;
    use trellis_collection::{Accessor, BuildOptions, ListCollection, build_nodes};
    use trellis_navigation::{ListKeyboardDelegate, Orientation};
    use trellis_selection::{SelectionOptions, SelectionState};

    fn list(keys: &[&'static str]) -> ListCollection<&'static str> {
        ListCollection::try_new(build_nodes(keys, &BuildOptions::default())).unwrap()
    }

    fn state(mode: SelectionMode) -> SelectionState {
        SelectionState::new(SelectionOptions {
            selection_mode: mode,
            ..SelectionOptions::default()
        })
    }

    fn key(k: KeyCode) -> KeyboardEvent {
        KeyboardEvent::new(k)
    }

    fn selected(manager: &SelectionManager<'_, ListCollection<&'static str>>) -> Vec<String> {
        let mut keys: Vec<String> = manager.selected_keys().iter().map(|k| k.as_str().into()).collect();
        keys.sort();
        keys
    }

    #[test]
    fn arrows_move_focus_and_stop_at_the_end() {
        let c = list(&["a", "b"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::default();

        let out = sc.on_key_down(&mut m, &d, &key(KeyCode::ArrowDown), 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("a"), "no focus: first key");
        assert!(out.prevent_default);
        sc.on_key_down(&mut m, &d, &key(KeyCode::ArrowDown), 0);
        let out = sc.on_key_down(&mut m, &d, &key(KeyCode::ArrowDown), 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("b"));
        assert!(!out.prevent_default, "nothing below the last key");
        assert!(m.is_empty(), "navigation alone does not select");
    }

    #[test]
    fn focus_wrap() {
        let c = list(&["a", "b"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::new(SelectableCollectionOptions {
            should_focus_wrap: true,
            ..Default::default()
        });
        m.set_focused_key(Some(Key::from("b")), None);
        sc.on_key_down(&mut m, &d, &key(KeyCode::ArrowDown), 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("a"));
        sc.on_key_down(&mut m, &d, &key(KeyCode::ArrowUp), 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("b"));
    }

    #[test]
    fn select_on_focus_replaces_unless_non_contiguous_modifier() {
        let c = list(&["a", "b", "c"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::new(SelectableCollectionOptions {
            select_on_focus: true,
            ..Default::default()
        });
        m.set_focused_key(Some(Key::from("a")), None);
        sc.on_key_down(&mut m, &d, &key(KeyCode::ArrowDown), 0);
        assert_eq!(selected(&m), ["b"]);

        let ctrl_down = key(KeyCode::ArrowDown).with_modifiers(Modifiers::CTRL);
        sc.on_key_down(&mut m, &d, &ctrl_down, 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("c"));
        assert_eq!(selected(&m), ["b"]);
    }

    #[test]
    fn shift_arrow_extends_only_in_multiple_mode() {
        let c = list(&["a", "b", "c"]);
        let d = ListKeyboardDelegate::new(&c);
        let shift_down = key(KeyCode::ArrowDown).with_modifiers(Modifiers::SHIFT);

        let mut s = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::default();
        m.set_focused_key(Some(Key::from("a")), None);
        m.replace_selection("a");
        sc.on_key_down(&mut m, &d, &shift_down, 0);
        sc.on_key_down(&mut m, &d, &shift_down, 0);
        assert_eq!(selected(&m), ["a", "b", "c"]);

        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        m.set_focused_key(Some(Key::from("a")), None);
        m.replace_selection("a");
        sc.on_key_down(&mut m, &d, &shift_down, 0);
        assert_eq!(selected(&m), ["a"]);
    }

    #[test]
    fn rtl_swaps_left_and_right() {
        let c = list(&["a", "b", "c"]);
        let d = ListKeyboardDelegate::new(&c).with_orientation(Orientation::Horizontal);
        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::new(SelectableCollectionOptions {
            direction: Direction::Rtl,
            ..Default::default()
        });
        m.set_focused_key(Some(Key::from("b")), None);
        sc.on_key_down(&mut m, &d, &key(KeyCode::ArrowLeft), 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("c"));
        assert_eq!(m.child_focus_strategy(), Some(FocusStrategy::First));
        sc.on_key_down(&mut m, &d, &key(KeyCode::ArrowRight), 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("b"));
        assert_eq!(m.child_focus_strategy(), Some(FocusStrategy::Last));
    }

    #[test]
    fn ctrl_shift_home_extends_to_first() {
        let c = list(&["a", "b", "c"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::default();
        m.set_focused_key(Some(Key::from("c")), None);
        m.replace_selection("c");

        let home = key(KeyCode::Home).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        let out = sc.on_key_down(&mut m, &d, &home, 0);
        assert!(out.prevent_default);
        assert_eq!(selected(&m), ["a", "b", "c"]);

        let end = key(KeyCode::End);
        sc.on_key_down(&mut m, &d, &end, 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("c"));
    }

    #[test]
    fn select_all_respects_platform_and_options() {
        let c = list(&["a", "b"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::new(SelectableCollectionOptions {
            platform: Platform::Apple,
            ..Default::default()
        });

        let ctrl_a = key(KeyCode::Character('a')).with_modifiers(Modifiers::CTRL);
        sc.on_key_down(&mut m, &d, &ctrl_a, 0);
        assert!(m.is_empty(), "Ctrl is not the primary modifier on Apple");

        let cmd_a = key(KeyCode::Character('a')).with_modifiers(Modifiers::META);
        let out = sc.on_key_down(&mut m, &d, &cmd_a, 0);
        assert!(out.prevent_default);
        assert!(m.is_select_all());

        sc.options_mut().disallow_select_all = true;
        sc.on_key_down(&mut m, &d, &key(KeyCode::Escape), 0);
        assert!(m.is_empty());
        sc.on_key_down(&mut m, &d, &cmd_a, 0);
        assert!(m.is_empty());
    }

    #[test]
    fn escape_keeps_selection_when_empty_is_disallowed() {
        let c = list(&["a"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Single,
            disallow_empty_selection: true,
            default_selected_keys: [Key::from("a")].into_iter().collect(),
            ..SelectionOptions::default()
        });
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::default();
        let out = sc.on_key_down(&mut m, &d, &key(KeyCode::Escape), 0);
        assert!(out.prevent_default);
        assert_eq!(selected(&m), ["a"]);
    }

    #[test]
    fn tab_redirects_unless_tab_navigation_is_allowed() {
        let c = list(&["a"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::default();

        let out = sc.on_key_down(&mut m, &d, &key(KeyCode::Tab), 0);
        assert_eq!(out.tab_redirect, Some(TabRedirect::LastTabbable));
        assert!(!out.prevent_default, "the browser still moves focus");
        let shift_tab = key(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        let out = sc.on_key_down(&mut m, &d, &shift_tab, 0);
        assert_eq!(out.tab_redirect, Some(TabRedirect::Container));

        let alt_tab = key(KeyCode::Tab).with_modifiers(Modifiers::ALT);
        assert!(sc.on_key_down(&mut m, &d, &alt_tab, 0).prevent_default);

        sc.options_mut().allows_tab_navigation = true;
        let out = sc.on_key_down(&mut m, &d, &key(KeyCode::Tab), 0);
        assert_eq!(out.tab_redirect, None);
    }

    #[test]
    fn type_ahead_moves_focus() {
        let c = list(&["apple", "banana", "blueberry"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::default();

        let out = sc.on_key_down(&mut m, &d, &key(KeyCode::Character('b')), 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("banana"));
        assert_eq!(out.focus_change.map(|f| f.key), Some(Key::from("banana")));

        sc.options_mut().disallow_type_ahead = true;
        sc.on_key_down(&mut m, &d, &key(KeyCode::Character('a')), 100);
        assert_eq!(m.focused_key().map(Key::as_str), Some("banana"));
    }

    #[test]
    fn focus_in_guesses_direction_from_related_target() {
        let c = list(&["a", "b", "c", "d"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Multiple,
            default_selected_keys: [Key::from("b"), Key::from("c")].into_iter().collect(),
            ..SelectionOptions::default()
        });
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::default();

        let out = sc.on_focus_in(&mut m, &d, true, true);
        assert!(m.is_focused());
        assert_eq!(out.focus_change.map(|f| f.key), Some(Key::from("c")));

        sc.on_focus_out(&mut m, false);
        assert!(!m.is_focused());
        m.set_focused_key(None, None);
        let out = sc.on_focus_in(&mut m, &d, true, false);
        assert_eq!(out.focus_change.map(|f| f.key), Some(Key::from("b")));
    }

    #[test]
    fn focus_in_with_empty_selection_uses_delegate_ends() {
        let opts = BuildOptions {
            get_disabled: Accessor::from_fn(|k: &&str| Some(*k == "d")),
            ..BuildOptions::default()
        };
        let c = ListCollection::try_new(build_nodes(&["a", "b", "c", "d"], &opts)).unwrap();
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::default();
        let out = sc.on_focus_in(&mut m, &d, true, true);
        assert_eq!(out.focus_change.map(|f| f.key), Some(Key::from("c")));
    }

    #[test]
    fn refocus_restores_scroll_position() {
        let c = list(&["a", "b"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::default();

        sc.on_focus_in(&mut m, &d, true, false);
        sc.on_scroll(Vec2::new(0.0, 120.0));
        sc.on_focus_out(&mut m, false);
        let out = sc.on_focus_in(&mut m, &d, true, false);
        assert_eq!(out.restore_scroll, Some(Vec2::new(0.0, 120.0)));
        assert_eq!(
            out.focus_change,
            Some(FocusChange {
                key: Key::from("a"),
                focus_element: true,
                scroll: ScrollMode::IntoView,
            })
        );
        assert_eq!(sc.tab_index(&m), Some(-1));
    }

    #[test]
    fn auto_focus_prefers_selection_and_can_be_deferred() {
        let c = list(&["a", "b", "c"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::new(SelectableCollectionOptions {
            auto_focus: Some(AutoFocus::Last),
            defer_auto_focus: true,
            is_virtualized: true,
            ..Default::default()
        });

        assert_eq!(sc.mount(&mut m, &d), AutoFocusOutcome::Deferred);
        assert_eq!(m.focused_key(), None);
        let AutoFocusOutcome::Focused(change) = sc.flush_auto_focus(&mut m, &d) else {
            panic!("expected focus on the last key");
        };
        assert_eq!(change.key.as_str(), "c");
        assert_eq!(change.scroll, ScrollMode::ToKey);

        m.replace_selection("b");
        sc.options_mut().auto_focus = Some(AutoFocus::First);
        let AutoFocusOutcome::Focused(change) = sc.flush_auto_focus(&mut m, &d) else {
            panic!("expected focus on the selected key");
        };
        assert_eq!(change.key.as_str(), "b");
    }

    #[test]
    fn container_auto_focus_and_virtual_focus() {
        let c = list(&["a"]);
        let d = ListKeyboardDelegate::new(&c);
        let mut s = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&c, &mut s);
        let mut sc = SelectableCollection::new(SelectableCollectionOptions {
            auto_focus: Some(AutoFocus::Container),
            ..Default::default()
        });
        assert_eq!(sc.mount(&mut m, &d), AutoFocusOutcome::FocusContainer);
        assert_eq!(sc.tab_index(&m), Some(0));

        sc.options_mut().should_use_virtual_focus = true;
        assert_eq!(sc.tab_index(&m), None);
        let out = sc.on_key_down(&mut m, &d, &key(KeyCode::ArrowDown), 0);
        assert_eq!(out.focus_change.map(|f| f.focus_element), Some(false));
    }
}
