// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection policy over a collection and its selection state.

use alloc::vec::Vec;

use trellis_collection::{Collection, Key};
use trellis_event_state::PointerType;

use crate::{FocusStrategy, Selection, SelectionBehavior, SelectionMode, SelectionState};

/// Read/mutate façade over a [`Collection`] and a [`SelectionState`].
///
/// The manager holds no state of its own: it borrows both halves, so it is
/// cheap to build whenever a handler needs one. Every mutator respects the
/// state's [`SelectionMode`] and `disallow_empty_selection` policy.
///
/// Keys that are not in the collection (for example because the collection
/// was rebuilt since the key was recorded) are ignored: mutators do nothing and
/// queries answer `false` or `None`.
///
/// ```rust
/// use trellis_collection::{BuildOptions, ListCollection, build_nodes};
/// use trellis_selection::{SelectionManager, SelectionMode, SelectionOptions, SelectionState};
///
/// let collection =
///     ListCollection::try_new(build_nodes(&["a", "b", "c"], &BuildOptions::default())).unwrap();
/// let mut state = SelectionState::new(SelectionOptions {
///     selection_mode: SelectionMode::Multiple,
///     ..SelectionOptions::default()
/// });
///
/// let mut manager = SelectionManager::new(&collection, &mut state);
/// manager.replace_selection("a");
/// manager.extend_selection("c");
/// assert!(manager.is_selected("b"));
/// assert_eq!(manager.selected_keys().len(), 3);
/// ```
#[derive(Debug)]
pub struct SelectionManager<'a, C> {
    collection: &'a C,
    state: &'a mut SelectionState,
}

impl<'a, C: Collection> SelectionManager<'a, C> {
    /// Borrow a collection and its selection state.
    pub fn new(collection: &'a C, state: &'a mut SelectionState) -> Self {
        Self { collection, state }
    }

    /// The collection being selected from.
    pub fn collection(&self) -> &'a C {
        self.collection
    }

    /// The underlying state.
    pub fn state(&self) -> &SelectionState {
        self.state
    }

    /// Current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.state.selection_mode()
    }

    /// Whether mutations that would empty the selection are rejected.
    pub fn disallow_empty_selection(&self) -> bool {
        self.state.disallow_empty_selection()
    }

    /// Current selection behavior.
    pub fn selection_behavior(&self) -> SelectionBehavior {
        self.state.selection_behavior()
    }

    /// Switch selection behavior.
    pub fn set_selection_behavior(&mut self, behavior: SelectionBehavior) {
        self.state.set_selection_behavior(behavior);
    }

    /// Whether the list contains focus.
    pub fn is_focused(&self) -> bool {
        self.state.is_focused()
    }

    /// Record whether the list contains focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.state.set_focused(focused);
    }

    /// The focused key.
    pub fn focused_key(&self) -> Option<&Key> {
        self.state.focused_key()
    }

    /// Which child of a composite item receives focus.
    pub fn child_focus_strategy(&self) -> Option<FocusStrategy> {
        self.state.child_focus_strategy()
    }

    /// Move focus to `key`.
    pub fn set_focused_key(&mut self, key: Option<Key>, child_focus: Option<FocusStrategy>) {
        self.state.set_focused_key(key, child_focus);
    }

    /// The selected keys.
    pub fn selected_keys(&self) -> &Selection {
        self.state.selected_keys()
    }

    /// Whether `key` is selected. Always `false` in [`SelectionMode::None`].
    pub fn is_selected(&self, key: &str) -> bool {
        self.selection_mode() != SelectionMode::None && self.selected_keys().contains(key)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected_keys().is_empty()
    }

    /// Whether every selectable item is selected.
    pub fn is_select_all(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let selected = self.selected_keys();
        self.all_selectable_keys()
            .iter()
            .all(|k| selected.contains(k.as_str()))
    }

    /// The selected key that comes first in collection order.
    pub fn first_selected_key(&self) -> Option<Key> {
        self.extreme_selected_key(|candidate, best| candidate < best)
    }

    /// The selected key that comes last in collection order.
    pub fn last_selected_key(&self) -> Option<Key> {
        self.extreme_selected_key(|candidate, best| candidate > best)
    }

    fn extreme_selected_key(&self, better: impl Fn(usize, usize) -> bool) -> Option<Key> {
        let mut best: Option<(usize, &Key)> = None;
        for key in self.selected_keys() {
            let Some(node) = self.collection.get_item(key.as_str()) else {
                continue;
            };
            if best.is_none_or(|(index, _)| better(node.index, index)) {
                best = Some((node.index, key));
            }
        }
        best.map(|(_, key)| key.clone())
    }

    /// Whether `key` can become selected.
    pub fn can_select_item(&self, key: &str) -> bool {
        if self.selection_mode() == SelectionMode::None {
            return false;
        }
        self.collection
            .get_item(key)
            .is_some_and(|node| node.is_item() && !node.disabled)
    }

    /// Whether `key` is disabled or no longer in the collection.
    pub fn is_disabled(&self, key: &str) -> bool {
        self.collection.get_item(key).is_none_or(|node| node.disabled)
    }

    /// Every selectable key, in collection order.
    pub fn all_selectable_keys(&self) -> Vec<Key> {
        let mut keys = Vec::new();
        let mut key = self.collection.get_first_key();
        while let Some(k) = key {
            if self.can_select_item(k.as_str()) {
                keys.push(k.clone());
            }
            key = self.collection.get_key_after(k.as_str());
        }
        keys
    }

    /// Item keys between `from` and `to`, inclusive, in collection order.
    ///
    /// The result does not depend on argument order. Returns an empty list
    /// when either key is unknown.
    pub fn key_range(&self, from: &str, to: &str) -> Vec<Key> {
        let (Some(from_node), Some(to_node)) =
            (self.collection.get_item(from), self.collection.get_item(to))
        else {
            return Vec::new();
        };
        let (start, end) = if from_node.index <= to_node.index {
            (from, to)
        } else {
            (to, from)
        };
        // Sections keep their build index, so a mixed item/section pair can
        // compare out of order; walk the other way before giving up.
        let keys = self.key_range_forward(start, end);
        if keys.is_empty() && start != end {
            self.key_range_forward(end, start)
        } else {
            keys
        }
    }

    fn key_range_forward(&self, from: &str, to: &str) -> Vec<Key> {
        let mut keys = Vec::new();
        let mut key = self.collection.get_item(from).map(|node| &node.key);
        while let Some(k) = key {
            if self
                .collection
                .get_item(k.as_str())
                .is_some_and(|node| node.is_item())
            {
                keys.push(k.clone());
            }
            if k.as_str() == to {
                return keys;
            }
            key = self.collection.get_key_after(k.as_str());
        }
        Vec::new()
    }

    /// Select the contiguous range from the anchor to `to_key`.
    ///
    /// The range replaces the whole selection. The anchor is kept, so
    /// extending twice to the same key yields the same selection. In
    /// [`SelectionMode::Single`] this is [`SelectionManager::replace_selection`].
    pub fn extend_selection(&mut self, to_key: &str) {
        match self.selection_mode() {
            SelectionMode::None => {}
            SelectionMode::Single => self.replace_selection(to_key),
            SelectionMode::Multiple => {
                let Some(to) = self.collection.get_item(to_key).map(|n| n.key.clone()) else {
                    tracing::trace!(key = to_key, "extend to stale key ignored");
                    return;
                };
                let anchor = self
                    .selected_keys()
                    .anchor_key
                    .clone()
                    .filter(|a| self.collection.get_item(a.as_str()).is_some())
                    .unwrap_or_else(|| to.clone());
                let range = self
                    .key_range(anchor.as_str(), to.as_str())
                    .into_iter()
                    .filter(|k| self.can_select_item(k.as_str()));
                let selection = Selection::with_anchor(range, Some(anchor), Some(to));
                self.commit(selection);
            }
        }
    }

    /// Add `key` to the selection, or remove it if already selected.
    ///
    /// In [`SelectionMode::Single`] toggling an unselected key replaces the
    /// selection with it.
    pub fn toggle_selection(&mut self, key: &str) {
        let mode = self.selection_mode();
        if mode == SelectionMode::None {
            return;
        }
        if mode == SelectionMode::Single && !self.is_selected(key) {
            self.replace_selection(key);
            return;
        }

        let mut selection = self.selected_keys().clone();
        if selection.contains(key) {
            selection.remove(key);
        } else if self.can_select_item(key) {
            let key = Key::from(key);
            selection.insert(key.clone());
            selection.anchor_key = Some(key.clone());
            selection.current_key = Some(key);
        } else {
            tracing::trace!(key, "toggle of unselectable key ignored");
            return;
        }
        self.commit(selection);
    }

    /// Make `key` the only selected key.
    pub fn replace_selection(&mut self, key: &str) {
        if self.selection_mode() == SelectionMode::None {
            return;
        }
        if !self.can_select_item(key) {
            tracing::trace!(key, "replace with unselectable key ignored");
            return;
        }
        let key = Key::from(key);
        let selection = Selection::with_anchor([key.clone()], Some(key.clone()), Some(key));
        self.commit(selection);
    }

    /// Replace the selection with the selectable keys among `keys`.
    ///
    /// Disabled, section, and stale keys are skipped. Only the first
    /// selectable key is kept in single mode.
    pub fn set_selected_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        let mode = self.selection_mode();
        if mode == SelectionMode::None {
            return;
        }
        let mut selection = Selection::new();
        for key in keys {
            if !self.can_select_item(&key) {
                tracing::trace!(key = key.as_str(), "unselectable key skipped");
                continue;
            }
            selection.insert(key);
            if mode == SelectionMode::Single {
                break;
            }
        }
        self.commit(selection);
    }

    /// Select every selectable item. Only valid in [`SelectionMode::Multiple`].
    pub fn select_all(&mut self) {
        if self.selection_mode() != SelectionMode::Multiple {
            return;
        }
        let selection = self.all_selectable_keys().into_iter().collect();
        self.commit(selection);
    }

    /// Deselect everything, unless empty selections are disallowed.
    pub fn clear_selection(&mut self) {
        if self.disallow_empty_selection() || self.is_empty() {
            return;
        }
        self.commit(Selection::new());
    }

    /// Select everything, or clear if everything is already selected.
    pub fn toggle_select_all(&mut self) {
        if self.is_select_all() {
            self.clear_selection();
        } else {
            self.select_all();
        }
    }

    /// Apply a press on `key` according to mode and behavior.
    ///
    /// Touch presses always toggle in multiple mode, since there is no
    /// modifier key to ask for it.
    pub fn select(&mut self, key: &str, pointer_type: Option<PointerType>) {
        match self.selection_mode() {
            SelectionMode::None => {}
            SelectionMode::Single => {
                if self.is_selected(key) && !self.disallow_empty_selection() {
                    self.toggle_selection(key);
                } else {
                    self.replace_selection(key);
                }
            }
            SelectionMode::Multiple => {
                if self.selection_behavior() == SelectionBehavior::Toggle
                    || pointer_type == Some(PointerType::Touch)
                {
                    self.toggle_selection(key);
                } else {
                    self.replace_selection(key);
                }
            }
        }
    }

    /// Whether `selection` holds exactly the currently selected keys.
    pub fn is_selection_equal(&self, selection: &Selection) -> bool {
        self.selected_keys().same_keys(selection)
    }

    fn commit(&mut self, selection: Selection) {
        if selection.is_empty() && self.disallow_empty_selection() && !self.is_empty() {
            tracing::trace!("mutation rejected: empty selection is disallowed");
            return;
        }
        self.state.set_selected_keys(selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SelectionOptions;
    use alloc::string::String;
    use alloc::vec;
    use trellis_collection::{
        BuildOptions, CollectionNode, ListCollection, NodeKind, build_nodes,
    };

    fn collection(keys: &[&'static str]) -> ListCollection<&'static str> {
        ListCollection::try_new(build_nodes(keys, &BuildOptions::default())).unwrap()
    }

    fn state(mode: SelectionMode, disallow_empty: bool, initial: &[&str]) -> SelectionState {
        SelectionState::new(SelectionOptions {
            selection_mode: mode,
            disallow_empty_selection: disallow_empty,
            default_selected_keys: initial.iter().copied().map(Key::from).collect(),
            ..SelectionOptions::default()
        })
    }

    fn sorted(selection: &Selection) -> Vec<String> {
        let mut keys: Vec<String> = selection.iter().map(|k| k.as_str().into()).collect();
        keys.sort();
        keys
    }

    #[test]
    fn none_mode_ignores_every_mutator() {
        let list = collection(&["a", "b"]);
        let mut s = state(SelectionMode::None, false, &[]);
        let mut m = SelectionManager::new(&list, &mut s);
        m.toggle_selection("a");
        m.replace_selection("a");
        m.extend_selection("b");
        m.select_all();
        m.select("a", None);
        assert!(m.is_empty());
        assert!(!m.can_select_item("a"));
    }

    #[test]
    fn shift_extend_selects_contiguous_range() {
        let list = collection(&["a", "b", "c"]);
        let mut s = state(SelectionMode::Multiple, false, &[]);
        let mut m = SelectionManager::new(&list, &mut s);

        m.toggle_selection("a");
        m.extend_selection("c");
        assert_eq!(sorted(m.selected_keys()), ["a", "b", "c"]);
        assert_eq!(m.selected_keys().anchor_key.as_ref().map(Key::as_str), Some("a"));
        assert_eq!(m.selected_keys().current_key.as_ref().map(Key::as_str), Some("c"));
    }

    #[test]
    fn extend_is_idempotent_and_collapses_disjoint_selection() {
        let list = collection(&["a", "b", "c", "d", "e"]);
        let mut s = state(SelectionMode::Multiple, false, &[]);
        let mut m = SelectionManager::new(&list, &mut s);

        m.toggle_selection("e");
        m.toggle_selection("b");
        m.extend_selection("d");
        let once = sorted(m.selected_keys());
        m.extend_selection("d");
        assert_eq!(sorted(m.selected_keys()), once);
        assert_eq!(once, ["b", "c", "d"], "e was collapsed away");

        // Extending backwards past the anchor.
        m.extend_selection("a");
        assert_eq!(sorted(m.selected_keys()), ["a", "b"]);
    }

    #[test]
    fn extend_skips_disabled_items() {
        let opts = BuildOptions {
            get_disabled: trellis_collection::Accessor::from_fn(|k: &&str| Some(*k == "b")),
            ..BuildOptions::default()
        };
        let list = ListCollection::try_new(build_nodes(&["a", "b", "c"], &opts)).unwrap();
        let mut s = state(SelectionMode::Multiple, false, &[]);
        let mut m = SelectionManager::new(&list, &mut s);
        m.replace_selection("a");
        m.extend_selection("c");
        assert_eq!(sorted(m.selected_keys()), ["a", "c"]);
    }

    #[test]
    fn key_range_is_symmetric() {
        let list = collection(&["a", "b", "c", "d"]);
        let mut s = state(SelectionMode::Multiple, false, &[]);
        let m = SelectionManager::new(&list, &mut s);
        let keys = ["a", "b", "c", "d"];
        for from in keys {
            for to in keys {
                let mut forward = m.key_range(from, to);
                let mut backward = m.key_range(to, from);
                forward.sort();
                backward.sort();
                assert_eq!(forward, backward, "{from}..{to}");
            }
        }
        assert!(m.key_range("a", "missing").is_empty());
    }

    #[test]
    fn key_range_skips_sections() {
        let mut nodes = build_nodes(&["a", "b"], &BuildOptions::default());
        nodes.insert(
            1,
            CollectionNode {
                kind: NodeKind::Section,
                raw_value: "",
                key: Key::from("header"),
                text_value: String::new(),
                disabled: false,
                level: 0,
                index: 1,
                prev_key: None,
                next_key: None,
            },
        );
        let list = ListCollection::try_new(nodes).unwrap();
        let mut s = state(SelectionMode::Multiple, false, &[]);
        let m = SelectionManager::new(&list, &mut s);
        let range: Vec<_> = m.key_range("b", "a");
        assert_eq!(range, vec![Key::from("a"), Key::from("b")]);
    }

    #[test]
    fn single_mode_never_exceeds_one_key() {
        let list = collection(&["a", "b", "c"]);
        let mut s = state(SelectionMode::Single, false, &[]);
        let mut m = SelectionManager::new(&list, &mut s);
        let script: [(&str, bool); 8] = [
            ("a", true),
            ("b", false),
            ("b", true),
            ("c", true),
            ("c", true),
            ("a", false),
            ("b", true),
            ("missing", true),
        ];
        for (key, toggle) in script {
            if toggle {
                m.toggle_selection(key);
            } else {
                m.replace_selection(key);
            }
            assert!(m.selected_keys().len() <= 1);
        }
        m.set_selected_keys(["a", "b"].into_iter().map(Key::from));
        assert_eq!(sorted(m.selected_keys()), ["a"]);
        m.extend_selection("c");
        assert_eq!(sorted(m.selected_keys()), ["c"]);
    }

    #[test]
    fn disallow_empty_rejects_toggling_last_key() {
        let list = collection(&["a", "b", "c"]);
        let mut s = state(SelectionMode::Single, true, &["a"]);
        let mut m = SelectionManager::new(&list, &mut s);
        m.toggle_selection("a");
        assert_eq!(sorted(m.selected_keys()), ["a"]);
        m.clear_selection();
        assert_eq!(sorted(m.selected_keys()), ["a"]);
        // Single-mode press on the selected key keeps it.
        m.select("a", None);
        assert_eq!(sorted(m.selected_keys()), ["a"]);
    }

    #[test]
    fn disallow_empty_holds_for_every_operation_sequence() {
        let list = collection(&["a", "b", "c"]);
        let ops: [fn(&mut SelectionManager<'_, ListCollection<&'static str>>); 8] = [
            |m| m.toggle_selection("a"),
            |m| m.toggle_selection("b"),
            |m| m.replace_selection("c"),
            |m| m.extend_selection("a"),
            |m| m.clear_selection(),
            |m| m.toggle_select_all(),
            |m| m.set_selected_keys(Vec::new()),
            |m| m.replace_selection("missing"),
        ];
        for mode in [SelectionMode::Single, SelectionMode::Multiple] {
            for first in &ops {
                for second in &ops {
                    for third in &ops {
                        let mut s = state(mode, true, &["b"]);
                        let mut m = SelectionManager::new(&list, &mut s);
                        first(&mut m);
                        second(&mut m);
                        third(&mut m);
                        assert!(!m.is_empty(), "selection emptied in {mode:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn select_all_and_toggle_select_all() {
        let list = collection(&["a", "b", "c"]);
        let mut s = state(SelectionMode::Multiple, false, &[]);
        let mut m = SelectionManager::new(&list, &mut s);
        m.toggle_select_all();
        assert!(m.is_select_all());
        m.toggle_select_all();
        assert!(m.is_empty());

        let mut single = state(SelectionMode::Single, false, &[]);
        let mut m = SelectionManager::new(&list, &mut single);
        m.select_all();
        assert!(m.is_empty(), "select all is a multiple-mode operation");
    }

    #[test]
    fn first_and_last_selected_follow_collection_order() {
        let list = collection(&["a", "b", "c", "d"]);
        let mut s = state(SelectionMode::Multiple, false, &["c", "b", "stale", "d"]);
        let m = SelectionManager::new(&list, &mut s);
        assert_eq!(m.first_selected_key(), Some(Key::from("b")));
        assert_eq!(m.last_selected_key(), Some(Key::from("d")));

        let mut empty = state(SelectionMode::Multiple, false, &[]);
        let m = SelectionManager::new(&list, &mut empty);
        assert_eq!(m.first_selected_key(), None);
    }

    #[test]
    fn replace_behavior_replaces_but_touch_toggles() {
        let list = collection(&["a", "b"]);
        let mut s = SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Multiple,
            selection_behavior: SelectionBehavior::Replace,
            ..SelectionOptions::default()
        });
        let mut m = SelectionManager::new(&list, &mut s);
        m.select("a", Some(PointerType::Mouse));
        m.select("b", Some(PointerType::Mouse));
        assert_eq!(sorted(m.selected_keys()), ["b"]);
        m.select("a", Some(PointerType::Touch));
        assert_eq!(sorted(m.selected_keys()), ["a", "b"]);
    }

    #[test]
    fn stale_keys_are_ignored() {
        let list = collection(&["a"]);
        let mut s = state(SelectionMode::Multiple, false, &["a"]);
        let mut m = SelectionManager::new(&list, &mut s);
        m.toggle_selection("gone");
        m.replace_selection("gone");
        m.extend_selection("gone");
        assert_eq!(sorted(m.selected_keys()), ["a"]);
        assert!(m.is_disabled("gone"));
    }

    #[test]
    fn set_selected_keys_skips_unselectable_keys() {
        let opts = BuildOptions {
            get_disabled: trellis_collection::Accessor::from_fn(|k: &&str| Some(*k == "c")),
            ..BuildOptions::default()
        };
        let list = ListCollection::try_new(build_nodes(&["a", "b", "c"], &opts)).unwrap();

        let mut s = state(SelectionMode::Single, false, &[]);
        let mut m = SelectionManager::new(&list, &mut s);
        m.set_selected_keys(["gone", "c", "a", "b"].map(Key::from));
        assert_eq!(sorted(m.selected_keys()), ["a"]);

        let mut s = state(SelectionMode::Multiple, false, &[]);
        let mut m = SelectionManager::new(&list, &mut s);
        m.set_selected_keys(["gone", "b", "c"].map(Key::from));
        assert_eq!(sorted(m.selected_keys()), ["b"]);
    }
}
