// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selectable collection handlers wired to a list keyboard delegate.

use alloc::boxed::Box;
use core::fmt;

use trellis_collection::{Collection, Key};
use trellis_event_state::KeyboardEvent;
use trellis_event_state::press::PressState;
use trellis_navigation::{Collator, ItemLayout, ListKeyboardDelegate, Orientation};
use trellis_selection::SelectionManager;

use crate::{
    AutoFocusOutcome, FocusInOutcome, KeyDownOutcome, SelectableCollection,
    SelectableCollectionOptions,
};

/// A [`SelectableCollection`] driven by a [`ListKeyboardDelegate`].
///
/// This is the usual entry point for listboxes and menus: the delegate is
/// rebuilt over the manager's current collection on every event, so the
/// list never navigates a stale collection. It also owns the press tracker
/// shared by the list's items.
pub struct SelectableList {
    collection: SelectableCollection,
    orientation: Orientation,
    collator: Option<Box<dyn Collator>>,
    presses: PressState<Key>,
}

impl fmt::Debug for SelectableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectableList")
            .field("collection", &self.collection)
            .field("orientation", &self.orientation)
            .field("custom_collator", &self.collator.is_some())
            .field("presses", &self.presses)
            .finish()
    }
}

impl SelectableList {
    /// A vertical list with `options`.
    pub fn new(options: SelectableCollectionOptions) -> Self {
        Self {
            collection: SelectableCollection::new(options),
            orientation: Orientation::Vertical,
            collator: None,
            presses: PressState::new(),
        }
    }

    /// Set the layout axis.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Use a locale-aware collator for type-ahead.
    pub fn with_collator(mut self, collator: impl Collator + 'static) -> Self {
        self.collator = Some(Box::new(collator));
        self
    }

    /// The collection-level handlers.
    pub fn collection(&self) -> &SelectableCollection {
        &self.collection
    }

    /// Mutable access to the collection-level handlers.
    pub fn collection_mut(&mut self) -> &mut SelectableCollection {
        &mut self.collection
    }

    /// Press tracker to hand to [`SelectableItem`](crate::SelectableItem) handlers.
    pub fn presses_mut(&mut self) -> &mut PressState<Key> {
        &mut self.presses
    }

    fn delegate<'a, C: Collection>(
        orientation: Orientation,
        collator: Option<&'a dyn Collator>,
        collection: &'a C,
        layout: Option<&'a dyn ItemLayout>,
    ) -> ListKeyboardDelegate<'a, C> {
        let mut delegate = ListKeyboardDelegate::new(collection).with_orientation(orientation);
        if let Some(layout) = layout {
            delegate = delegate.with_layout(layout);
        }
        if let Some(collator) = collator {
            delegate = delegate.with_collator(collator);
        }
        delegate
    }

    /// See [`SelectableCollection::mount`].
    pub fn mount<C: Collection>(&mut self, manager: &mut SelectionManager<'_, C>) -> AutoFocusOutcome {
        let delegate = Self::delegate(
            self.orientation,
            self.collator.as_deref(),
            manager.collection(),
            None,
        );
        self.collection.mount(manager, &delegate)
    }

    /// See [`SelectableCollection::flush_auto_focus`].
    pub fn flush_auto_focus<C: Collection>(
        &mut self,
        manager: &mut SelectionManager<'_, C>,
    ) -> AutoFocusOutcome {
        let delegate = Self::delegate(
            self.orientation,
            self.collator.as_deref(),
            manager.collection(),
            None,
        );
        self.collection.flush_auto_focus(manager, &delegate)
    }

    /// See [`SelectableCollection::on_key_down`]. Page keys need `layout`.
    pub fn on_key_down<C: Collection>(
        &mut self,
        manager: &mut SelectionManager<'_, C>,
        layout: Option<&dyn ItemLayout>,
        event: &KeyboardEvent,
        now: u64,
    ) -> KeyDownOutcome {
        let delegate = Self::delegate(
            self.orientation,
            self.collator.as_deref(),
            manager.collection(),
            layout,
        );
        self.collection.on_key_down(manager, &delegate, event, now)
    }

    /// See [`SelectableCollection::on_focus_in`].
    pub fn on_focus_in<C: Collection>(
        &mut self,
        manager: &mut SelectionManager<'_, C>,
        target_inside: bool,
        entered_from_after: bool,
    ) -> FocusInOutcome {
        let delegate = Self::delegate(
            self.orientation,
            self.collator.as_deref(),
            manager.collection(),
            None,
        );
        self.collection
            .on_focus_in(manager, &delegate, target_inside, entered_from_after)
    }

    /// See [`SelectableCollection::on_focus_out`].
    pub fn on_focus_out<C: Collection>(
        &mut self,
        manager: &mut SelectionManager<'_, C>,
        related_inside: bool,
    ) {
        self.collection.on_focus_out(manager, related_inside);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SelectableItem, SelectableItemOptions, ItemPointerEvent};
    use core::cmp::Ordering;
    use kurbo::Rect;
    use trellis_collection::{BuildOptions, ListCollection, build_nodes};
    use trellis_event_state::{KeyCode, PointerType};
    use trellis_selection::{SelectionMode, SelectionOptions, SelectionState};

    struct Rows;

    impl ItemLayout for Rows {
        fn item_rect(&self, key: &str) -> Option<Rect> {
            let i = ["a", "b", "c", "d", "e"].iter().position(|k| *k == key)?;
            let y = i as f64 * 20.0;
            Some(Rect::new(0.0, y, 100.0, y + 20.0))
        }

        fn viewport_extent(&self) -> f64 {
            40.0
        }

        fn content_extent(&self) -> f64 {
            100.0
        }
    }

    #[test]
    fn list_pages_with_layout_and_types_ahead() {
        let c = ListCollection::try_new(build_nodes(
            &["a", "b", "c", "d", "e"],
            &BuildOptions::default(),
        ))
        .unwrap();
        let mut s = SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Single,
            ..SelectionOptions::default()
        });
        let mut m = SelectionManager::new(&c, &mut s);
        let mut list = SelectableList::new(SelectableCollectionOptions::default());

        list.on_focus_in(&mut m, true, false);
        assert_eq!(m.focused_key().map(Key::as_str), Some("a"));

        let page_down = KeyboardEvent::new(KeyCode::PageDown);
        let out = list.on_key_down(&mut m, None, &page_down, 0);
        assert!(!out.prevent_default, "no layout, no paging");
        list.on_key_down(&mut m, Some(&Rows), &page_down, 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("b"));

        list.on_key_down(&mut m, None, &KeyboardEvent::new(KeyCode::Character('d')), 10);
        assert_eq!(m.focused_key().map(Key::as_str), Some("d"));
    }

    #[test]
    fn custom_collator_and_shared_presses() {
        let c = ListCollection::try_new(build_nodes(&["Apple", "apple pie"], &BuildOptions::default()))
            .unwrap();
        let mut s = SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Single,
            ..SelectionOptions::default()
        });
        let mut m = SelectionManager::new(&c, &mut s);
        let mut list = SelectableList::new(SelectableCollectionOptions::default())
            .with_collator(|a: &str, b: &str| -> Ordering { a.cmp(b) });

        list.on_key_down(&mut m, None, &KeyboardEvent::new(KeyCode::Character('a')), 0);
        assert_eq!(m.focused_key().map(Key::as_str), Some("apple pie"), "exact case");

        let item = SelectableItem::new(SelectableItemOptions::new("Apple"));
        let press = ItemPointerEvent::new(PointerType::Mouse);
        item.on_pointer_down(&mut m, list.presses_mut(), &press);
        assert!(item.on_pointer_up(&mut m, list.presses_mut(), &press));
        assert!(m.is_selected("Apple"));
    }
}
