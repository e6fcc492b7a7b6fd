// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The keyboard delegate interface and its list implementation.

use alloc::string::String;

use trellis_collection::{Collection, Key};

use crate::{CaseInsensitiveCollator, Collator, ItemLayout, Orientation};

/// Answers "which key should receive focus next" for keyboard navigation.
///
/// Every method has a default that returns `None`, meaning "this direction is
/// not supported here". Widgets implement only what they need: a vertical
/// list has no left/right neighbours, a tab list has no page movement.
pub trait KeyboardDelegate {
    /// Key below `key` (Arrow Down).
    fn get_key_below(&self, key: &str) -> Option<Key> {
        let _ = key;
        None
    }

    /// Key above `key` (Arrow Up).
    fn get_key_above(&self, key: &str) -> Option<Key> {
        let _ = key;
        None
    }

    /// Key to the left of `key`, before any right-to-left swap.
    fn get_key_left_of(&self, key: &str) -> Option<Key> {
        let _ = key;
        None
    }

    /// Key to the right of `key`, before any right-to-left swap.
    fn get_key_right_of(&self, key: &str) -> Option<Key> {
        let _ = key;
        None
    }

    /// First focusable key (Home).
    ///
    /// `global` is set when the platform's primary modifier is held, which
    /// two-dimensional delegates use to jump to the very first cell rather
    /// than the first of the current row.
    fn get_first_key(&self, from_key: Option<&str>, global: bool) -> Option<Key> {
        let _ = (from_key, global);
        None
    }

    /// Last focusable key (End).
    fn get_last_key(&self, from_key: Option<&str>, global: bool) -> Option<Key> {
        let _ = (from_key, global);
        None
    }

    /// Key roughly one page above `key` (Page Up).
    fn get_key_page_above(&self, key: &str) -> Option<Key> {
        let _ = key;
        None
    }

    /// Key roughly one page below `key` (Page Down).
    fn get_key_page_below(&self, key: &str) -> Option<Key> {
        let _ = key;
        None
    }

    /// First key after `from_key` whose label starts with `search`.
    ///
    /// With no `from_key` the scan starts at the first key, inclusive.
    fn get_key_for_search(&self, search: &str, from_key: Option<&str>) -> Option<Key> {
        let _ = (search, from_key);
        None
    }
}

/// Keyboard navigation over a flat or sectioned list.
///
/// Moves skip section headers and disabled items and stop at the ends of the
/// collection. Wrapping around is the caller's decision.
///
/// ```rust
/// use trellis_collection::{BuildOptions, Key, ListCollection, build_nodes};
/// use trellis_navigation::{KeyboardDelegate, ListKeyboardDelegate};
///
/// let list =
///     ListCollection::try_new(build_nodes(&["Apple", "Banana", "Cherry"], &BuildOptions::default()))
///         .unwrap();
/// let delegate = ListKeyboardDelegate::new(&list);
///
/// assert_eq!(delegate.get_key_below("Apple"), Some(Key::from("Banana")));
/// assert_eq!(delegate.get_key_below("Cherry"), None);
/// assert_eq!(delegate.get_key_for_search("ch", None), Some(Key::from("Cherry")));
/// ```
pub struct ListKeyboardDelegate<'a, C> {
    collection: &'a C,
    orientation: Orientation,
    layout: Option<&'a dyn ItemLayout>,
    collator: &'a dyn Collator,
}

impl<C> core::fmt::Debug for ListKeyboardDelegate<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListKeyboardDelegate")
            .field("orientation", &self.orientation)
            .field("has_layout", &self.layout.is_some())
            .finish_non_exhaustive()
    }
}

static DEFAULT_COLLATOR: CaseInsensitiveCollator = CaseInsensitiveCollator;

impl<'a, C: Collection> ListKeyboardDelegate<'a, C> {
    /// A vertical delegate without layout, using [`CaseInsensitiveCollator`].
    pub fn new(collection: &'a C) -> Self {
        Self {
            collection,
            orientation: Orientation::Vertical,
            layout: None,
            collator: &DEFAULT_COLLATOR,
        }
    }

    /// Set the axis items are laid out along.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Provide rendered geometry, enabling page navigation.
    pub fn with_layout(mut self, layout: &'a dyn ItemLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Replace the collator used by type-ahead.
    pub fn with_collator(mut self, collator: &'a dyn Collator) -> Self {
        self.collator = collator;
        self
    }

    /// The layout axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn is_focusable(&self, key: &str) -> bool {
        self.collection
            .get_item(key)
            .is_some_and(|node| node.is_item() && !node.disabled)
    }

    fn next_focusable(&self, key: &str) -> Option<Key> {
        let mut next = self.collection.get_key_after(key);
        while let Some(k) = next {
            if self.is_focusable(k.as_str()) {
                return Some(k.clone());
            }
            next = self.collection.get_key_after(k.as_str());
        }
        None
    }

    fn previous_focusable(&self, key: &str) -> Option<Key> {
        let mut previous = self.collection.get_key_before(key);
        while let Some(k) = previous {
            if self.is_focusable(k.as_str()) {
                return Some(k.clone());
            }
            previous = self.collection.get_key_before(k.as_str());
        }
        None
    }

    fn first_focusable(&self) -> Option<Key> {
        let first = self.collection.get_first_key()?;
        if self.is_focusable(first.as_str()) {
            return Some(first.clone());
        }
        self.next_focusable(first.as_str())
    }

    fn last_focusable(&self) -> Option<Key> {
        let last = self.collection.get_last_key()?;
        if self.is_focusable(last.as_str()) {
            return Some(last.clone());
        }
        self.previous_focusable(last.as_str())
    }

    fn label_starts_with(&self, key: &str, search: &str) -> bool {
        let Some(node) = self.collection.get_item(key) else {
            return false;
        };
        if node.text_value.is_empty() {
            return false;
        }
        let prefix: String = node.text_value.chars().take(search.chars().count()).collect();
        self.collator.compare(&prefix, search).is_eq()
    }
}

impl<C: Collection> KeyboardDelegate for ListKeyboardDelegate<'_, C> {
    fn get_key_below(&self, key: &str) -> Option<Key> {
        match self.orientation {
            Orientation::Vertical => self.next_focusable(key),
            Orientation::Horizontal => None,
        }
    }

    fn get_key_above(&self, key: &str) -> Option<Key> {
        match self.orientation {
            Orientation::Vertical => self.previous_focusable(key),
            Orientation::Horizontal => None,
        }
    }

    fn get_key_left_of(&self, key: &str) -> Option<Key> {
        match self.orientation {
            Orientation::Horizontal => self.previous_focusable(key),
            Orientation::Vertical => None,
        }
    }

    fn get_key_right_of(&self, key: &str) -> Option<Key> {
        match self.orientation {
            Orientation::Horizontal => self.next_focusable(key),
            Orientation::Vertical => None,
        }
    }

    fn get_first_key(&self, _from_key: Option<&str>, _global: bool) -> Option<Key> {
        self.first_focusable()
    }

    fn get_last_key(&self, _from_key: Option<&str>, _global: bool) -> Option<Key> {
        self.last_focusable()
    }

    /// Walks back until an item starts above one viewport before the end of
    /// `key`'s item.
    ///
    /// This is a coarse heuristic over rendered rects. It stops at the first
    /// focusable key rather than failing when fewer than a page of items
    /// precede `key`.
    fn get_key_page_above(&self, key: &str) -> Option<Key> {
        let layout = self.layout?;
        let (_, end) = self.orientation.span(layout.item_rect(key)?);
        let page_start = (end - layout.viewport_extent()).max(0.0);

        let mut current = Key::from(key);
        loop {
            let Some((start, _)) = layout
                .item_rect(current.as_str())
                .map(|r| self.orientation.span(r))
            else {
                break;
            };
            if start <= page_start {
                break;
            }
            match self.previous_focusable(current.as_str()) {
                Some(previous) => current = previous,
                None => break,
            }
        }
        Some(current)
    }

    /// Walks forward until an item starts one viewport after `key`'s item.
    ///
    /// Same heuristic as [`KeyboardDelegate::get_key_page_above`], clamped to
    /// the content extent and to the last focusable key.
    fn get_key_page_below(&self, key: &str) -> Option<Key> {
        let layout = self.layout?;
        let (start, end) = self.orientation.span(layout.item_rect(key)?);
        let page_end = (start - (end - start) + layout.viewport_extent())
            .min(layout.content_extent());

        let mut current = Key::from(key);
        loop {
            let Some((item_start, _)) = layout
                .item_rect(current.as_str())
                .map(|r| self.orientation.span(r))
            else {
                break;
            };
            if item_start >= page_end {
                break;
            }
            match self.next_focusable(current.as_str()) {
                Some(next) => current = next,
                None => break,
            }
        }
        Some(current)
    }

    fn get_key_for_search(&self, search: &str, from_key: Option<&str>) -> Option<Key> {
        if search.is_empty() {
            return None;
        }
        let mut key = match from_key {
            Some(from) => self.next_focusable(from),
            None => self.first_focusable(),
        };
        while let Some(k) = key {
            if self.label_starts_with(k.as_str(), search) {
                return Some(k);
            }
            key = self.next_focusable(k.as_str());
        }
        None
    }
}
