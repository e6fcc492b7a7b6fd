// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Selectable: the bridge from host input to selection state.
//!
//! Hosts translate their native events into plain values and call the
//! handlers here; the handlers update a
//! [`SelectionManager`](trellis_selection::SelectionManager) and report what
//! the host should do to its DOM (or equivalent) in return.
//!
//! - [`SelectableCollection`] handles the container: arrow keys, Home/End,
//!   Page Up/Down, Ctrl/Cmd+A, Escape, Tab, type-ahead, focus entering and
//!   leaving, and scroll restoration.
//! - [`SelectableItem`] handles one item: when a press selects (pointer down
//!   for listboxes, pointer up for menus, the click for touch), Enter/Space,
//!   and which item is the tab stop.
//! - [`SelectableList`] wires a [`SelectableCollection`] to a
//!   [`ListKeyboardDelegate`](trellis_navigation::ListKeyboardDelegate) and
//!   owns the press tracker shared by its items.
//!
//! Handlers never touch the DOM. Outcomes such as [`KeyDownOutcome`] and
//! [`FocusInOutcome`] describe the side effects instead:
//!
//! ```rust
//! use trellis_collection::{BuildOptions, ListCollection, build_nodes};
//! use trellis_event_state::{KeyCode, KeyboardEvent};
//! use trellis_selectable::{
//!     ScrollMode, SelectableCollectionOptions, SelectableList,
//! };
//! use trellis_selection::{SelectionManager, SelectionOptions, SelectionState};
//!
//! let list = ListCollection::try_new(build_nodes(&["a", "b"], &BuildOptions::default())).unwrap();
//! let mut state = SelectionState::new(SelectionOptions::default());
//! let mut manager = SelectionManager::new(&list, &mut state);
//! let mut handlers = SelectableList::new(SelectableCollectionOptions {
//!     is_virtualized: true,
//!     ..Default::default()
//! });
//!
//! let outcome = handlers.on_key_down(&mut manager, None, &KeyboardEvent::new(KeyCode::ArrowDown), 0);
//! let change = outcome.focus_change.unwrap();
//! assert_eq!(change.key.as_str(), "a");
//! assert_eq!(change.scroll, ScrollMode::ToKey);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collection;
mod item;
mod list;

pub use collection::{
    AutoFocus, AutoFocusOutcome, FocusChange, FocusInOutcome, KeyDownOutcome, ScrollMode,
    SelectableCollection, SelectableCollectionOptions, TabRedirect,
};
pub use item::{ItemPointerEvent, SelectableItem, SelectableItemOptions};
pub use list::SelectableList;
