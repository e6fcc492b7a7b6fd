// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Selection: single, multiple, and range selection over a collection.
//!
//! A list-like component owns a [`SelectionState`]: the selection mode and
//! behavior, the selected keys as a [`Selection`], and the focused key. All
//! mutation goes through a [`SelectionManager`], a short-lived façade that
//! borrows the state together with the current
//! [`Collection`](trellis_collection::Collection) and applies policy:
//!
//! - [`SelectionMode::None`] turns every mutator into a no-op.
//! - [`SelectionMode::Single`] keeps at most one key; range extension degrades
//!   to replacement.
//! - [`SelectionMode::Multiple`] supports toggling and contiguous ranges from
//!   the selection's anchor key.
//! - `disallow_empty_selection` rejects any mutation that would leave a
//!   non-empty selection empty.
//!
//! Keys that are no longer in the collection are ignored rather than treated
//! as errors, since selection state may outlive a collection rebuild.
//!
//! [`ListState`] bundles a memoized collection with its selection state, which
//! is what most widgets want.
//!
//! ```rust
//! use trellis_collection::{BuildOptions, Key, ListCollection, build_nodes};
//! use trellis_selection::{
//!     SelectionManager, SelectionMode, SelectionOptions, SelectionState,
//! };
//!
//! let collection =
//!     ListCollection::try_new(build_nodes(&["a", "b", "c"], &BuildOptions::default())).unwrap();
//! let mut state = SelectionState::new(SelectionOptions {
//!     selection_mode: SelectionMode::Single,
//!     disallow_empty_selection: true,
//!     default_selected_keys: [Key::from("a")].into_iter().collect(),
//!     ..Default::default()
//! });
//!
//! let mut manager = SelectionManager::new(&collection, &mut state);
//! manager.toggle_selection("a");
//! assert!(manager.is_selected("a"), "the last key cannot be deselected");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod list_state;
mod manager;
mod selection;
mod state;

pub use context::{MissingContextError, require_context};
pub use list_state::ListState;
pub use manager::SelectionManager;
pub use selection::Selection;
pub use state::{
    FocusStrategy, SelectionBehavior, SelectionChangeHandler, SelectionMode, SelectionOptions,
    SelectionState,
};
