// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A collection and its selection state, owned together.

use alloc::sync::Arc;

use trellis_collection::{
    BuildError, BuildOptions, Collection, CollectionMemo, DataItem, ListCollection,
};

use crate::{MissingContextError, SelectionManager, SelectionOptions, SelectionState};

/// Everything a list-like component owns: its memoized collection and its selection state.
///
/// Inputs are replaced with [`ListState::set_data_source`] and
/// [`ListState::set_build_options`]; nothing is rebuilt until the collection is
/// read again. Each read reconciles the selection state with the rebuilt
/// collection: a focused key that no longer exists is cleared.
///
/// ```rust
/// use std::sync::Arc;
/// use trellis_collection::{BuildOptions, Collection};
/// use trellis_selection::{ListState, SelectionMode, SelectionOptions};
///
/// let mut list = ListState::new(
///     Arc::from(vec!["a", "b", "c"]),
///     BuildOptions::default(),
///     SelectionOptions { selection_mode: SelectionMode::Single, ..Default::default() },
/// );
///
/// list.selection_manager().unwrap().replace_selection("b");
/// assert!(list.selection_state().selected_keys().contains("b"));
/// assert_eq!(list.collection().unwrap().size(), 3);
/// ```
#[derive(Debug)]
pub struct ListState<T> {
    memo: CollectionMemo<T>,
    collection: Arc<ListCollection<T>>,
    seen_revision: u64,
    selection: SelectionState,
}

impl<T: DataItem + Clone> ListState<T> {
    /// Create the state for a list. The collection is built on first read.
    pub fn new(
        data_source: Arc<[T]>,
        build_options: BuildOptions<T>,
        selection_options: SelectionOptions,
    ) -> Self {
        Self {
            memo: CollectionMemo::new(data_source, build_options),
            collection: Arc::new(ListCollection::empty()),
            seen_revision: 0,
            selection: SelectionState::new(selection_options),
        }
    }

    /// Replace the data source.
    pub fn set_data_source(&mut self, data_source: Arc<[T]>) {
        self.memo.set_data_source(data_source);
    }

    /// Replace the accessors used to read the data source.
    pub fn set_build_options(&mut self, options: BuildOptions<T>) {
        self.memo.set_options(options);
    }

    /// The current collection, rebuilding it if an input changed.
    pub fn collection(&mut self) -> Result<Arc<ListCollection<T>>, BuildError> {
        self.refresh()?;
        Ok(Arc::clone(&self.collection))
    }

    /// The selection state.
    pub fn selection_state(&self) -> &SelectionState {
        &self.selection
    }

    /// The selection state, for configuration changes such as the change callback.
    pub fn selection_state_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// A manager over the current collection and this list's selection state.
    pub fn selection_manager(
        &mut self,
    ) -> Result<SelectionManager<'_, ListCollection<T>>, BuildError> {
        self.refresh()?;
        Ok(SelectionManager::new(&self.collection, &mut self.selection))
    }

    /// Resolve a parent list handed down to a sub-component.
    pub fn from_context<'a>(
        context: Option<&'a mut Self>,
        consumer: &'static str,
    ) -> Result<&'a mut Self, MissingContextError> {
        crate::require_context(context, consumer, "ListState")
    }

    fn refresh(&mut self) -> Result<(), BuildError> {
        let collection = self.memo.get()?;
        if self.memo.revision() == self.seen_revision {
            return Ok(());
        }
        self.seen_revision = self.memo.revision();
        self.collection = collection;

        let stale = self
            .selection
            .focused_key()
            .is_some_and(|key| self.collection.get_item(key.as_str()).is_none());
        if stale {
            tracing::trace!("focused key left the collection; clearing focus");
            self.selection.set_focused_key(None, None);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SelectionMode;
    use alloc::vec;
    use trellis_collection::Key;

    fn list(keys: alloc::vec::Vec<&'static str>) -> ListState<&'static str> {
        ListState::new(
            Arc::from(keys),
            BuildOptions::default(),
            SelectionOptions {
                selection_mode: SelectionMode::Multiple,
                ..SelectionOptions::default()
            },
        )
    }

    #[test]
    fn focused_key_is_cleared_when_it_leaves_the_collection() {
        let mut state = list(vec!["a", "b"]);
        state
            .selection_manager()
            .unwrap()
            .set_focused_key(Some(Key::from("b")), None);

        state.set_data_source(Arc::from(vec!["a", "c"]));
        let manager = state.selection_manager().unwrap();
        assert_eq!(manager.focused_key(), None);
    }

    #[test]
    fn focused_key_survives_a_rebuild_that_keeps_it() {
        let mut state = list(vec!["a", "b"]);
        state
            .selection_manager()
            .unwrap()
            .set_focused_key(Some(Key::from("a")), None);
        state.set_data_source(Arc::from(vec!["z", "a"]));
        assert_eq!(state.collection().unwrap().size(), 2);
        assert_eq!(
            state.selection_state().focused_key().map(Key::as_str),
            Some("a")
        );
    }

    #[test]
    fn duplicate_keys_surface_as_build_error() {
        let mut state = list(vec!["a", "a"]);
        assert!(state.collection().is_err());
        assert!(state.selection_manager().is_err());
    }

    #[test]
    fn missing_parent_is_reported() {
        let err = ListState::<&str>::from_context(None, "useListboxContext").unwrap_err();
        assert_eq!(err.provider, "ListState");
        assert_eq!(err.consumer, "useListboxContext");
    }
}
