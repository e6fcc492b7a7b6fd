// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity-keyed, pull-based memoization of collection builds.

use alloc::sync::Arc;

use crate::{BuildError, BuildOptions, DataItem, ListCollection, build_nodes};

/// Caches a [`ListCollection`] and rebuilds it only when its inputs change identity.
///
/// Inputs are the data source (compared with [`Arc::ptr_eq`]) and the build
/// options (compared with [`BuildOptions::same_identity`]). Setting an input
/// that is identical to the current one does not invalidate the cache.
///
/// Building is deferred: constructing the memo or replacing an input never
/// builds. The next [`CollectionMemo::get`] does, so a data source that is
/// replaced several times before anyone reads it is built once.
///
/// ```rust
/// use std::sync::Arc;
/// use trellis_collection::{BuildOptions, Collection, CollectionMemo};
///
/// let data: Arc<[&str]> = Arc::from(vec!["a", "b"]);
/// let mut memo = CollectionMemo::new(data.clone(), BuildOptions::default());
/// assert_eq!(memo.revision(), 0);
///
/// let first = memo.get().unwrap();
/// assert_eq!(first.size(), 2);
///
/// // Same source again: no rebuild.
/// memo.set_data_source(data);
/// let again = memo.get().unwrap();
/// assert!(Arc::ptr_eq(&first, &again));
/// assert_eq!(memo.revision(), 1);
/// ```
#[derive(Debug)]
pub struct CollectionMemo<T> {
    data_source: Arc<[T]>,
    options: BuildOptions<T>,
    cached: Option<Arc<ListCollection<T>>>,
    revision: u64,
}

impl<T: DataItem + Clone> CollectionMemo<T> {
    /// Create a memo; nothing is built until [`CollectionMemo::get`].
    pub fn new(data_source: Arc<[T]>, options: BuildOptions<T>) -> Self {
        Self {
            data_source,
            options,
            cached: None,
            revision: 0,
        }
    }

    /// Replace the data source. A no-op when `data_source` is the same allocation.
    pub fn set_data_source(&mut self, data_source: Arc<[T]>) {
        if Arc::ptr_eq(&self.data_source, &data_source) {
            return;
        }
        self.data_source = data_source;
        self.cached = None;
    }

    /// Replace the build options. A no-op when the accessors are the same.
    pub fn set_options(&mut self, options: BuildOptions<T>) {
        if self.options.same_identity(&options) {
            return;
        }
        self.options = options;
        self.cached = None;
    }

    /// Whether the next [`CollectionMemo::get`] will rebuild.
    pub fn is_stale(&self) -> bool {
        self.cached.is_none()
    }

    /// Number of builds performed so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The current data source.
    pub fn data_source(&self) -> &Arc<[T]> {
        &self.data_source
    }

    /// The current collection, building it first if an input changed.
    pub fn get(&mut self) -> Result<Arc<ListCollection<T>>, BuildError> {
        if let Some(cached) = &self.cached {
            return Ok(Arc::clone(cached));
        }
        let nodes = build_nodes(&self.data_source, &self.options);
        let collection = Arc::new(ListCollection::try_new(nodes)?);
        self.revision += 1;
        tracing::debug!(
            revision = self.revision,
            items = crate::Collection::size(&*collection),
            "rebuilt collection"
        );
        self.cached = Some(Arc::clone(&collection));
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Accessor, Collection, Key};
    use alloc::vec;

    #[test]
    fn does_not_build_until_read() {
        let memo = CollectionMemo::new(Arc::from(vec!["a"]), BuildOptions::default());
        assert!(memo.is_stale());
        assert_eq!(memo.revision(), 0);
    }

    #[test]
    fn new_source_allocation_rebuilds() {
        let mut memo = CollectionMemo::new(Arc::from(vec!["a"]), BuildOptions::default());
        memo.get().unwrap();
        memo.set_data_source(Arc::from(vec!["a", "b"]));
        assert!(memo.is_stale());
        assert_eq!(memo.get().unwrap().size(), 2);
        assert_eq!(memo.revision(), 2);
    }

    #[test]
    fn equal_options_keep_cache_but_new_closure_rebuilds() {
        let mut memo = CollectionMemo::new(Arc::from(vec!["a"]), BuildOptions::default());
        memo.get().unwrap();

        memo.set_options(BuildOptions::default());
        assert!(!memo.is_stale(), "field accessors with equal names are identical");

        memo.set_options(BuildOptions {
            get_disabled: Accessor::from_fn(|item: &&str| Some(*item == "a")),
            ..BuildOptions::default()
        });
        assert!(memo.is_stale());
        let collection = memo.get().unwrap();
        assert!(collection.get_item("a").is_some_and(|n| n.disabled));
    }

    #[test]
    fn duplicate_keys_surface_from_get() {
        let mut memo = CollectionMemo::new(Arc::from(vec!["a", "a"]), BuildOptions::default());
        assert_eq!(
            memo.get().unwrap_err(),
            BuildError::DuplicateKey { key: Key::from("a") }
        );
        assert!(memo.is_stale());
    }
}
