// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Collection: the keyed collection model behind list-like widgets.
//!
//! Listboxes, selects, comboboxes, menus, tabs, accordions, and radio groups
//! all present an ordered set of options that can be focused and selected.
//! This crate turns application data into that ordered set:
//!
//! - [`build_nodes`] walks a data source once, in pre-order, and produces a
//!   flat list of [`CollectionNode`]s. Each node is an item or a section
//!   header and carries a [`Key`], a text label, a disabled flag, a nesting
//!   level, and an index.
//! - [`ListCollection`] links those nodes into traversal order and answers
//!   key → node, next key, previous key, first key, and last key in O(1).
//!   The [`Collection`] trait is the read-only interface other Trellis crates
//!   program against.
//! - [`CollectionMemo`] caches a built collection and rebuilds it lazily when
//!   the data source or the accessors change identity.
//!
//! ## Reading user data
//!
//! How the builder reads keys and labels is configured by [`BuildOptions`]
//! with one [`Accessor`] per property: either a field name resolved through
//! [`DataItem::field`], or a closure. Strings and integers are items on their
//! own, keyed and labelled by their string form.
//!
//! ```rust
//! use trellis_collection::{
//!     Accessor, BuildOptions, Collection, DataItem, Key, ListCollection, build_nodes,
//! };
//!
//! #[derive(Clone)]
//! struct Country {
//!     code: &'static str,
//!     name: &'static str,
//! }
//!
//! impl DataItem for Country {}
//!
//! let countries = [
//!     Country { code: "fr", name: "France" },
//!     Country { code: "jp", name: "Japan" },
//! ];
//! let options = BuildOptions {
//!     get_key: Accessor::from_fn(|c: &Country| Some(Key::from(c.code))),
//!     get_text_value: Accessor::from_fn(|c: &Country| Some(c.name.into())),
//!     ..BuildOptions::default()
//! };
//!
//! let collection = ListCollection::try_new(build_nodes(&countries, &options)).unwrap();
//! assert_eq!(collection.get_item("jp").unwrap().text_value, "Japan");
//! assert_eq!(collection.get_key_before("jp").map(Key::as_str), Some("fr"));
//! ```
//!
//! ## Stale keys
//!
//! Selection and focus state can outlive the collection they refer to by one
//! update. Lookups of unknown keys therefore return `None` instead of failing,
//! and callers treat `None` as "no longer present".
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod accessor;
mod builder;
mod error;
mod key;
mod list;
mod memo;
mod node;

pub use accessor::{Accessor, ChildrenAccessor, DataItem, FieldValue, FromField};
pub use builder::{BuildOptions, build_nodes};
pub use error::BuildError;
pub use key::Key;
pub use list::{Collection, ListCollection};
pub use memo::CollectionMemo;
pub use node::{CollectionNode, NodeKind};
