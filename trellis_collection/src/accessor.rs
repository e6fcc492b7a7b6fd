// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw data access: how the builder reads keys, labels, and flags out of user data.
//!
//! A data source is a slice of any type implementing [`DataItem`]. Primitive
//! values (strings and integers) are items in their own right. Record-like
//! values expose named fields through [`DataItem::field`] so that a
//! [`Accessor::Field`] can read them without the builder knowing the type.
//!
//! Each accessor is either a field name or a closure, decided once when the
//! options are built rather than re-inspected for every item.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;

use crate::Key;

/// A dynamically typed field value read from a record.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// A string field.
    Text(String),
    /// A numeric field.
    Number(f64),
    /// A boolean field.
    Bool(bool),
}

impl FieldValue {
    /// Render the value the way it would appear as a key or label.
    ///
    /// Integral numbers print without a fractional part.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => number_to_text(*n),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Truthiness used for flag fields such as `disabled`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "only used after checking the value round-trips through i64"
)]
fn number_to_text(n: f64) -> String {
    let truncated = n as i64;
    if truncated as f64 == n {
        format!("{truncated}")
    } else {
        format!("{n}")
    }
}

/// A value that can appear in a collection data source.
///
/// Implementors either behave as a primitive (returning `Some` from
/// [`DataItem::primitive`]) or expose named fields for [`Accessor::Field`].
pub trait DataItem: Sized {
    /// The key and label of a primitive item, or `None` for records.
    fn primitive(&self) -> Option<Key> {
        None
    }

    /// Read a named scalar field.
    fn field(&self, _name: &str) -> Option<FieldValue> {
        None
    }

    /// Read a named child list, used to discover sections.
    fn children(&self, _name: &str) -> Option<&[Self]> {
        None
    }
}

macro_rules! primitive_item {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DataItem for $ty {
                fn primitive(&self) -> Option<Key> {
                    Some(Key::from(self.to_string()))
                }
            }
        )*
    };
}

primitive_item!(String, &str, Key, i32, i64, u32, u64, usize);

/// Conversion from a [`FieldValue`] into the type an accessor produces.
pub trait FromField: Sized {
    /// Convert a raw field value.
    fn from_field(value: FieldValue) -> Option<Self>;
}

impl FromField for Key {
    fn from_field(value: FieldValue) -> Option<Self> {
        Some(Self::from(value.to_text()))
    }
}

impl FromField for String {
    fn from_field(value: FieldValue) -> Option<Self> {
        Some(value.to_text())
    }
}

impl FromField for bool {
    fn from_field(value: FieldValue) -> Option<Self> {
        Some(value.is_truthy())
    }
}

/// Reads a value of type `V` from a data item of type `T`.
pub enum Accessor<T, V> {
    /// Read the named field via [`DataItem::field`].
    Field(Cow<'static, str>),
    /// Compute the value with a closure.
    Fn(Arc<dyn Fn(&T) -> Option<V> + Send + Sync>),
}

impl<T, V> Accessor<T, V> {
    /// Accessor for a named field.
    pub fn field(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Field(name.into())
    }

    /// Accessor backed by a closure.
    pub fn from_fn(f: impl Fn(&T) -> Option<V> + Send + Sync + 'static) -> Self {
        Self::Fn(Arc::new(f))
    }

    /// Whether two accessors are the same field name or the same closure instance.
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => a == b,
            (Self::Fn(a), Self::Fn(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: DataItem, V: FromField> Accessor<T, V> {
    /// Resolve the accessor against one item.
    pub fn resolve(&self, item: &T) -> Option<V> {
        match self {
            Self::Field(name) => item.field(name).and_then(V::from_field),
            Self::Fn(f) => f(item),
        }
    }
}

impl<T, V> Clone for Accessor<T, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(name) => Self::Field(name.clone()),
            Self::Fn(f) => Self::Fn(Arc::clone(f)),
        }
    }
}

impl<T, V> fmt::Debug for Accessor<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// Reads the child list of a section.
pub enum ChildrenAccessor<T> {
    /// Read the named child list via [`DataItem::children`].
    Field(Cow<'static, str>),
    /// Compute the children with a closure.
    Fn(Arc<dyn Fn(&T) -> Option<&[T]> + Send + Sync>),
}

impl<T> ChildrenAccessor<T> {
    /// Accessor for a named child list.
    pub fn field(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Field(name.into())
    }

    /// Accessor backed by a closure.
    pub fn from_fn(f: impl Fn(&T) -> Option<&[T]> + Send + Sync + 'static) -> Self {
        Self::Fn(Arc::new(f))
    }

    /// Whether two accessors are the same field name or the same closure instance.
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => a == b,
            (Self::Fn(a), Self::Fn(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: DataItem> ChildrenAccessor<T> {
    /// Resolve the child list of `item`, if it is a section.
    pub fn resolve<'a>(&self, item: &'a T) -> Option<&'a [T]> {
        match self {
            Self::Field(name) => item.children(name),
            Self::Fn(f) => f(item),
        }
    }
}

impl<T> Clone for ChildrenAccessor<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(name) => Self::Field(name.clone()),
            Self::Fn(f) => Self::Fn(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for ChildrenAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}
