// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! String comparison for type-ahead matching.

use core::cmp::Ordering;

/// Compares two strings the way the user's locale would.
///
/// Hosts with access to a locale-aware collation service implement this
/// trait over it. [`CaseInsensitiveCollator`] is the built-in fallback.
pub trait Collator {
    /// Order `a` relative to `b`.
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Compares strings character by character after Unicode lowercasing.
///
/// This matches a "base" sensitivity collator for case only; accents are
/// significant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseInsensitiveCollator;

impl Collator for CaseInsensitiveCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let a = a.chars().flat_map(char::to_lowercase);
        let b = b.chars().flat_map(char::to_lowercase);
        a.cmp(b)
    }
}

impl<F: Fn(&str, &str) -> Ordering> Collator for F {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}
