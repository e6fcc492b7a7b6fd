// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document-wide stack of active focus scopes.

use alloc::vec::Vec;

use hashbrown::HashSet;

/// Handle of a scope registered in a [`FocusScopeStack`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

/// Ordered registry of mounted focus scopes.
///
/// Only the top scope is active; every other registered scope is paused and
/// does not contain focus. Adding a scope pauses the previous top; removing
/// the top resumes the scope below it.
///
/// One stack is shared by every scope of a document. Construct it at startup
/// and pass it to scope operations.
///
/// ```rust
/// use trellis_focus_scope::FocusScopeStack;
///
/// let mut stack = FocusScopeStack::new();
/// let dialog = stack.allocate();
/// let nested = stack.allocate();
///
/// stack.add(dialog);
/// stack.add(nested);
/// assert!(stack.is_paused(dialog));
///
/// stack.remove(nested);
/// assert!(!stack.is_paused(dialog));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FocusScopeStack {
    // Bottom to top.
    scopes: Vec<ScopeId>,
    paused: HashSet<ScopeId>,
    next_id: u64,
}

impl FocusScopeStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a handle for a new scope. The scope is not registered yet.
    pub fn allocate(&mut self) -> ScopeId {
        self.next_id += 1;
        ScopeId(self.next_id)
    }

    /// Make `scope` the top scope, pausing the previous top.
    ///
    /// Adding a scope that is already registered moves it to the top.
    pub fn add(&mut self, scope: ScopeId) {
        if let Some(&active) = self.scopes.last() {
            if active != scope {
                self.paused.insert(active);
                tracing::debug!(scope = ?active, "focus scope paused");
            }
        }
        self.scopes.retain(|s| *s != scope);
        self.scopes.push(scope);
        self.paused.remove(&scope);
    }

    /// Unregister `scope` and resume whichever scope is now on top.
    pub fn remove(&mut self, scope: ScopeId) {
        self.scopes.retain(|s| *s != scope);
        self.paused.remove(&scope);
        if let Some(&top) = self.scopes.last() {
            if self.paused.remove(&top) {
                tracing::debug!(scope = ?top, "focus scope resumed");
            }
        }
    }

    /// The active scope.
    pub fn top(&self) -> Option<ScopeId> {
        self.scopes.last().copied()
    }

    /// Whether `scope` is registered but not on top.
    pub fn is_paused(&self, scope: ScopeId) -> bool {
        self.paused.contains(&scope)
    }

    /// Whether `scope` is registered.
    pub fn contains(&self, scope: ScopeId) -> bool {
        self.scopes.contains(&scope)
    }

    /// Number of registered scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Whether no scope is registered.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
