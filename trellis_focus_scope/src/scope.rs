// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single focus scope: auto-focus, trapping, and restoration.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::{FocusHost, FocusScopeStack, ScopeId};

/// Cancelable notification sent when a scope is about to move focus on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutoFocusEvent {
    default_prevented: bool,
}

impl AutoFocusEvent {
    /// Keep the scope from moving focus.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Listener for [`AutoFocusEvent`]s.
pub type AutoFocusHandler = Box<dyn FnMut(&mut AutoFocusEvent)>;

/// Options for a [`FocusScope`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusScopeOptions {
    /// Keep focus inside the container: tabbing loops at the edges and focus
    /// that escapes is pulled back.
    pub trap_focus: bool,
}

#[derive(Clone, Debug)]
struct Sentinels<N> {
    start: N,
    end: N,
}

/// Focus management for one container element.
///
/// A scope is driven by the host:
///
/// - [`mount`](Self::mount) registers it on the [`FocusScopeStack`], which
///   pauses the previously active scope, and installs the trap sentinels.
///   If focus is not already inside, an auto-focus event is dispatched and,
///   unless prevented, the move is left pending.
/// - [`flush_mount_auto_focus`](Self::flush_mount_auto_focus) runs the
///   pending move. Hosts call it from their next macrotask so that layers
///   mounted by the same event are registered first.
/// - [`on_focus_in`](Self::on_focus_in) and
///   [`on_focus_out`](Self::on_focus_out) receive the document's focus events.
/// - [`unmount`](Self::unmount) restores focus to where it was before mount.
///
/// Focus that moves into a host top layer (such as a toast region) is never
/// pulled back.
pub struct FocusScope<N> {
    id: ScopeId,
    container: N,
    options: FocusScopeOptions,
    mounted: bool,
    pending_mount_focus: bool,
    previously_focused: Option<N>,
    last_focused: Option<N>,
    sentinels: Option<Sentinels<N>>,
    on_mount_auto_focus: Option<AutoFocusHandler>,
    on_unmount_auto_focus: Option<AutoFocusHandler>,
}

impl<N: fmt::Debug> fmt::Debug for FocusScope<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusScope")
            .field("id", &self.id)
            .field("container", &self.container)
            .field("options", &self.options)
            .field("mounted", &self.mounted)
            .field("pending_mount_focus", &self.pending_mount_focus)
            .field("previously_focused", &self.previously_focused)
            .field("last_focused", &self.last_focused)
            .field("sentinels", &self.sentinels)
            .finish_non_exhaustive()
    }
}

impl<N: Clone + PartialEq> FocusScope<N> {
    /// A scope for `container`, with a handle reserved on `stack`.
    pub fn new(stack: &mut FocusScopeStack, container: N, options: FocusScopeOptions) -> Self {
        Self {
            id: stack.allocate(),
            container,
            options,
            mounted: false,
            pending_mount_focus: false,
            previously_focused: None,
            last_focused: None,
            sentinels: None,
            on_mount_auto_focus: None,
            on_unmount_auto_focus: None,
        }
    }

    /// This scope's handle on the stack.
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// The container element.
    pub fn container(&self) -> &N {
        &self.container
    }

    /// Current options.
    pub fn options(&self) -> FocusScopeOptions {
        self.options
    }

    /// Whether the scope is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a mount auto-focus is waiting for
    /// [`flush_mount_auto_focus`](Self::flush_mount_auto_focus).
    pub fn has_pending_mount_focus(&self) -> bool {
        self.pending_mount_focus
    }

    /// The last in-scope element that held focus.
    pub fn last_focused(&self) -> Option<&N> {
        self.last_focused.as_ref()
    }

    /// Listen for the auto-focus event dispatched on mount.
    pub fn set_on_mount_auto_focus(&mut self, handler: impl FnMut(&mut AutoFocusEvent) + 'static) {
        self.on_mount_auto_focus = Some(Box::new(handler));
    }

    /// Listen for the auto-focus event dispatched on unmount.
    pub fn set_on_unmount_auto_focus(
        &mut self,
        handler: impl FnMut(&mut AutoFocusEvent) + 'static,
    ) {
        self.on_unmount_auto_focus = Some(Box::new(handler));
    }

    /// Whether `node` is one of this scope's trap sentinels.
    pub fn is_sentinel(&self, node: &N) -> bool {
        self.sentinels
            .as_ref()
            .is_some_and(|s| s.start == *node || s.end == *node)
    }

    /// Tabbable elements of the container in document order, without sentinels.
    pub fn tabbables<H: FocusHost<N> + ?Sized>(&self, host: &H) -> Vec<N> {
        let mut tabbables = host.tabbables(&self.container);
        tabbables.retain(|n| !self.is_sentinel(n));
        tabbables
    }

    fn first_tabbable<H: FocusHost<N> + ?Sized>(&self, host: &H) -> Option<N> {
        self.tabbables(host).into_iter().next()
    }

    fn last_tabbable<H: FocusHost<N> + ?Sized>(&self, host: &H) -> Option<N> {
        self.tabbables(host).pop()
    }

    /// Register the scope and dispatch the mount auto-focus event.
    ///
    /// Returns whether an auto-focus is now pending. Mounting twice is a no-op.
    pub fn mount<H: FocusHost<N> + ?Sized>(
        &mut self,
        stack: &mut FocusScopeStack,
        host: &mut H,
    ) -> bool {
        if self.mounted {
            return self.pending_mount_focus;
        }
        self.mounted = true;
        stack.add(self.id);
        if self.options.trap_focus {
            self.install_sentinels(host);
        }

        let previous = host.active_element();
        let focus_inside = previous
            .as_ref()
            .is_some_and(|p| host.contains(&self.container, p));
        if focus_inside {
            self.last_focused.clone_from(&previous);
        } else {
            let mut event = AutoFocusEvent::default();
            if let Some(handler) = self.on_mount_auto_focus.as_mut() {
                handler(&mut event);
            }
            self.pending_mount_focus = !event.default_prevented();
        }
        self.previously_focused = previous;
        tracing::debug!(scope = ?self.id, pending = self.pending_mount_focus, "focus scope mounted");
        self.pending_mount_focus
    }

    /// Run the pending mount auto-focus: the first tabbable element, or the
    /// container itself when that does not take focus.
    ///
    /// Returns `false` when nothing was pending.
    pub fn flush_mount_auto_focus<H: FocusHost<N> + ?Sized>(&mut self, host: &mut H) -> bool {
        if !core::mem::take(&mut self.pending_mount_focus) || !self.mounted {
            return false;
        }
        if let Some(first) = self.first_tabbable(host) {
            host.focus(&first);
        }
        if host.active_element() == self.previously_focused {
            host.focus(&self.container);
        }
        self.record_active(host);
        true
    }

    /// Dispatch the unmount auto-focus event, restore focus, and unregister.
    ///
    /// The event arrives already prevented when a focusable element outside
    /// the container holds focus, so dismissal never steals focus back from
    /// wherever the user moved it. Otherwise focus returns to the element
    /// that was focused before mount, or to the body.
    pub fn unmount<H: FocusHost<N> + ?Sized>(&mut self, stack: &mut FocusScopeStack, host: &mut H) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.pending_mount_focus = false;
        self.remove_sentinels(host);

        let mut event = AutoFocusEvent::default();
        if self.focus_moved_elsewhere(host) {
            event.prevent_default();
        }
        if let Some(handler) = self.on_unmount_auto_focus.as_mut() {
            handler(&mut event);
        }
        let previous = self.previously_focused.take();
        if !event.default_prevented() {
            let target = previous.unwrap_or_else(|| host.body());
            host.focus(&target);
        }
        self.last_focused = None;
        stack.remove(self.id);
        tracing::debug!(scope = ?self.id, "focus scope unmounted");
    }

    fn focus_moved_elsewhere<H: FocusHost<N> + ?Sized>(&self, host: &H) -> bool {
        host.active_element().is_some_and(|active| {
            !host.contains(&self.container, &active) && host.is_focusable(&active)
        })
    }

    /// Turn trapping on or off while mounted.
    pub fn set_trap_focus<H: FocusHost<N> + ?Sized>(&mut self, host: &mut H, trap_focus: bool) {
        if self.options.trap_focus == trap_focus {
            return;
        }
        self.options.trap_focus = trap_focus;
        if !self.mounted {
            return;
        }
        if trap_focus {
            self.install_sentinels(host);
        } else {
            self.remove_sentinels(host);
        }
    }

    fn install_sentinels<H: FocusHost<N> + ?Sized>(&mut self, host: &mut H) {
        if self.sentinels.is_some() {
            return;
        }
        let start = host.create_sentinel();
        host.prepend(&self.container, &start);
        let end = host.create_sentinel();
        host.append(&self.container, &end);
        self.sentinels = Some(Sentinels { start, end });
    }

    fn remove_sentinels<H: FocusHost<N> + ?Sized>(&mut self, host: &mut H) {
        if let Some(Sentinels { start, end }) = self.sentinels.take() {
            host.remove(&start);
            host.remove(&end);
        }
    }

    /// Move the sentinels back to the container's edges after its children changed.
    ///
    /// Returns whether either sentinel was moved.
    pub fn on_children_changed<H: FocusHost<N> + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(sentinels) = self.sentinels.as_ref() else {
            return false;
        };
        let mut moved = false;
        if host.first_child(&self.container).as_ref() != Some(&sentinels.start) {
            host.remove(&sentinels.start);
            host.prepend(&self.container, &sentinels.start);
            moved = true;
        }
        if host.last_child(&self.container).as_ref() != Some(&sentinels.end) {
            host.remove(&sentinels.end);
            host.append(&self.container, &sentinels.end);
            moved = true;
        }
        moved
    }

    /// Handle a document `focusin`. `related` is the element losing focus.
    ///
    /// A focused sentinel sends focus to the opposite edge of the scope, which
    /// makes Tab and Shift+Tab loop. Otherwise, while trapping and active,
    /// focus inside is remembered and focus outside is pulled back.
    ///
    /// Returns whether focus was moved.
    pub fn on_focus_in<H: FocusHost<N> + ?Sized>(
        &mut self,
        stack: &FocusScopeStack,
        host: &mut H,
        target: &N,
        related: Option<&N>,
    ) -> bool {
        if !self.mounted {
            return false;
        }
        if let Some(redirect) = self.sentinel_redirect(host, target, related) {
            host.focus(&redirect);
            return true;
        }
        if !self.options.trap_focus || stack.is_paused(self.id) {
            return false;
        }
        if host.contains(&self.container, target) {
            self.last_focused = Some(target.clone());
            false
        } else if host.is_in_top_layer(target) {
            false
        } else {
            self.refocus(host)
        }
    }

    /// Handle a document `focusout`. `related` is the element gaining focus.
    ///
    /// Focus leaving to nowhere (the window lost focus, or the element was
    /// removed) is left alone.
    ///
    /// Returns whether focus was moved.
    pub fn on_focus_out<H: FocusHost<N> + ?Sized>(
        &mut self,
        stack: &FocusScopeStack,
        host: &mut H,
        related: Option<&N>,
    ) -> bool {
        if !self.mounted || !self.options.trap_focus || stack.is_paused(self.id) {
            return false;
        }
        let Some(related) = related else {
            return false;
        };
        if host.contains(&self.container, related) || host.is_in_top_layer(related) {
            return false;
        }
        self.refocus(host)
    }

    fn sentinel_redirect<H: FocusHost<N> + ?Sized>(
        &self,
        host: &H,
        target: &N,
        related: Option<&N>,
    ) -> Option<N> {
        let sentinels = self.sentinels.as_ref()?;
        let first = self.first_tabbable(host);
        let last = self.last_tabbable(host);
        let redirect = if *target == sentinels.start {
            if related.is_some() && related == first.as_ref() {
                last
            } else {
                first
            }
        } else if *target == sentinels.end {
            if related.is_some() && related == last.as_ref() {
                first
            } else {
                last
            }
        } else {
            return None;
        };
        Some(redirect.unwrap_or_else(|| self.container.clone()))
    }

    fn refocus<H: FocusHost<N> + ?Sized>(&mut self, host: &mut H) -> bool {
        let target = match self.last_focused.clone() {
            Some(last) => last,
            None => self
                .first_tabbable(host)
                .unwrap_or_else(|| self.container.clone()),
        };
        tracing::trace!(scope = ?self.id, "focus pulled back into scope");
        host.focus(&target);
        self.last_focused = Some(target);
        true
    }

    fn record_active<H: FocusHost<N> + ?Sized>(&mut self, host: &H) {
        if let Some(active) = host.active_element() {
            if host.contains(&self.container, &active) {
                self.last_focused = Some(active);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    /// Arena of nodes; node 0 is the body.
    struct Dom {
        parent: Vec<Option<usize>>,
        children: Vec<Vec<usize>>,
        tabbable: Vec<bool>,
        top_layer: Vec<bool>,
        active: Option<usize>,
    }

    const BODY: usize = 0;

    impl Dom {
        fn new() -> Self {
            Self {
                parent: vec![None],
                children: vec![Vec::new()],
                tabbable: vec![false],
                top_layer: vec![false],
                active: None,
            }
        }

        fn add(&mut self, parent: usize, tabbable: bool) -> usize {
            let id = self.parent.len();
            self.parent.push(Some(parent));
            self.children.push(Vec::new());
            self.tabbable.push(tabbable);
            self.top_layer.push(false);
            self.children[parent].push(id);
            id
        }

        fn collect(&self, node: usize, out: &mut Vec<usize>) {
            for &child in &self.children[node] {
                if self.tabbable[child] {
                    out.push(child);
                }
                self.collect(child, out);
            }
        }
    }

    impl FocusHost<usize> for Dom {
        fn active_element(&self) -> Option<usize> {
            self.active
        }

        fn contains(&self, container: &usize, node: &usize) -> bool {
            let mut current = Some(*node);
            while let Some(n) = current {
                if n == *container {
                    return true;
                }
                current = self.parent[n];
            }
            false
        }

        fn tabbables(&self, container: &usize) -> Vec<usize> {
            let mut out = Vec::new();
            self.collect(*container, &mut out);
            out
        }

        fn is_focusable(&self, node: &usize) -> bool {
            self.tabbable[*node]
        }

        fn is_in_top_layer(&self, node: &usize) -> bool {
            let mut current = Some(*node);
            while let Some(n) = current {
                if self.top_layer[n] {
                    return true;
                }
                current = self.parent[n];
            }
            false
        }

        fn focus(&mut self, node: &usize) {
            self.active = Some(*node);
        }

        fn body(&self) -> usize {
            BODY
        }

        fn create_sentinel(&mut self) -> usize {
            let id = self.parent.len();
            self.parent.push(None);
            self.children.push(Vec::new());
            self.tabbable.push(true);
            self.top_layer.push(false);
            id
        }

        fn remove(&mut self, node: &usize) {
            if let Some(parent) = self.parent[*node].take() {
                self.children[parent].retain(|c| c != node);
            }
        }

        fn prepend(&mut self, container: &usize, child: &usize) {
            self.parent[*child] = Some(*container);
            self.children[*container].insert(0, *child);
        }

        fn append(&mut self, container: &usize, child: &usize) {
            self.parent[*child] = Some(*container);
            self.children[*container].push(*child);
        }

        fn first_child(&self, container: &usize) -> Option<usize> {
            self.children[*container].first().copied()
        }

        fn last_child(&self, container: &usize) -> Option<usize> {
            self.children[*container].last().copied()
        }
    }

    /// body > [opener, dialog > [a, b, c]]
    fn dialog_dom() -> (Dom, usize, usize, [usize; 3]) {
        let mut dom = Dom::new();
        let opener = dom.add(BODY, true);
        let dialog = dom.add(BODY, false);
        let a = dom.add(dialog, true);
        let b = dom.add(dialog, true);
        let c = dom.add(dialog, true);
        (dom, opener, dialog, [a, b, c])
    }

    const TRAP: FocusScopeOptions = FocusScopeOptions { trap_focus: true };

    #[test]
    fn mount_focuses_first_tabbable_and_unmount_restores() {
        let (mut dom, opener, dialog, [a, ..]) = dialog_dom();
        dom.focus(&opener);
        let mut stack = FocusScopeStack::new();
        let mut scope = FocusScope::new(&mut stack, dialog, TRAP);

        assert!(scope.mount(&mut stack, &mut dom));
        assert_eq!(dom.active, Some(opener), "auto-focus is deferred");
        assert!(scope.flush_mount_auto_focus(&mut dom));
        assert_eq!(dom.active, Some(a), "sentinels are skipped");
        assert!(!scope.flush_mount_auto_focus(&mut dom));

        scope.unmount(&mut stack, &mut dom);
        assert_eq!(dom.active, Some(opener));
        assert!(stack.is_empty());
        assert_eq!(dom.children[dialog].len(), 3, "sentinels removed");
    }

    #[test]
    fn empty_container_takes_focus_itself() {
        let mut dom = Dom::new();
        let dialog = dom.add(BODY, false);
        let mut stack = FocusScopeStack::new();
        let mut scope = FocusScope::new(&mut stack, dialog, FocusScopeOptions::default());

        scope.mount(&mut stack, &mut dom);
        scope.flush_mount_auto_focus(&mut dom);
        assert_eq!(dom.active, Some(dialog));

        scope.unmount(&mut stack, &mut dom);
        assert_eq!(dom.active, Some(BODY), "nothing was focused before mount");
    }

    #[test]
    fn prevented_mount_event_leaves_focus_alone() {
        let (mut dom, opener, dialog, _) = dialog_dom();
        dom.focus(&opener);
        let mut stack = FocusScopeStack::new();
        let mut scope = FocusScope::new(&mut stack, dialog, TRAP);
        scope.set_on_mount_auto_focus(AutoFocusEvent::prevent_default);

        assert!(!scope.mount(&mut stack, &mut dom));
        assert!(!scope.flush_mount_auto_focus(&mut dom));
        assert_eq!(dom.active, Some(opener));
    }

    #[test]
    fn no_mount_event_when_focus_is_already_inside() {
        let (mut dom, _, dialog, [_, b, _]) = dialog_dom();
        dom.focus(&b);
        let calls = Rc::new(Cell::new(0));
        let mut stack = FocusScopeStack::new();
        let mut scope = FocusScope::new(&mut stack, dialog, TRAP);
        let seen = Rc::clone(&calls);
        scope.set_on_mount_auto_focus(move |_| seen.set(seen.get() + 1));

        assert!(!scope.mount(&mut stack, &mut dom));
        assert_eq!(calls.get(), 0);
        assert_eq!(scope.last_focused(), Some(&b));
    }

    #[test]
    fn unmount_does_not_steal_focus_moved_outside() {
        let (mut dom, opener, dialog, _) = dialog_dom();
        let elsewhere = dom.add(BODY, true);
        dom.focus(&opener);
        let mut stack = FocusScopeStack::new();
        let mut scope = FocusScope::new(&mut stack, dialog, FocusScopeOptions::default());
        let prevented = Rc::new(Cell::new(false));
        let seen = Rc::clone(&prevented);
        scope.set_on_unmount_auto_focus(move |e| seen.set(e.default_prevented()));

        scope.mount(&mut stack, &mut dom);
        scope.flush_mount_auto_focus(&mut dom);
        dom.focus(&elsewhere);
        scope.unmount(&mut stack, &mut dom);

        assert!(prevented.get());
        assert_eq!(dom.active, Some(elsewhere));
    }

    #[test]
    fn sentinels_loop_tab_navigation() {
        let (mut dom, opener, dialog, [a, _, c]) = dialog_dom();
        dom.focus(&opener);
        let mut stack = FocusScopeStack::new();
        let mut scope = FocusScope::new(&mut stack, dialog, TRAP);
        scope.mount(&mut stack, &mut dom);
        scope.flush_mount_auto_focus(&mut dom);

        let start = dom.children[dialog][0];
        let end = *dom.children[dialog].last().unwrap();
        assert!(scope.is_sentinel(&start) && scope.is_sentinel(&end));

        // Tab past the last item lands on the end sentinel.
        assert!(scope.on_focus_in(&stack, &mut dom, &end, Some(&c)));
        assert_eq!(dom.active, Some(a));
        // Shift+Tab before the first item lands on the start sentinel.
        assert!(scope.on_focus_in(&stack, &mut dom, &start, Some(&a)));
        assert_eq!(dom.active, Some(c));
        // Entering the start sentinel from elsewhere goes to the first item.
        assert!(scope.on_focus_in(&stack, &mut dom, &start, None));
        assert_eq!(dom.active, Some(a));
    }

    #[test]
    fn escaped_focus_is_pulled_back_unless_in_a_top_layer() {
        let (mut dom, opener, dialog, [_, b, _]) = dialog_dom();
        let toast = dom.add(BODY, true);
        dom.top_layer[toast] = true;
        let mut stack = FocusScopeStack::new();
        let mut scope = FocusScope::new(&mut stack, dialog, TRAP);
        scope.mount(&mut stack, &mut dom);
        scope.flush_mount_auto_focus(&mut dom);

        assert!(!scope.on_focus_in(&stack, &mut dom, &b, None));
        assert_eq!(scope.last_focused(), Some(&b));

        dom.focus(&opener);
        assert!(scope.on_focus_in(&stack, &mut dom, &opener, Some(&b)));
        assert_eq!(dom.active, Some(b));

        assert!(!scope.on_focus_out(&stack, &mut dom, Some(&toast)));
        assert!(!scope.on_focus_out(&stack, &mut dom, None), "window blur");
        assert!(scope.on_focus_out(&stack, &mut dom, Some(&opener)));
    }

    #[test]
    fn paused_scope_does_not_contain_focus() {
        let (mut dom, opener, dialog, _) = dialog_dom();
        let nested = dom.add(BODY, false);
        let inner = dom.add(nested, true);
        let mut stack = FocusScopeStack::new();
        let mut outer = FocusScope::new(&mut stack, dialog, TRAP);
        let mut child = FocusScope::new(&mut stack, nested, TRAP);

        outer.mount(&mut stack, &mut dom);
        outer.flush_mount_auto_focus(&mut dom);
        child.mount(&mut stack, &mut dom);
        child.flush_mount_auto_focus(&mut dom);
        assert_eq!(dom.active, Some(inner));
        assert!(stack.is_paused(outer.id()));
        assert!(!outer.on_focus_in(&stack, &mut dom, &inner, None));

        child.unmount(&mut stack, &mut dom);
        assert!(!stack.is_paused(outer.id()));
        dom.focus(&opener);
        assert!(outer.on_focus_in(&stack, &mut dom, &opener, None));
    }

    #[test]
    fn sentinels_are_repinned_after_children_change() {
        let (mut dom, _, dialog, _) = dialog_dom();
        let mut stack = FocusScopeStack::new();
        let mut scope = FocusScope::new(&mut stack, dialog, TRAP);
        scope.mount(&mut stack, &mut dom);
        assert!(!scope.on_children_changed(&mut dom));

        let late = dom.add(dialog, true);
        assert_eq!(dom.last_child(&dialog), Some(late));
        assert!(scope.on_children_changed(&mut dom));
        let last = dom.last_child(&dialog).unwrap();
        assert!(scope.is_sentinel(&last));
        assert_eq!(scope.tabbables(&dom).last(), Some(&late));
    }

    #[test]
    fn trapping_can_be_toggled_while_mounted() {
        let (mut dom, _, dialog, _) = dialog_dom();
        let mut stack = FocusScopeStack::new();
        let mut scope = FocusScope::new(&mut stack, dialog, FocusScopeOptions::default());
        scope.mount(&mut stack, &mut dom);
        assert_eq!(dom.children[dialog].len(), 3);

        scope.set_trap_focus(&mut dom, true);
        assert_eq!(dom.children[dialog].len(), 5);
        scope.set_trap_focus(&mut dom, false);
        assert_eq!(dom.children[dialog].len(), 3);
    }
}
