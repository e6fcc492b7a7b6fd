// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layers that dismiss on outside interaction or Escape.

use alloc::vec::Vec;

use trellis_event_state::{KeyCode, KeyboardEvent, Modifiers, Platform, PointerType};

use crate::{LayerHost, LayerStack};

/// Options for a [`DismissableLayer`].
#[derive(Clone, Debug)]
pub struct DismissableLayerOptions<N> {
    /// Make the layer modal for the pointer: everything outside it, including
    /// layers below it, stops receiving pointer events.
    pub disable_outside_pointer_events: bool,
    /// Dismiss on outside pointer-down even when this is not the top-most layer.
    /// Submenus set this so they never block their parent menu's dismissal.
    pub bypass_top_most_layer_check: bool,
    /// Elements whose interactions never count as outside this layer, such as
    /// the trigger that toggles it.
    pub excluded_elements: Vec<N>,
    /// Decides which modifier turns a primary click into a context-menu click.
    pub platform: Platform,
}

impl<N> Default for DismissableLayerOptions<N> {
    fn default() -> Self {
        Self {
            disable_outside_pointer_events: false,
            bypass_top_most_layer_check: false,
            excluded_elements: Vec::new(),
            platform: Platform::default(),
        }
    }
}

/// What kind of interaction happened outside a layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutsideInteraction {
    /// A pointer went down outside.
    PointerDown {
        /// Device that pressed.
        pointer_type: PointerType,
        /// The press opens a context menu (secondary button, or Ctrl/Cmd with
        /// the primary button).
        is_context_menu: bool,
    },
    /// Focus moved outside.
    Focus,
}

/// Cancelable notification of an interaction outside a layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractOutsideEvent<N> {
    target: N,
    interaction: OutsideInteraction,
    default_prevented: bool,
}

impl<N> InteractOutsideEvent<N> {
    fn new(target: N, interaction: OutsideInteraction) -> Self {
        Self {
            target,
            interaction,
            default_prevented: false,
        }
    }

    /// The element that was pressed or focused.
    pub fn target(&self) -> &N {
        &self.target
    }

    /// The kind of interaction.
    pub fn interaction(&self) -> OutsideInteraction {
        self.interaction
    }

    /// Keep the layer open.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Cancelable notification that Escape was pressed while a layer is top-most.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EscapeKeyDownEvent {
    default_prevented: bool,
}

impl EscapeKeyDownEvent {
    /// Keep the layer open.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Callbacks of a [`DismissableLayer`].
///
/// The `on_*_outside` callbacks and [`on_interact_outside`] run in that order
/// and may prevent the dismissal. Any `FnMut()` is a handler that only
/// reacts to dismissal.
///
/// [`on_interact_outside`]: DismissHandler::on_interact_outside
pub trait DismissHandler<N> {
    /// A pointer went down outside the layer.
    fn on_pointer_down_outside(&mut self, event: &mut InteractOutsideEvent<N>) {
        let _ = event;
    }

    /// Focus moved outside the layer.
    fn on_focus_outside(&mut self, event: &mut InteractOutsideEvent<N>) {
        let _ = event;
    }

    /// Any outside interaction, after the specific callback.
    fn on_interact_outside(&mut self, event: &mut InteractOutsideEvent<N>) {
        let _ = event;
    }

    /// Escape was pressed while the layer is top-most.
    fn on_escape_key_down(&mut self, event: &mut EscapeKeyDownEvent) {
        let _ = event;
    }

    /// The layer should close.
    fn on_dismiss(&mut self);
}

impl<N, F: FnMut()> DismissHandler<N> for F {
    fn on_dismiss(&mut self) {
        self();
    }
}

/// A pointer press delivered to [`DismissableLayer::on_pointer_down`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerPointerDown<N> {
    /// Element under the pointer.
    pub target: N,
    /// Device that pressed.
    pub pointer_type: PointerType,
    /// Button index; 0 is primary, 2 is secondary.
    pub button: u8,
    /// Modifiers held during the press.
    pub modifiers: Modifiers,
}

impl<N> LayerPointerDown<N> {
    /// A primary-button press with no modifiers.
    pub fn new(target: N, pointer_type: PointerType) -> Self {
        Self {
            target,
            pointer_type,
            button: 0,
            modifiers: Modifiers::empty(),
        }
    }
}

#[derive(Clone, Debug)]
struct PendingPress<N> {
    target: N,
    pointer_type: PointerType,
    is_context_menu: bool,
}

/// A layer (dialog, popover, menu) that closes on outside interaction or Escape.
///
/// The host drives the lifecycle and forwards document events:
///
/// - [`mount`](Self::mount) adds the layer to the [`LayerStack`], registers
///   it under its parent layer, and updates pointer-events.
/// - [`arm`](Self::arm) starts outside pointer-down detection. Hosts call it
///   from the macrotask after mounting, so the press that opened the layer
///   is not seen as an outside press.
/// - [`on_pointer_down`](Self::on_pointer_down), [`on_click`](Self::on_click),
///   [`on_focus_in`](Self::on_focus_in), and [`on_key_down`](Self::on_key_down)
///   receive document events and report whether the layer was dismissed.
///
/// Touch presses are decided on the following click rather than on
/// pointer-down, because the browser may still deliver the click to whatever
/// lies beneath once the layer closes.
#[derive(Clone, Debug)]
pub struct DismissableLayer<N> {
    node: N,
    options: DismissableLayerOptions<N>,
    parent: Option<N>,
    mounted: bool,
    armed: bool,
    pending_touch: Option<PendingPress<N>>,
}

impl<N: Clone + PartialEq> DismissableLayer<N> {
    /// A layer rooted at `node`.
    pub fn new(node: N, options: DismissableLayerOptions<N>) -> Self {
        Self {
            node,
            options,
            parent: None,
            mounted: false,
            armed: false,
            pending_touch: None,
        }
    }

    /// Nest this layer under `parent`, which must be mounted first.
    ///
    /// Interaction inside this layer then never dismisses the parent or its ancestors.
    pub fn with_parent(mut self, parent: N) -> Self {
        self.parent = Some(parent);
        self
    }

    /// The layer's root element.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Current options.
    pub fn options(&self) -> &DismissableLayerOptions<N> {
        &self.options
    }

    /// Whether the layer is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether outside pointer-down detection is active.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Add the layer to `stack`. Pointer-down detection stays off until [`arm`](Self::arm).
    pub fn mount<H: LayerHost<N> + ?Sized>(&mut self, stack: &mut LayerStack<N>, host: &mut H) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.armed = false;
        stack.add_layer(self.node.clone(), self.options.disable_outside_pointer_events);
        if let Some(parent) = &self.parent {
            stack.register_nested(parent, self.node.clone());
        }
        stack.assign_pointer_events(host);
        stack.disable_body_pointer_events(host);
    }

    /// Start reacting to outside pointer-down.
    pub fn arm(&mut self) {
        if self.mounted {
            self.armed = true;
        }
    }

    /// Remove the layer from `stack` and restore pointer-events.
    pub fn unmount<H: LayerHost<N> + ?Sized>(&mut self, stack: &mut LayerStack<N>, host: &mut H) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.armed = false;
        self.pending_touch = None;
        stack.remove_layer(&self.node);
        stack.assign_pointer_events(host);
        stack.restore_body_pointer_events(host);
    }

    /// Change whether the layer blocks pointer events outside it.
    pub fn set_disable_outside_pointer_events<H: LayerHost<N> + ?Sized>(
        &mut self,
        stack: &mut LayerStack<N>,
        host: &mut H,
        disable: bool,
    ) {
        self.options.disable_outside_pointer_events = disable;
        if !self.mounted {
            return;
        }
        if stack.is_pointer_blocking(&self.node) != disable {
            stack.set_pointer_blocking(&self.node, disable);
            stack.assign_pointer_events(host);
        }
        if disable {
            stack.disable_body_pointer_events(host);
        } else {
            stack.restore_body_pointer_events(host);
        }
    }

    /// Whether an interaction with `target` counts as outside this layer.
    ///
    /// Targets inside the layer, in a host top layer, detached from the
    /// document, inside an excluded element, or inside a nested layer are
    /// not outside.
    pub fn is_outside<H: LayerHost<N> + ?Sized>(
        &self,
        stack: &LayerStack<N>,
        host: &H,
        target: &N,
    ) -> bool {
        if host.is_in_top_layer(target) || !host.is_connected(target) {
            return false;
        }
        if host.contains(&self.node, target) {
            return false;
        }
        let excluded = self
            .options
            .excluded_elements
            .iter()
            .chain(stack.nested_layers(&self.node))
            .any(|e| host.contains(e, target));
        !excluded
    }

    /// Handle a document pointer-down. Returns whether the layer was dismissed.
    ///
    /// A touch press only records its target; the decision is made by the
    /// following [`on_click`](Self::on_click). A newer touch press replaces
    /// the pending one.
    pub fn on_pointer_down<H, D>(
        &mut self,
        stack: &LayerStack<N>,
        host: &H,
        handler: &mut D,
        event: &LayerPointerDown<N>,
    ) -> bool
    where
        H: LayerHost<N> + ?Sized,
        D: DismissHandler<N> + ?Sized,
    {
        if !self.mounted || !self.armed {
            return false;
        }
        let is_context_menu = event.button == 2
            || (event.button == 0 && self.options.platform.is_ctrl_key_pressed(event.modifiers));
        let press = PendingPress {
            target: event.target.clone(),
            pointer_type: event.pointer_type,
            is_context_menu,
        };
        if event.pointer_type == PointerType::Touch {
            self.pending_touch = Some(press);
            return false;
        }
        self.pointer_down_outside(stack, host, handler, press)
    }

    /// Handle the click that follows a touch press. Returns whether the layer
    /// was dismissed.
    pub fn on_click<H, D>(&mut self, stack: &LayerStack<N>, host: &H, handler: &mut D) -> bool
    where
        H: LayerHost<N> + ?Sized,
        D: DismissHandler<N> + ?Sized,
    {
        match self.pending_touch.take() {
            Some(press) if self.mounted => self.pointer_down_outside(stack, host, handler, press),
            _ => false,
        }
    }

    fn pointer_down_outside<H, D>(
        &self,
        stack: &LayerStack<N>,
        host: &H,
        handler: &mut D,
        press: PendingPress<N>,
    ) -> bool
    where
        H: LayerHost<N> + ?Sized,
        D: DismissHandler<N> + ?Sized,
    {
        if !self.is_outside(stack, host, &press.target) {
            return false;
        }
        if stack.is_below_pointer_blocking_layer(&self.node) {
            return false;
        }
        if !self.options.bypass_top_most_layer_check && !stack.is_top_most_layer(&self.node) {
            return false;
        }
        let mut event = InteractOutsideEvent::new(
            press.target,
            OutsideInteraction::PointerDown {
                pointer_type: press.pointer_type,
                is_context_menu: press.is_context_menu,
            },
        );
        handler.on_pointer_down_outside(&mut event);
        handler.on_interact_outside(&mut event);
        Self::dismiss(handler, event.default_prevented(), "pointer down outside")
    }

    /// Handle a document `focusin`. Returns whether the layer was dismissed.
    pub fn on_focus_in<H, D>(
        &mut self,
        stack: &LayerStack<N>,
        host: &H,
        handler: &mut D,
        target: &N,
    ) -> bool
    where
        H: LayerHost<N> + ?Sized,
        D: DismissHandler<N> + ?Sized,
    {
        if !self.mounted || !self.is_outside(stack, host, target) {
            return false;
        }
        let mut event = InteractOutsideEvent::new(target.clone(), OutsideInteraction::Focus);
        handler.on_focus_outside(&mut event);
        handler.on_interact_outside(&mut event);
        Self::dismiss(handler, event.default_prevented(), "focus outside")
    }

    /// Handle a document keydown. Only Escape on the top-most layer dismisses.
    ///
    /// Returns whether the layer was dismissed, in which case the key event
    /// should have its default prevented.
    pub fn on_key_down<D: DismissHandler<N> + ?Sized>(
        &mut self,
        stack: &LayerStack<N>,
        handler: &mut D,
        event: &KeyboardEvent,
    ) -> bool {
        if event.key != KeyCode::Escape || !self.mounted || !stack.is_top_most_layer(&self.node) {
            return false;
        }
        let mut escape = EscapeKeyDownEvent::default();
        handler.on_escape_key_down(&mut escape);
        Self::dismiss(handler, escape.default_prevented(), "escape")
    }

    fn dismiss<D: DismissHandler<N> + ?Sized>(
        handler: &mut D,
        prevented: bool,
        reason: &'static str,
    ) -> bool {
        if prevented {
            tracing::trace!(reason, "layer dismissal prevented");
            return false;
        }
        tracing::debug!(reason, "layer dismissed");
        handler.on_dismiss();
        true
    }
}
