// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item-level press and keyboard selection.

use trellis_collection::{Collection, Key};
use trellis_event_state::press::{Button, PointerId, PressResult, PressState};
use trellis_event_state::{KeyCode, KeyboardEvent, Modifiers, Platform, PointerType};
use trellis_selection::{SelectionManager, SelectionMode};

/// Options for a [`SelectableItem`].
#[derive(Clone, Debug)]
pub struct SelectableItemOptions {
    /// The item's key.
    pub key: Key,
    /// Disabled by the item itself, in addition to the collection's flag.
    pub disabled: bool,
    /// Select on pointer up (menus) instead of pointer down (listboxes).
    pub should_select_on_press_up: bool,
    /// With `should_select_on_press_up`, also select when the press started
    /// on another element, such as the trigger that opened the menu.
    pub allows_different_press_origin: bool,
    /// DOM focus stays on the collection container.
    pub should_use_virtual_focus: bool,
    /// Modifier conventions.
    pub platform: Platform,
}

impl SelectableItemOptions {
    /// Options for an enabled item that selects on pointer down.
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            disabled: false,
            should_select_on_press_up: false,
            allows_different_press_origin: false,
            should_use_virtual_focus: false,
            platform: Platform::default(),
        }
    }
}

/// A pointer event delivered to an item.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItemPointerEvent {
    /// Pointer id, for multi-touch; `None` for the primary pointer.
    pub pointer_id: Option<PointerId>,
    /// Device that produced the event.
    pub pointer_type: PointerType,
    /// Button index, `0` being the main button.
    pub button: Button,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl ItemPointerEvent {
    /// A main-button event from `pointer_type` with no modifiers.
    pub fn new(pointer_type: PointerType) -> Self {
        Self {
            pointer_id: None,
            pointer_type,
            button: 0,
            modifiers: Modifiers::empty(),
        }
    }

    /// The same event from pointer `pointer_id`.
    pub fn with_pointer_id(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = Some(pointer_id);
        self
    }

    /// The same event with `modifiers` held.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    fn is_main_mouse(&self) -> bool {
        self.pointer_type == PointerType::Mouse && self.button == 0
    }
}

/// Decides when a press or key press on an item changes the selection.
///
/// Listboxes select on mouse down, so a drag-select feels immediate. Menus
/// select on mouse up, so the press that opened the menu can be released over
/// an item to choose it. Touch and pen always wait for the click, since a
/// touch that turns into a scroll must not select.
///
/// Press origins are tracked in a [`PressState`] shared by all items of a
/// collection: a click only happens when the pointer went down and up on the
/// same item.
#[derive(Clone, Debug)]
pub struct SelectableItem {
    options: SelectableItemOptions,
}

impl SelectableItem {
    /// Create the handlers for one item.
    pub fn new(options: SelectableItemOptions) -> Self {
        Self { options }
    }

    /// The item's key.
    pub fn key(&self) -> &Key {
        &self.options.key
    }

    /// The options.
    pub fn options(&self) -> &SelectableItemOptions {
        &self.options
    }

    /// Whether the item is disabled, by itself or by the collection.
    pub fn is_disabled<C: Collection>(&self, manager: &SelectionManager<'_, C>) -> bool {
        self.options.disabled || manager.is_disabled(self.options.key.as_str())
    }

    /// Whether the item is selected.
    pub fn is_selected<C: Collection>(&self, manager: &SelectionManager<'_, C>) -> bool {
        manager.is_selected(self.options.key.as_str())
    }

    /// Whether the item holds the collection's focused key.
    pub fn is_focused<C: Collection>(&self, manager: &SelectionManager<'_, C>) -> bool {
        manager.focused_key() == Some(&self.options.key)
    }

    fn allows_selection<C: Collection>(&self, manager: &SelectionManager<'_, C>) -> bool {
        !self.is_disabled(manager) && manager.can_select_item(self.options.key.as_str())
    }

    /// `tabindex` for the item: the focused item is the collection's tab stop.
    pub fn tab_index<C: Collection>(&self, manager: &SelectionManager<'_, C>) -> Option<i32> {
        if self.options.should_use_virtual_focus {
            None
        } else if self.is_focused(manager) {
            Some(0)
        } else {
            Some(-1)
        }
    }

    /// Whether the host should move DOM focus onto the item's element.
    ///
    /// True when the item holds the focused key, the collection has focus,
    /// and the element is not already focused.
    pub fn should_focus_element<C: Collection>(
        &self,
        manager: &SelectionManager<'_, C>,
        element_is_active: bool,
    ) -> bool {
        !self.options.should_use_virtual_focus
            && self.is_focused(manager)
            && manager.is_focused()
            && !element_is_active
    }

    fn on_select<C: Collection>(
        &self,
        manager: &mut SelectionManager<'_, C>,
        pointer_type: Option<PointerType>,
        modifiers: Modifiers,
    ) {
        let key = self.options.key.as_str();
        match manager.selection_mode() {
            SelectionMode::None => {}
            SelectionMode::Single => manager.select(key, pointer_type),
            SelectionMode::Multiple => {
                if modifiers.contains(Modifiers::SHIFT) {
                    manager.extend_selection(key);
                } else if self.options.platform.is_ctrl_key_pressed(modifiers) {
                    manager.toggle_selection(key);
                } else {
                    manager.select(key, pointer_type);
                }
            }
        }
    }

    /// Handle a pointer down on the item.
    pub fn on_pointer_down<C: Collection>(
        &self,
        manager: &mut SelectionManager<'_, C>,
        presses: &mut PressState<Key>,
        event: &ItemPointerEvent,
    ) {
        presses.on_down(
            event.pointer_id,
            event.pointer_type,
            event.button,
            self.options.key.clone(),
        );
        if !self.allows_selection(manager) {
            tracing::trace!(key = %self.options.key, "press on unselectable item");
            return;
        }
        if event.is_main_mouse() && !self.options.should_select_on_press_up {
            self.on_select(manager, Some(event.pointer_type), event.modifiers);
        }
    }

    /// Handle a pointer up on the item; a completed press also acts as the click.
    ///
    /// Returns whether the release completed a press on this item.
    pub fn on_pointer_up<C: Collection>(
        &self,
        manager: &mut SelectionManager<'_, C>,
        presses: &mut PressState<Key>,
        event: &ItemPointerEvent,
    ) -> bool {
        let down_type = match presses.on_up(event.pointer_id, event.button, &self.options.key) {
            PressResult::Press(press) => Some(press.pointer_type),
            PressResult::Suppressed(_) => None,
        };
        let clicked = down_type.is_some();
        if !self.allows_selection(manager) {
            return clicked;
        }

        if event.is_main_mouse()
            && self.options.should_select_on_press_up
            && self.options.allows_different_press_origin
        {
            self.on_select(manager, Some(event.pointer_type), event.modifiers);
        }

        if let Some(down_type) = down_type
            && ((self.options.should_select_on_press_up
                && !self.options.allows_different_press_origin)
                || down_type != PointerType::Mouse)
        {
            self.on_select(manager, Some(down_type), event.modifiers);
        }
        clicked
    }

    /// Handle `pointercancel`: the press of that pointer no longer counts.
    pub fn on_pointer_cancel(&self, presses: &mut PressState<Key>, event: &ItemPointerEvent) {
        if presses.cancel(event.pointer_id) {
            tracing::trace!(key = %self.options.key, "press canceled");
        }
    }

    /// Handle a key press on the item; returns whether it was consumed.
    ///
    /// Enter and Space select. With the non-contiguous selection modifier held
    /// they toggle instead.
    pub fn on_key_down<C: Collection>(
        &self,
        manager: &mut SelectionManager<'_, C>,
        event: &KeyboardEvent,
    ) -> bool {
        if !matches!(event.key, KeyCode::Enter | KeyCode::Space) {
            return false;
        }
        if !self.allows_selection(manager) {
            return false;
        }
        if self
            .options
            .platform
            .is_non_contiguous_selection_modifier(event.modifiers)
        {
            manager.toggle_selection(self.options.key.as_str());
        } else {
            self.on_select(manager, None, event.modifiers);
        }
        true
    }

    /// Handle a mouse down; returns whether to cancel it so a disabled item
    /// does not take focus.
    pub fn on_mouse_down<C: Collection>(&self, manager: &SelectionManager<'_, C>) -> bool {
        self.is_disabled(manager)
    }

    /// Handle the item's element receiving focus.
    pub fn on_focus<C: Collection>(
        &self,
        manager: &mut SelectionManager<'_, C>,
        target_is_item: bool,
    ) {
        if target_is_item {
            manager.set_focused_key(Some(self.options.key.clone()), None);
        }
    }
}
