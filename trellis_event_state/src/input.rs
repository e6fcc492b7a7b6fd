// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard, pointer, and platform vocabulary.

bitflags::bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows.
        const META  = 0b0000_1000;
    }
}

/// Logical key of a keyboard event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// `PageUp`.
    PageUp,
    /// `PageDown`.
    PageDown,
    /// `Enter`.
    Enter,
    /// The space bar.
    Space,
    /// `Escape`.
    Escape,
    /// `Tab`.
    Tab,
    /// A key producing a single printable character.
    Character(char),
    /// Any other named key (function keys, media keys, ...).
    Other,
}

impl KeyCode {
    /// Parse a DOM-style `KeyboardEvent.key` name.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// The character this key types, if it types exactly one.
    pub fn typed_char(self) -> Option<char> {
        match self {
            Self::Character(c) => Some(c),
            Self::Space => Some(' '),
            _ => None,
        }
    }
}

/// A keyboard event as seen by interaction handlers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The logical key.
    pub key: KeyCode,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// A key press without modifiers.
    pub const fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// The same key press with `modifiers` held.
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether Shift is held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Device that produced a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerType {
    /// A mouse or trackpad.
    #[default]
    Mouse,
    /// A finger on a touch screen.
    Touch,
    /// A stylus.
    Pen,
}

/// Host operating-system family, which decides modifier conventions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    /// macOS and iOS: Command is the primary modifier.
    Apple,
    /// Everything else: Control is the primary modifier.
    #[default]
    Other,
}

impl Platform {
    /// Whether the platform's primary shortcut modifier (Cmd or Ctrl) is held.
    pub fn is_ctrl_key_pressed(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Apple => modifiers.contains(Modifiers::META),
            Self::Other => modifiers.contains(Modifiers::CTRL),
        }
    }

    /// Whether the modifier that adds to a selection without replacing it is held.
    ///
    /// Option on Apple platforms, Control elsewhere.
    pub fn is_non_contiguous_selection_modifier(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Apple => modifiers.contains(Modifiers::ALT),
            Self::Other => modifiers.contains(Modifiers::CTRL),
        }
    }
}

/// Reading direction of the surrounding content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_parse() {
        assert_eq!(KeyCode::from_key_name("ArrowDown"), KeyCode::ArrowDown);
        assert_eq!(KeyCode::from_key_name(" "), KeyCode::Space);
        assert_eq!(KeyCode::from_key_name("a"), KeyCode::Character('a'));
        assert_eq!(KeyCode::from_key_name("é"), KeyCode::Character('é'));
        assert_eq!(KeyCode::from_key_name("F5"), KeyCode::Other);
        assert_eq!(KeyCode::Space.typed_char(), Some(' '));
        assert_eq!(KeyCode::Tab.typed_char(), None);
    }

    #[test]
    fn platform_modifier_conventions() {
        assert!(Platform::Apple.is_ctrl_key_pressed(Modifiers::META));
        assert!(!Platform::Apple.is_ctrl_key_pressed(Modifiers::CTRL));
        assert!(Platform::Other.is_ctrl_key_pressed(Modifiers::CTRL));
        assert!(Platform::Apple.is_non_contiguous_selection_modifier(Modifiers::ALT));
        assert!(Platform::Other.is_non_contiguous_selection_modifier(Modifiers::CTRL));
    }
}
