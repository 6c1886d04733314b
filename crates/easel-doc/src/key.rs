//! Key presses for keymap registration.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

/// Key identity, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Escape.
    Escape,
    /// A printable character.
    Char(char),
}

/// A key press: code plus held modifiers. Keymap lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key itself.
    pub code: KeyCode,
    /// Modifiers held.
    pub mods: Modifiers,
}

impl KeyPress {
    /// Press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::empty(),
        }
    }

    /// Press with Shift held.
    #[must_use]
    pub const fn shift(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::SHIFT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_compare_by_code_and_mods() {
        assert_eq!(KeyPress::new(KeyCode::Tab), KeyPress::new(KeyCode::Tab));
        assert_ne!(KeyPress::new(KeyCode::Tab), KeyPress::shift(KeyCode::Tab));
    }
}
