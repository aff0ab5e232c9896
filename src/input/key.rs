//! Physical keys and browser key-code decoding.

use std::fmt;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A physical key. Modifiers distinguish their left and right variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    AltLeft,
    AltRight,
    ControlLeft,
    ControlRight,
    ShiftLeft,
    ShiftRight,
    Backspace,
    Tab,
    Enter,
    Escape,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    Insert,
    Delete,
    /// Function key `F1` through `F12`.
    F(u8),
    /// A printable character, lowercase for letters.
    Char(char),
}

impl Key {
    /// Whether this is one of the six modifier keys.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::AltLeft
                | Self::AltRight
                | Self::ControlLeft
                | Self::ControlRight
                | Self::ShiftLeft
                | Self::ShiftRight
        )
    }

    /// Decode a browser key code.
    ///
    /// `location` is the DOM key location; `2` selects the right-hand variant
    /// of a modifier, anything else the left. Unknown codes yield `None`.
    pub fn from_web_code(code: u32, location: u32) -> Option<Key> {
        let right = location == 2;
        let key = match code {
            8 => Self::Backspace,
            9 => Self::Tab,
            13 => Self::Enter,
            16 if right => Self::ShiftRight,
            16 => Self::ShiftLeft,
            17 if right => Self::ControlRight,
            17 => Self::ControlLeft,
            18 if right => Self::AltRight,
            18 => Self::AltLeft,
            27 => Self::Escape,
            32 => Self::Space,
            33 => Self::PageUp,
            34 => Self::PageDown,
            35 => Self::End,
            36 => Self::Home,
            37 => Self::Left,
            38 => Self::Up,
            39 => Self::Right,
            40 => Self::Down,
            45 => Self::Insert,
            46 => Self::Delete,
            48..=57 | 65..=90 => {
                let ch = char::from_u32(code)?.to_ascii_lowercase();
                Self::Char(ch)
            }
            112..=123 => Self::F((code - 111) as u8),
            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F(n) => write!(f, "F{n}"),
            Self::Char(ch) => write!(f, "{ch}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers() {
        assert!(Key::AltLeft.is_modifier());
        assert!(Key::ShiftRight.is_modifier());
        assert!(!Key::Tab.is_modifier());
        assert!(!Key::Char('a').is_modifier());
    }

    #[test]
    fn web_code_modifier_location() {
        assert_eq!(Key::from_web_code(16, 1), Some(Key::ShiftLeft));
        assert_eq!(Key::from_web_code(16, 2), Some(Key::ShiftRight));
        assert_eq!(Key::from_web_code(17, 0), Some(Key::ControlLeft));
        assert_eq!(Key::from_web_code(18, 2), Some(Key::AltRight));
    }

    #[test]
    fn web_code_printable() {
        assert_eq!(Key::from_web_code(65, 0), Some(Key::Char('a')));
        assert_eq!(Key::from_web_code(90, 0), Some(Key::Char('z')));
        assert_eq!(Key::from_web_code(48, 0), Some(Key::Char('0')));
    }

    #[test]
    fn web_code_navigation_and_function() {
        assert_eq!(Key::from_web_code(9, 0), Some(Key::Tab));
        assert_eq!(Key::from_web_code(37, 0), Some(Key::Left));
        assert_eq!(Key::from_web_code(112, 0), Some(Key::F(1)));
        assert_eq!(Key::from_web_code(123, 0), Some(Key::F(12)));
    }

    #[test]
    fn web_code_unknown() {
        assert_eq!(Key::from_web_code(0, 0), None);
        assert_eq!(Key::from_web_code(250, 0), None);
    }

    #[test]
    fn display() {
        assert_eq!(Key::F(5).to_string(), "F5");
        assert_eq!(Key::Char('q').to_string(), "q");
        assert_eq!(Key::ControlLeft.to_string(), "ControlLeft");
    }
}
