//! Gesture inputs: keystrokes and mouse clicks together with the modifier
//! keys held at the time.

use std::collections::BTreeSet;
use std::fmt;

use super::key::Key;

// ---------------------------------------------------------------------------
// KeySet
// ---------------------------------------------------------------------------

/// An immutable set of keys held down during a gesture.
///
/// The set is copied on construction and exposes no mutating methods, so the
/// keys of a recognized gesture can never change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeySet(BTreeSet<Key>);

impl KeySet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.0.iter().copied()
    }

    /// A new set with `key` added.
    pub fn with(&self, key: Key) -> Self {
        let mut keys = self.0.clone();
        keys.insert(key);
        Self(keys)
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Key; N]> for KeySet {
    fn from(keys: [Key; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl fmt::Display for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GestureInput
// ---------------------------------------------------------------------------

/// Input recognized from a user gesture, with the modifier keys held.
pub trait GestureInput {
    /// Keys held down when the gesture occurred.
    fn keys(&self) -> &KeySet;

    fn has_alt_key(&self) -> bool {
        let keys = self.keys();
        keys.contains(Key::AltLeft) || keys.contains(Key::AltRight)
    }

    fn has_control_key(&self) -> bool {
        let keys = self.keys();
        keys.contains(Key::ControlLeft) || keys.contains(Key::ControlRight)
    }

    fn has_shift_key(&self) -> bool {
        let keys = self.keys();
        keys.contains(Key::ShiftLeft) || keys.contains(Key::ShiftRight)
    }
}

/// A bare modifier-key gesture with no further payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModifierGesture {
    keys: KeySet,
}

impl ModifierGesture {
    pub fn new(keys: impl Into<KeySet>) -> Self {
        Self { keys: keys.into() }
    }
}

impl GestureInput for ModifierGesture {
    fn keys(&self) -> &KeySet {
        &self.keys
    }
}

// ---------------------------------------------------------------------------
// KeystrokeInput
// ---------------------------------------------------------------------------

/// A single key whose state changed, plus the modifiers held.
///
/// Equality and hashing cover both the key and the modifier set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeystrokeInput {
    key: Key,
    keys: KeySet,
}

impl KeystrokeInput {
    pub fn new(key: Key, keys: impl Into<KeySet>) -> Self {
        Self {
            key,
            keys: keys.into(),
        }
    }

    /// A keystroke with no modifiers held.
    pub fn plain(key: Key) -> Self {
        Self::new(key, KeySet::new())
    }

    /// The key whose state changed.
    pub fn key(&self) -> Key {
        self.key
    }
}

impl GestureInput for KeystrokeInput {
    fn keys(&self) -> &KeySet {
        &self.keys
    }
}

impl fmt::Display for KeystrokeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.keys, self.key)
        }
    }
}

// ---------------------------------------------------------------------------
// MouseClickInput
// ---------------------------------------------------------------------------

/// Mouse button of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// The action option a click with this button carries.
    pub fn option(self) -> u32 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
        }
    }
}

/// A click of `count` consecutive presses of one button.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MouseClickInput {
    button: MouseButton,
    count: u32,
    keys: KeySet,
}

impl MouseClickInput {
    pub fn new(button: MouseButton, count: u32, keys: impl Into<KeySet>) -> Self {
        Self {
            button,
            count,
            keys: keys.into(),
        }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    /// Number of consecutive clicks (1 for a single click).
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl GestureInput for MouseClickInput {
    fn keys(&self) -> &KeySet {
        &self.keys
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Any gesture input that can be bound to a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Input {
    Keystroke(KeystrokeInput),
    MouseClick(MouseClickInput),
}

impl GestureInput for Input {
    fn keys(&self) -> &KeySet {
        match self {
            Self::Keystroke(stroke) => stroke.keys(),
            Self::MouseClick(click) => click.keys(),
        }
    }
}

impl From<KeystrokeInput> for Input {
    fn from(stroke: KeystrokeInput) -> Self {
        Self::Keystroke(stroke)
    }
}

impl From<MouseClickInput> for Input {
    fn from(click: MouseClickInput) -> Self {
        Self::MouseClick(click)
    }
}

// ---------------------------------------------------------------------------
// PlatformInput
// ---------------------------------------------------------------------------

/// Raw input as delivered by a platform boundary, before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformInput {
    KeyPress(KeystrokeInput),
    KeyRelease(KeystrokeInput),
    Click(MouseClickInput),
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    // ── Modifier queries ─────────────────────────────────────────────

    #[test]
    fn alt_left_only() {
        let gesture = ModifierGesture::new([Key::AltLeft]);
        assert!(gesture.has_alt_key());
        assert!(!gesture.has_control_key());
        assert!(!gesture.has_shift_key());
    }

    #[test]
    fn empty_keys() {
        let gesture = ModifierGesture::new(KeySet::new());
        assert!(!gesture.has_alt_key());
        assert!(!gesture.has_control_key());
        assert!(!gesture.has_shift_key());
    }

    #[test]
    fn right_variants_count() {
        let gesture = ModifierGesture::new([Key::ControlRight, Key::ShiftRight]);
        assert!(gesture.has_control_key());
        assert!(gesture.has_shift_key());
        assert!(!gesture.has_alt_key());
    }

    // ── KeySet ───────────────────────────────────────────────────────

    #[test]
    fn key_set_copies_on_with() {
        let original = KeySet::from([Key::ShiftLeft]);
        let extended = original.with(Key::AltLeft);
        assert_eq!(original.len(), 1);
        assert_eq!(extended.len(), 2);
    }

    #[test]
    fn key_set_display() {
        let keys = KeySet::from([Key::ShiftLeft, Key::ControlLeft]);
        assert_eq!(keys.to_string(), "ControlLeft+ShiftLeft");
    }

    // ── Keystroke equality ───────────────────────────────────────────

    #[test]
    fn keystroke_equal_and_same_hash() {
        let a = KeystrokeInput::new(Key::Char('s'), [Key::ControlLeft]);
        let b = KeystrokeInput::new(Key::Char('s'), [Key::ControlLeft]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn keystroke_different_key_unequal() {
        let a = KeystrokeInput::new(Key::Char('s'), [Key::ControlLeft]);
        let b = KeystrokeInput::new(Key::Char('t'), [Key::ControlLeft]);
        assert_ne!(a, b);
    }

    #[test]
    fn keystroke_different_modifiers_unequal() {
        let a = KeystrokeInput::new(Key::Tab, KeySet::new());
        let b = KeystrokeInput::new(Key::Tab, [Key::ShiftLeft]);
        assert_ne!(a, b);
    }

    #[test]
    fn keystroke_display() {
        assert_eq!(KeystrokeInput::plain(Key::Enter).to_string(), "Enter");
        assert_eq!(
            KeystrokeInput::new(Key::Tab, [Key::ShiftLeft]).to_string(),
            "ShiftLeft+Tab"
        );
    }

    // ── Mouse clicks ─────────────────────────────────────────────────

    #[test]
    fn button_options() {
        assert_eq!(MouseButton::Left.option(), 0);
        assert_eq!(MouseButton::Right.option(), 1);
        assert_eq!(MouseButton::Middle.option(), 2);
    }

    #[test]
    fn click_is_gesture() {
        let click = MouseClickInput::new(MouseButton::Left, 2, [Key::AltRight]);
        assert_eq!(click.count(), 2);
        assert!(click.has_alt_key());
        let input = Input::from(click);
        assert!(input.has_alt_key());
    }
}
