//! Terminal platform boundary: crossterm events to gesture inputs.
//!
//! crossterm reports modifiers as a combined bitmask without sides, so held
//! modifiers normalize to their left variants. Events with no gesture
//! counterpart (resize, focus, paste, mouse motion) map to `None`.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseEvent,
    MouseEventKind,
};

use super::gesture::{KeySet, KeystrokeInput, MouseButton, MouseClickInput, PlatformInput};
use super::key::Key;

/// Convert crossterm modifier flags into a key set.
pub fn modifier_keys(modifiers: KeyModifiers) -> KeySet {
    let mut keys = Vec::new();
    if modifiers.contains(KeyModifiers::ALT) {
        keys.push(Key::AltLeft);
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        keys.push(Key::ControlLeft);
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        keys.push(Key::ShiftLeft);
    }
    keys.into_iter().collect()
}

/// Convert a crossterm key code into a [`Key`].
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Esc => Key::Escape,
        KeyCode::F(n) if (1..=12).contains(&n) => Key::F(n),
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(ch) => Key::Char(ch.to_ascii_lowercase()),
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftShift => Key::ShiftLeft,
            ModifierKeyCode::RightShift => Key::ShiftRight,
            ModifierKeyCode::LeftControl => Key::ControlLeft,
            ModifierKeyCode::RightControl => Key::ControlRight,
            ModifierKeyCode::LeftAlt => Key::AltLeft,
            ModifierKeyCode::RightAlt => Key::AltRight,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

/// Convert a crossterm key event into a press or release.
///
/// Repeats count as presses. `BackTab` becomes `Tab` with shift held.
pub fn from_key_event(event: KeyEvent) -> Option<PlatformInput> {
    let key = key_from_code(event.code)?;
    let mut keys = modifier_keys(event.modifiers);
    if event.code == KeyCode::BackTab {
        keys = keys.with(Key::ShiftLeft);
    }
    let stroke = KeystrokeInput::new(key, keys);
    Some(match event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => PlatformInput::KeyPress(stroke),
        KeyEventKind::Release => PlatformInput::KeyRelease(stroke),
    })
}

/// Convert a crossterm mouse-down into a single click.
pub fn from_mouse_event(event: MouseEvent) -> Option<PlatformInput> {
    let button = match event.kind {
        MouseEventKind::Down(crossterm::event::MouseButton::Left) => MouseButton::Left,
        MouseEventKind::Down(crossterm::event::MouseButton::Right) => MouseButton::Right,
        MouseEventKind::Down(crossterm::event::MouseButton::Middle) => MouseButton::Middle,
        _ => return None,
    };
    let keys = modifier_keys(event.modifiers);
    Some(PlatformInput::Click(MouseClickInput::new(button, 1, keys)))
}

/// Convert any crossterm event.
pub fn from_event(event: Event) -> Option<PlatformInput> {
    match event {
        Event::Key(key) => from_key_event(key),
        Event::Mouse(mouse) => from_mouse_event(mouse),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;
    use crate::input::GestureInput;

    fn key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn modifiers_normalize_left() {
        let keys = modifier_keys(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(keys.contains(Key::ControlLeft));
        assert!(keys.contains(Key::ShiftLeft));
        assert!(!keys.contains(Key::AltLeft));
    }

    #[test]
    fn char_press() {
        let input = from_key_event(key_event(
            KeyCode::Char('A'),
            KeyModifiers::SHIFT,
            KeyEventKind::Press,
        ));
        let Some(PlatformInput::KeyPress(stroke)) = input else {
            panic!("expected a key press");
        };
        assert_eq!(stroke.key(), Key::Char('a'));
        assert!(stroke.has_shift_key());
    }

    #[test]
    fn back_tab_is_shift_tab() {
        let input = from_key_event(key_event(
            KeyCode::BackTab,
            KeyModifiers::NONE,
            KeyEventKind::Press,
        ));
        assert_eq!(
            input,
            Some(PlatformInput::KeyPress(KeystrokeInput::new(
                Key::Tab,
                [Key::ShiftLeft]
            )))
        );
    }

    #[test]
    fn release_and_repeat() {
        let release = from_key_event(key_event(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(matches!(release, Some(PlatformInput::KeyRelease(_))));
        let repeat = from_key_event(key_event(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
        ));
        assert!(matches!(repeat, Some(PlatformInput::KeyPress(_))));
    }

    #[test]
    fn modifier_key_codes() {
        assert_eq!(
            key_from_code(KeyCode::Modifier(ModifierKeyCode::RightAlt)),
            Some(Key::AltRight)
        );
        assert_eq!(
            key_from_code(KeyCode::Modifier(ModifierKeyCode::LeftSuper)),
            None
        );
    }

    #[test]
    fn unmapped_codes() {
        assert_eq!(key_from_code(KeyCode::F(20)), None);
        assert_eq!(key_from_code(KeyCode::CapsLock), None);
    }

    #[test]
    fn mouse_down_is_click() {
        let event = MouseEvent {
            kind: MouseEventKind::Down(crossterm::event::MouseButton::Right),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::ALT,
        };
        let Some(PlatformInput::Click(click)) = from_mouse_event(event) else {
            panic!("expected a click");
        };
        assert_eq!(click.button(), MouseButton::Right);
        assert_eq!(click.count(), 1);
        assert!(click.has_alt_key());
    }

    #[test]
    fn non_gesture_events() {
        assert_eq!(from_event(Event::Resize(80, 24)), None);
        assert_eq!(from_event(Event::FocusGained), None);
    }
}
