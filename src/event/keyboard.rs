//! Key press and release events.

use super::source::EventSource;
use crate::input::{GestureInput, Key, KeySet, KeystrokeInput};

/// Whether the key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Press,
    Release,
}

/// A keystroke delivered to a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyboardEvent {
    source: EventSource,
    target: EventSource,
    phase: KeyPhase,
    stroke: KeystrokeInput,
}

impl KeyboardEvent {
    pub fn press(source: impl Into<EventSource>, stroke: KeystrokeInput) -> Self {
        Self::new(source.into(), KeyPhase::Press, stroke)
    }

    pub fn release(source: impl Into<EventSource>, stroke: KeystrokeInput) -> Self {
        Self::new(source.into(), KeyPhase::Release, stroke)
    }

    fn new(source: EventSource, phase: KeyPhase, stroke: KeystrokeInput) -> Self {
        Self {
            source,
            target: source,
            phase,
            stroke,
        }
    }

    /// Copy of this event reported by a new source. The target is kept.
    pub fn with_source(&self, source: impl Into<EventSource>) -> Self {
        Self {
            source: source.into(),
            ..self.clone()
        }
    }

    pub fn source(&self) -> EventSource {
        self.source
    }

    pub fn target(&self) -> EventSource {
        self.target
    }

    pub fn phase(&self) -> KeyPhase {
        self.phase
    }

    pub fn key(&self) -> Key {
        self.stroke.key()
    }

    /// The input a press represents. Releases carry no input of their own.
    pub fn input(&self) -> Option<&KeystrokeInput> {
        match self.phase {
            KeyPhase::Press => Some(&self.stroke),
            KeyPhase::Release => None,
        }
    }
}

impl GestureInput for KeyboardEvent {
    fn keys(&self) -> &KeySet {
        self.stroke.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::PrototypeId;

    fn stroke() -> KeystrokeInput {
        KeystrokeInput::new(Key::Char('k'), [Key::ControlRight])
    }

    #[test]
    fn press_exposes_input() {
        let event = KeyboardEvent::press(PrototypeId::next(), stroke());
        assert_eq!(event.phase(), KeyPhase::Press);
        assert_eq!(event.input(), Some(&stroke()));
        assert!(event.has_control_key());
        assert_eq!(event.key(), Key::Char('k'));
    }

    #[test]
    fn release_has_no_input() {
        let event = KeyboardEvent::release(PrototypeId::next(), stroke());
        assert_eq!(event.phase(), KeyPhase::Release);
        assert!(event.input().is_none());
        assert!(event.has_control_key());
    }

    #[test]
    fn with_source_keeps_target() {
        let first = EventSource::from(PrototypeId::next());
        let second = EventSource::from(PrototypeId::next());
        let event = KeyboardEvent::press(first, stroke()).with_source(second);
        assert_eq!(event.source(), second);
        assert_eq!(event.target(), first);
    }
}
