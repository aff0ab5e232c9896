//! Pilot: programmatic interaction with a session.
//!
//! The `Pilot` wraps a [`Session`] and provides methods to simulate user
//! input (key presses, clicks, value changes, drops, browser events) and to
//! depict the session for assertions.

use crate::component::ComponentId;
use crate::error::Result;
use crate::input::{Key, KeySet, KeystrokeInput, MouseButton, MouseClickInput, PlatformInput};
use crate::platform::PlatformEvent;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A session driver for testing.
///
/// # Examples
///
/// ```
/// use guise::component::Component;
/// use guise::input::Key;
/// use guise::testing::Pilot;
///
/// let mut pilot = Pilot::web().unwrap();
/// let root = pilot.session_mut().set_root(Component::panel());
/// let ok = pilot
///     .session_mut()
///     .tree_mut()
///     .add_child(root, Component::button("OK"))
///     .unwrap();
/// pilot.press_key(Key::Tab).unwrap();
/// assert_eq!(pilot.focused(), Some(ok));
/// ```
#[derive(Debug)]
pub struct Pilot {
    session: Session,
}

impl Pilot {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// A pilot for a default web session.
    pub fn web() -> Result<Self> {
        Session::web().map(Self::new)
    }

    /// A pilot for a default console session.
    pub fn console() -> Result<Self> {
        Session::console().map(Self::new)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Press a key with no modifiers, aimed at the focused component.
    pub fn press_key(&mut self, key: Key) -> Result<()> {
        self.press_key_with(key, KeySet::new())
    }

    /// Press a key while holding `modifiers`.
    pub fn press_key_with(&mut self, key: Key, modifiers: impl Into<KeySet>) -> Result<()> {
        let stroke = KeystrokeInput::new(key, modifiers);
        self.session
            .handle_event(PlatformInput::KeyPress(stroke).into())
    }

    pub fn release_key(&mut self, key: Key) -> Result<()> {
        self.session
            .handle_event(PlatformInput::KeyRelease(KeystrokeInput::plain(key)).into())
    }

    /// Press one character key per `char` in `text`.
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        text.chars().try_for_each(|c| self.press_key(Key::Char(c)))
    }

    /// A single left click on a component.
    pub fn click(&mut self, id: ComponentId) -> Result<()> {
        self.click_with(id, MouseButton::Left, 1)
    }

    pub fn click_with(&mut self, id: ComponentId, button: MouseButton, count: u32) -> Result<()> {
        let click = MouseClickInput::new(button, count, KeySet::new());
        self.session.handle_event(PlatformEvent::Input {
            target: Some(id),
            input: PlatformInput::Click(click),
        })
    }

    /// Submit a new value for a text control.
    pub fn change(&mut self, id: ComponentId, value: Option<&str>) -> Result<()> {
        self.session.handle_event(PlatformEvent::Change {
            target: id,
            value: value.map(str::to_owned),
        })
    }

    pub fn drag_and_drop(&mut self, source: ComponentId, target: ComponentId) -> Result<()> {
        self.session
            .handle_event(PlatformEvent::Drop { source, target })
    }

    /// Deliver an event as a browser would send it.
    pub fn web_event(&mut self, json: &str) -> Result<()> {
        self.session.handle_web_json(json)
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn focused(&self) -> Option<ComponentId> {
        self.session.focused()
    }

    // ── Depiction ────────────────────────────────────────────────────

    /// Depict the session's tree in its platform's format.
    pub fn depict(&mut self) -> Result<String> {
        self.session.depict_to_string()
    }
}
