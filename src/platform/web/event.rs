//! Web platform events: JSON messages posted by the browser, decoded with
//! `serde_json` and resolved against the component tree.
//!
//! Components are addressed by the depict ids written into the markup.
//! Mouse buttons use DOM numbering (0 left, 1 middle, 2 right).

use serde::{Deserialize, Serialize};

use crate::component::{ComponentId, ComponentTree};
use crate::error::{Error, Result};
use crate::event::DEFAULT_FORCE;
use crate::input::{Key, KeySet, KeystrokeInput, MouseButton, MouseClickInput, PlatformInput};
use crate::platform::PlatformEvent;

/// Failure to turn a browser message into a [`PlatformEvent`].
#[derive(Debug, thiserror::Error)]
pub enum WebEventError {
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown component {0:?}")]
    UnknownComponent(String),
    #[error("unknown key code {0}")]
    UnknownKey(u32),
    #[error("unknown mouse button {0}")]
    UnknownButton(u8),
}

impl From<WebEventError> for Error {
    fn from(err: WebEventError) -> Self {
        Error::InvalidArgument(err.to_string())
    }
}

/// A key message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebKey {
    /// Depict id of the focused component, if the browser knows it.
    #[serde(default)]
    pub component: Option<String>,
    pub code: u32,
    /// DOM key location; 2 is the right-hand modifier.
    #[serde(default)]
    pub location: u32,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub shift_key: bool,
}

/// A click message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebClick {
    pub component: String,
    #[serde(default)]
    pub button: u8,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub shift_key: bool,
}

fn one() -> u32 {
    1
}

fn default_force() -> i64 {
    i64::from(DEFAULT_FORCE)
}

/// A message posted by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WebPlatformEvent {
    Action {
        component: String,
        #[serde(default = "default_force")]
        force: i64,
        #[serde(default)]
        option: i64,
    },
    KeyPress(WebKey),
    KeyRelease(WebKey),
    Click(WebClick),
    Change {
        component: String,
        value: Option<String>,
    },
    Drop {
        source: String,
        target: String,
    },
}

impl WebPlatformEvent {
    pub fn from_json(json: &str) -> std::result::Result<Self, WebEventError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve depict ids and key codes into a platform event.
    pub fn resolve(&self, tree: &ComponentTree) -> Result<PlatformEvent> {
        let event = match self {
            Self::Action {
                component,
                force,
                option,
            } => PlatformEvent::Action {
                target: lookup(tree, component)?,
                force: *force,
                option: *option,
            },
            Self::KeyPress(key) => PlatformEvent::Input {
                target: key.component.as_deref().map(|c| lookup(tree, c)).transpose()?,
                input: PlatformInput::KeyPress(key.keystroke()?),
            },
            Self::KeyRelease(key) => PlatformEvent::Input {
                target: key.component.as_deref().map(|c| lookup(tree, c)).transpose()?,
                input: PlatformInput::KeyRelease(key.keystroke()?),
            },
            Self::Click(click) => PlatformEvent::Input {
                target: Some(lookup(tree, &click.component)?),
                input: PlatformInput::Click(click.input()?),
            },
            Self::Change { component, value } => PlatformEvent::Change {
                target: lookup(tree, component)?,
                value: value.clone(),
            },
            Self::Drop { source, target } => PlatformEvent::Drop {
                source: lookup(tree, source)?,
                target: lookup(tree, target)?,
            },
        };
        Ok(event)
    }
}

impl WebKey {
    fn keystroke(&self) -> std::result::Result<KeystrokeInput, WebEventError> {
        let key = Key::from_web_code(self.code, self.location)
            .ok_or(WebEventError::UnknownKey(self.code))?;
        Ok(KeystrokeInput::new(
            key,
            modifiers(self.alt_key, self.ctrl_key, self.shift_key),
        ))
    }
}

impl WebClick {
    fn input(&self) -> std::result::Result<MouseClickInput, WebEventError> {
        let button = match self.button {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            other => return Err(WebEventError::UnknownButton(other)),
        };
        Ok(MouseClickInput::new(
            button,
            self.count,
            modifiers(self.alt_key, self.ctrl_key, self.shift_key),
        ))
    }
}

/// Browser modifier flags do not say which side was held; they map to the
/// left keys.
fn modifiers(alt: bool, ctrl: bool, shift: bool) -> KeySet {
    [
        (alt, Key::AltLeft),
        (ctrl, Key::ControlLeft),
        (shift, Key::ShiftLeft),
    ]
    .into_iter()
    .filter_map(|(down, key)| down.then_some(key))
    .collect()
}

fn lookup(tree: &ComponentTree, depict_id: &str) -> std::result::Result<ComponentId, WebEventError> {
    tree.find_by_depict_id(depict_id)
        .ok_or_else(|| WebEventError::UnknownComponent(depict_id.to_owned()))
}
