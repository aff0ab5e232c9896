//! Action events and their command semantics.

use std::fmt;

use super::source::EventSource;
use crate::error::{Error, Result};
use crate::input::MouseClickInput;

/// Force of an ordinary single activation.
pub const DEFAULT_FORCE: u32 = 1;
/// Option of an ordinary activation (primary button).
pub const DEFAULT_OPTION: u32 = 0;

/// Intent derived from an action's force and option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Select,
    Info,
    Activate,
}

impl Command {
    /// `force == 1` selects (option 0) or asks for info (any other option);
    /// every other force, including 0, activates.
    pub fn from_force_option(force: u32, option: u32) -> Self {
        match (force, option) {
            (DEFAULT_FORCE, DEFAULT_OPTION) => Self::Select,
            (DEFAULT_FORCE, _) => Self::Info,
            _ => Self::Activate,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "select",
            Self::Info => "info",
            Self::Activate => "activate",
        })
    }
}

/// A request to perform an action.
///
/// The target is the object the action was originally aimed at; copies made
/// with a new source keep it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionEvent {
    source: EventSource,
    target: EventSource,
    force: u32,
    option: u32,
}

fn non_negative(name: &str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(Error::invalid_argument(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    u32::try_from(value).map_err(|_| Error::invalid_argument(format!("{name} {value} is too large")))
}

impl ActionEvent {
    /// An ordinary action with default force and option.
    pub fn new(source: impl Into<EventSource>) -> Self {
        let source = source.into();
        Self {
            source,
            target: source,
            force: DEFAULT_FORCE,
            option: DEFAULT_OPTION,
        }
    }

    /// An action with explicit force and option, targeting its source.
    pub fn with_force_option(source: impl Into<EventSource>, force: i64, option: i64) -> Result<Self> {
        let source = source.into();
        Self::with_target(source, source, force, option)
    }

    /// An action aimed at `target` but reported by `source`.
    pub fn with_target(
        source: impl Into<EventSource>,
        target: impl Into<EventSource>,
        force: i64,
        option: i64,
    ) -> Result<Self> {
        Ok(Self {
            source: source.into(),
            target: target.into(),
            force: non_negative("force", force)?,
            option: non_negative("option", option)?,
        })
    }

    /// The action a mouse click performs: click count becomes force, button becomes option.
    pub fn from_click(source: impl Into<EventSource>, click: &MouseClickInput) -> Self {
        let source = source.into();
        Self {
            source,
            target: source,
            force: click.count(),
            option: click.button().option(),
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

    pub fn force(&self) -> u32 {
        self.force
    }

    pub fn option(&self) -> u32 {
        self.option
    }

    pub fn command(&self) -> Command {
        Command::from_force_option(self.force, self.option)
    }
}
