//! Event sources and targets.

use std::fmt;

use crate::component::ComponentId;
use crate::prototype::PrototypeId;

/// The object an event originates from or is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    Component(ComponentId),
    Prototype(PrototypeId),
}

impl EventSource {
    /// The component, if this source is one.
    pub fn component(self) -> Option<ComponentId> {
        match self {
            Self::Component(id) => Some(id),
            Self::Prototype(_) => None,
        }
    }
}

impl From<ComponentId> for EventSource {
    fn from(id: ComponentId) -> Self {
        Self::Component(id)
    }
}

impl From<PrototypeId> for EventSource {
    fn from(id: PrototypeId) -> Self {
        Self::Prototype(id)
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(id) => write!(f, "component {id:?}"),
            Self::Prototype(id) => write!(f, "prototype {id}"),
        }
    }
}
