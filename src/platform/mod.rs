//! Platforms: interchangeable depiction strategies for one component tree.
//!
//! A [`Platform`] pairs a [`DepictorRegistry`] with a [`DepictionTracker`].
//! The web platform writes XHTML; the console platform writes a text outline.
//! Both receive user input as [`PlatformEvent`]s.

pub mod console;
pub mod context;
pub mod depictor;
pub mod environment;
pub mod registry;
pub mod tracker;
pub mod web;

use std::io::Write;

use crate::component::{ComponentId, ComponentTree};
use crate::error::{Error, Result};
use crate::input::PlatformInput;

pub use console::TextDepictContext;
pub use context::{DepictContext, ElementStack, OpenElement};
pub use depictor::{DepictPass, Depictor};
pub use environment::{Brand, ClientProduct, Environment};
pub use registry::{ComponentMatcher, ComponentPredicate, DepictorFactory, DepictorRegistry};
pub use tracker::{DepictionTracker, StaleSet};
pub use web::XhtmlDepictContext;

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// User input as delivered by a platform, addressed to components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A gesture. Untargeted input goes to the focused component.
    Input {
        target: Option<ComponentId>,
        input: PlatformInput,
    },
    /// An explicit action request, such as a submitted button.
    Action {
        target: ComponentId,
        force: i64,
        option: i64,
    },
    /// A new value for a text control.
    Change {
        target: ComponentId,
        value: Option<String>,
    },
    /// `source` dragged onto `target`.
    Drop {
        source: ComponentId,
        target: ComponentId,
    },
}

impl From<PlatformInput> for PlatformEvent {
    fn from(input: PlatformInput) -> Self {
        Self::Input {
            target: None,
            input,
        }
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Output format of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    Web,
    Console,
}

impl PlatformKind {
    /// A fresh context of this platform's format.
    pub fn context<'w>(self, writer: &'w mut dyn Write, pretty_print: bool) -> Box<dyn DepictContext + 'w> {
        match self {
            Self::Web => Box::new(XhtmlDepictContext::new(writer).with_pretty_print(pretty_print)),
            Self::Console => Box::new(TextDepictContext::new(writer)),
        }
    }
}

/// A depictor registry and the bindings it produced.
#[derive(Debug)]
pub struct Platform {
    kind: PlatformKind,
    registry: DepictorRegistry,
    tracker: DepictionTracker,
}

impl Platform {
    pub fn new(kind: PlatformKind, registry: DepictorRegistry) -> Self {
        Self {
            kind,
            registry,
            tracker: DepictionTracker::new(),
        }
    }

    pub fn web() -> Self {
        Self::new(PlatformKind::Web, web::registry())
    }

    pub fn console() -> Self {
        Self::new(PlatformKind::Console, console::registry())
    }

    pub fn kind(&self) -> PlatformKind {
        self.kind
    }

    pub fn registry(&self) -> &DepictorRegistry {
        &self.registry
    }

    /// Register additional depictors. Entries added later match after the
    /// built-in ones.
    pub fn registry_mut(&mut self) -> &mut DepictorRegistry {
        &mut self.registry
    }

    pub fn tracker(&self) -> &DepictionTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut DepictionTracker {
        &mut self.tracker
    }

    /// Depict the subtree rooted at `id` into `context`.
    pub fn depict(
        &mut self,
        tree: &ComponentTree,
        id: ComponentId,
        context: &mut dyn DepictContext,
        environment: &Environment,
    ) -> Result<()> {
        let span = tracing::debug_span!(target: "guise::depict", "render", platform = self.registry.platform());
        let _guard = span.enter();
        DepictPass::new(tree, &self.registry, &mut self.tracker, context, environment).depict(id)
    }

    /// Depict the subtree rooted at `id` and return the output as a string.
    pub fn depict_to_string(
        &mut self,
        tree: &ComponentTree,
        id: ComponentId,
        environment: &Environment,
        pretty_print: bool,
    ) -> Result<String> {
        let mut buffer = Vec::new();
        {
            let mut context = self.kind.context(&mut buffer, pretty_print);
            self.depict(tree, id, context.as_mut(), environment)?;
        }
        String::from_utf8(buffer)
            .map_err(|err| Error::invalid_state(format!("depicted output is not utf-8: {err}")))
    }
}
