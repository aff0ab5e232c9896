//! Depictor registry: maps components to the depictor that draws them.
//!
//! Entries are checked in registration order and the first match wins, so
//! register narrow predicates before the kind entries they refine.

use std::fmt;
use std::sync::Arc;

use crate::component::{Component, ComponentKind};
use crate::platform::depictor::Depictor;

/// Builds the depictor for a matched component.
pub type DepictorFactory = Arc<dyn Fn(&Component) -> Arc<dyn Depictor> + Send + Sync>;

/// Predicate used by [`ComponentMatcher::Predicate`].
pub type ComponentPredicate = Arc<dyn Fn(&Component) -> bool + Send + Sync>;

/// Which components a registry entry applies to.
#[derive(Clone)]
pub enum ComponentMatcher {
    Kind(ComponentKind),
    Predicate(ComponentPredicate),
}

impl ComponentMatcher {
    pub fn matches(&self, component: &Component) -> bool {
        match self {
            Self::Kind(kind) => component.kind() == *kind,
            Self::Predicate(predicate) => predicate(component),
        }
    }
}

impl fmt::Debug for ComponentMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Ordered list of matcher and factory pairs for one platform.
pub struct DepictorRegistry {
    platform: &'static str,
    entries: Vec<(ComponentMatcher, DepictorFactory)>,
}

impl DepictorRegistry {
    pub fn new(platform: &'static str) -> Self {
        Self {
            platform,
            entries: Vec::new(),
        }
    }

    pub fn platform(&self) -> &'static str {
        self.platform
    }

    pub fn register(&mut self, matcher: ComponentMatcher, factory: DepictorFactory) -> &mut Self {
        self.entries.push((matcher, factory));
        self
    }

    /// Share one depictor instance among every component of a kind.
    pub fn register_kind(&mut self, kind: ComponentKind, depictor: Arc<dyn Depictor>) -> &mut Self {
        self.register(ComponentMatcher::Kind(kind), shared(depictor))
    }

    pub fn register_predicate<P>(&mut self, predicate: P, depictor: Arc<dyn Depictor>) -> &mut Self
    where
        P: Fn(&Component) -> bool + Send + Sync + 'static,
    {
        self.register(ComponentMatcher::Predicate(Arc::new(predicate)), shared(depictor))
    }

    /// The depictor of the first entry matching the component.
    pub fn resolve(&self, component: &Component) -> Option<Arc<dyn Depictor>> {
        self.entries
            .iter()
            .find(|(matcher, _)| matcher.matches(component))
            .map(|(_, factory)| factory(component))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn shared(depictor: Arc<dyn Depictor>) -> DepictorFactory {
    Arc::new(move |_| Arc::clone(&depictor))
}

impl fmt::Debug for DepictorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepictorRegistry")
            .field("platform", &self.platform)
            .field(
                "matchers",
                &self.entries.iter().map(|(m, _)| m).collect::<Vec<_>>(),
            )
            .finish()
    }
}
