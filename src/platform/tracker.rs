//! Depiction tracking: which depictor each component is bound to, and which
//! components need depicting again.
//!
//! A component is bound to a depictor the first time it is depicted and stays
//! bound until it is removed from the tree. Property changes mark components
//! stale through a [`StaleSet`] handle that listeners can hold without
//! borrowing the tracker.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::SecondaryMap;

use crate::component::ComponentId;
use crate::platform::depictor::Depictor;

// ---------------------------------------------------------------------------
// StaleSet
// ---------------------------------------------------------------------------

/// Shared set of components whose depiction is out of date.
#[derive(Debug, Clone, Default)]
pub struct StaleSet {
    inner: Arc<Mutex<HashSet<ComponentId>>>,
}

impl StaleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the component was not already stale.
    pub fn mark(&self, id: ComponentId) -> bool {
        self.inner.lock().insert(id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.inner.lock().contains(&id)
    }

    pub fn remove(&self, id: ComponentId) -> bool {
        self.inner.lock().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

// ---------------------------------------------------------------------------
// DepictionTracker
// ---------------------------------------------------------------------------

/// Depictor bindings and depiction state per component.
#[derive(Default)]
pub struct DepictionTracker {
    bound: SecondaryMap<ComponentId, Arc<dyn Depictor>>,
    depicted: HashSet<ComponentId>,
    stale: StaleSet,
}

impl DepictionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a depictor, replacing any previous binding.
    pub fn bind(&mut self, id: ComponentId, depictor: Arc<dyn Depictor>) {
        if self.bound.insert(id, depictor).is_none() {
            tracing::trace!(target: "guise::depict", component = ?id, "bound depictor");
        }
    }

    /// Drop the binding and all depiction state for a component.
    pub fn unbind(&mut self, id: ComponentId) -> bool {
        self.depicted.remove(&id);
        self.stale.remove(id);
        let removed = self.bound.remove(id).is_some();
        if removed {
            tracing::trace!(target: "guise::depict", component = ?id, "unbound depictor");
        }
        removed
    }

    pub fn depictor(&self, id: ComponentId) -> Option<Arc<dyn Depictor>> {
        self.bound.get(id).cloned()
    }

    pub fn is_bound(&self, id: ComponentId) -> bool {
        self.bound.contains_key(id)
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    /// Mark a component as needing depiction.
    pub fn invalidate(&self, id: ComponentId) {
        self.stale.mark(id);
    }

    /// Handle for marking components stale from listeners.
    pub fn stale_set(&self) -> StaleSet {
        self.stale.clone()
    }

    pub fn mark_depicted(&mut self, id: ComponentId) {
        self.stale.remove(id);
        self.depicted.insert(id);
    }

    pub fn is_depicted(&self, id: ComponentId) -> bool {
        self.depicted.contains(&id)
    }

    /// Whether the component was never depicted or has gone stale since.
    pub fn needs_depiction(&self, id: ComponentId) -> bool {
        !self.is_depicted(id) || self.stale.contains(id)
    }

    pub fn has_stale(&self) -> bool {
        !self.stale.is_empty()
    }
}

impl std::fmt::Debug for DepictionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepictionTracker")
            .field("bound", &self.bound.len())
            .field("depicted", &self.depicted.len())
            .field("stale", &self.stale.len())
            .finish()
    }
}
