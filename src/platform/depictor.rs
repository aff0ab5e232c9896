//! Depictors and the render pass that drives them.
//!
//! A [`Depictor`] writes one component kind into a [`DepictContext`] in three
//! phases: begin, body, end. Depictors are stateless; a single instance may be
//! bound to many components. The [`DepictPass`] walks the component tree,
//! binding depictors on first use, and guarantees that every element a
//! depictor opened is closed again, even when a phase fails.

use std::sync::Arc;

use crate::component::{Component, ComponentId, ComponentTree};
use crate::error::{Error, Result};
use crate::platform::context::DepictContext;
use crate::platform::environment::Environment;
use crate::platform::registry::DepictorRegistry;
use crate::platform::tracker::DepictionTracker;

/// Writes a component into a depict context.
pub trait Depictor: Send + Sync {
    /// Open the component's outer element and write its attributes.
    fn depict_begin(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()>;

    /// Write the component's content. Depicts the children by default.
    fn depict_body(&self, pass: &mut DepictPass<'_>, id: ComponentId) -> Result<()> {
        pass.depict_children(id)
    }

    /// Close what `depict_begin` opened. Elements still open afterwards are
    /// closed by the pass.
    fn depict_end(&self, _pass: &mut DepictPass<'_>, _id: ComponentId) -> Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DepictPass
// ---------------------------------------------------------------------------

/// One depiction of a component subtree into a context.
pub struct DepictPass<'a> {
    tree: &'a ComponentTree,
    registry: &'a DepictorRegistry,
    tracker: &'a mut DepictionTracker,
    context: &'a mut dyn DepictContext,
    environment: &'a Environment,
}

impl<'a> DepictPass<'a> {
    pub fn new(
        tree: &'a ComponentTree,
        registry: &'a DepictorRegistry,
        tracker: &'a mut DepictionTracker,
        context: &'a mut dyn DepictContext,
        environment: &'a Environment,
    ) -> Self {
        Self {
            tree,
            registry,
            tracker,
            context,
            environment,
        }
    }

    pub fn tree(&self) -> &'a ComponentTree {
        self.tree
    }

    pub fn component(&self, id: ComponentId) -> Result<&'a Component> {
        let tree = self.tree;
        tree.component(id)
    }

    pub fn environment(&self) -> &'a Environment {
        self.environment
    }

    pub fn context(&mut self) -> &mut dyn DepictContext {
        &mut *self.context
    }

    /// Depict a component and its subtree.
    ///
    /// Runs begin, then body and end if begin succeeded. Elements left open
    /// are closed before returning; the first error wins.
    pub fn depict(&mut self, id: ComponentId) -> Result<()> {
        let component = self.component(id)?;
        let depictor = self.bind(id, component)?;
        let mark = self.context.depth();

        let span = tracing::trace_span!(
            target: "guise::depict",
            "depict",
            component = %self.tree.depict_id(id),
            kind = component.kind().name(),
        );
        let _guard = span.enter();

        let result = match depictor.depict_begin(self, id) {
            Ok(()) => {
                let body = depictor.depict_body(self, id);
                let end = depictor.depict_end(self, id);
                body.and(end)
            }
            Err(err) => Err(err),
        };
        let closed = self.context.close_to(mark);
        let result = result.and(closed);

        match &result {
            Ok(()) => self.tracker.mark_depicted(id),
            Err(err) => tracing::debug!(target: "guise::depict", error = %err, "depiction failed"),
        }
        result
    }

    /// Depict every child of a component in order.
    pub fn depict_children(&mut self, id: ComponentId) -> Result<()> {
        let tree = self.tree;
        for &child in tree.children(id) {
            self.depict(child)?;
        }
        Ok(())
    }

    fn bind(&mut self, id: ComponentId, component: &Component) -> Result<Arc<dyn Depictor>> {
        if let Some(depictor) = self.tracker.depictor(id) {
            return Ok(depictor);
        }
        let depictor = self
            .registry
            .resolve(component)
            .ok_or_else(|| Error::NoDepictor {
                kind: component.kind().name(),
                component: self.tree.depict_id(id),
            })?;
        self.tracker.bind(id, Arc::clone(&depictor));
        Ok(depictor)
    }

    // ── Context shortcuts ────────────────────────────────────────────

    pub fn begin(&mut self, name: &str) -> Result<()> {
        self.context.write_element_begin(name)
    }

    pub fn begin_empty(&mut self, name: &str) -> Result<()> {
        self.context.write_element_begin_with(name, true)
    }

    pub fn attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.context.write_attribute(name, value)
    }

    pub fn text(&mut self, text: &str) -> Result<()> {
        self.context.write_text(text)
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.context.write_element_end(name)
    }
}
