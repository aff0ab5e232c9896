//! Component queries: by name, kind, style class, or predicate.

use super::node::{Component, ComponentId, ComponentKind};
use super::tree::ComponentTree;

impl ComponentTree {
    /// The first component with the given name.
    ///
    /// Searches the whole arena, including components outside the root's subtree.
    pub fn find_by_name(&self, name: &str) -> Option<ComponentId> {
        self.iter_components()
            .find(|(_, component)| component.name() == Some(name))
            .map(|(id, _)| id)
    }

    pub fn query_by_kind(&self, kind: ComponentKind) -> Vec<ComponentId> {
        self.query_all(|component| component.kind() == kind)
    }

    pub fn query_by_class(&self, class: &str) -> Vec<ComponentId> {
        self.query_all(|component| component.has_class(class))
    }

    pub fn query_all(&self, predicate: impl Fn(&Component) -> bool) -> Vec<ComponentId> {
        self.iter_components()
            .filter(|(_, component)| predicate(component))
            .map(|(id, _)| id)
            .collect()
    }

    /// Arena order: deterministic, but not tree order.
    fn iter_components(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components.iter()
    }
}
