//! Focus chain: tab order over the enabled, focusable components of a tree.

use crate::component::{ComponentId, ComponentTree, Enableable};

/// Ordered list of focusable components for Tab traversal.
///
/// The chain is rebuilt from the tree whenever it changes. Traversal wraps
/// around in both directions.
#[derive(Debug, Default)]
pub struct FocusChain {
    /// Focusable components in depth-first order.
    components: Vec<ComponentId>,
    current: Option<usize>,
}

impl FocusChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the tree, keeping focus on the same component if it is
    /// still focusable.
    pub fn rebuild(&mut self, tree: &ComponentTree) {
        let focused = self.current();
        self.components.clear();
        self.current = None;

        let Some(root) = tree.root() else {
            return;
        };
        self.components.extend(
            tree.walk_depth_first(root)
                .into_iter()
                .filter(|&id| {
                    tree.get(id)
                        .is_some_and(|c| c.is_focusable() && c.is_enabled())
                }),
        );

        if let Some(focused) = focused {
            self.current = self.components.iter().position(|&id| id == focused);
        }
    }

    /// The focused component, if any.
    pub fn current(&self) -> Option<ComponentId> {
        self.current.and_then(|idx| self.components.get(idx).copied())
    }

    /// Returns the newly focused component, or `None` if the chain is empty.
    pub fn focus_next(&mut self) -> Option<ComponentId> {
        if self.components.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(idx) => (idx + 1) % self.components.len(),
            None => 0,
        };
        self.current = Some(next);
        self.components.get(next).copied()
    }

    pub fn focus_previous(&mut self) -> Option<ComponentId> {
        if self.components.is_empty() {
            return None;
        }
        let previous = match self.current {
            Some(0) | None => self.components.len() - 1,
            Some(idx) => idx - 1,
        };
        self.current = Some(previous);
        self.components.get(previous).copied()
    }

    /// Returns `false` if the component is not in the chain.
    pub fn focus(&mut self, id: ComponentId) -> bool {
        match self.components.iter().position(|&c| c == id) {
            Some(pos) => {
                self.current = Some(pos);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::model::ValueModel;

    fn tree() -> (ComponentTree, [ComponentId; 3]) {
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::panel());
        tree.set_root(root);
        tree.add_child(root, Component::label("not focusable")).unwrap();
        let a = tree.add_child(root, Component::button("A")).unwrap();
        let b = tree
            .add_child(root, Component::text_control(ValueModel::new()))
            .unwrap();
        let c = tree.add_child(root, Component::link("C")).unwrap();
        (tree, [a, b, c])
    }

    // ── Traversal ────────────────────────────────────────────────────

    #[test]
    fn next_wraps() {
        let (tree, [a, b, c]) = tree();
        let mut chain = FocusChain::new();
        chain.rebuild(&tree);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.focus_next(), Some(a));
        assert_eq!(chain.focus_next(), Some(b));
        assert_eq!(chain.focus_next(), Some(c));
        assert_eq!(chain.focus_next(), Some(a));
    }

    #[test]
    fn previous_starts_at_end() {
        let (tree, [a, _, c]) = tree();
        let mut chain = FocusChain::new();
        chain.rebuild(&tree);
        assert_eq!(chain.focus_previous(), Some(c));
        chain.focus(a);
        assert_eq!(chain.focus_previous(), Some(c));
    }

    #[test]
    fn empty_chain() {
        let mut chain = FocusChain::new();
        chain.rebuild(&ComponentTree::new());
        assert!(chain.is_empty());
        assert_eq!(chain.focus_next(), None);
        assert_eq!(chain.current(), None);
    }

    // ── Rebuild ──────────────────────────────────────────────────────

    #[test]
    fn disabled_components_leave_the_chain() {
        let (mut tree, [a, b, _]) = tree();
        let mut chain = FocusChain::new();
        chain.rebuild(&tree);
        chain.focus(b);

        tree.set_enabled(a, false).unwrap();
        chain.rebuild(&tree);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.current(), Some(b));

        tree.set_enabled(b, false).unwrap();
        chain.rebuild(&tree);
        assert_eq!(chain.current(), None);
        assert!(!chain.focus(b));
    }
}
