//! Event dispatch: queued envelopes and bubble path computation.
//!
//! [`EventDispatcher`] holds events until the session delivers them. Action
//! events go to their target only; keyboard events bubble along
//! [`EventDispatcher::bubble_path`], from the target up to the root.

use std::collections::VecDeque;

use super::action::ActionEvent;
use super::keyboard::KeyboardEvent;
use crate::component::{ComponentId, ComponentTree};

// ---------------------------------------------------------------------------
// GuiseEvent
// ---------------------------------------------------------------------------

/// An event awaiting delivery to a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiseEvent {
    Action(ActionEvent),
    Keyboard(KeyboardEvent),
}

impl GuiseEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Action(_) => "action",
            Self::Keyboard(_) => "keyboard",
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// An event together with the component it is delivered to.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub event: GuiseEvent,
    pub target: ComponentId,
    /// Set once a handler stops propagation.
    pub handled: bool,
}

impl Envelope {
    pub fn new(event: GuiseEvent, target: ComponentId) -> Self {
        Self {
            event,
            target,
            handled: false,
        }
    }

    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// FIFO queue of pending envelopes.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: VecDeque<Envelope>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, envelope: Envelope) {
        tracing::trace!(
            target: "guise::event",
            event = envelope.event.name(),
            target_component = ?envelope.target,
            "queued"
        );
        self.queue.push_back(envelope);
    }

    /// Remove and return every pending envelope, oldest first.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// `[start, parent, grandparent, ..., root]`, or empty if `start` is not in the tree.
    pub fn bubble_path(tree: &ComponentTree, start: ComponentId) -> Vec<ComponentId> {
        if !tree.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(tree.ancestors(start));
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::input::{Key, KeystrokeInput};

    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (ComponentTree, [ComponentId; 5]) {
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::frame("Root"));
        let a = tree.add_child(root, Component::panel()).unwrap();
        let b = tree.add_child(root, Component::panel()).unwrap();
        let c = tree.add_child(a, Component::button("OK")).unwrap();
        let d = tree.add_child(a, Component::label("Name")).unwrap();
        (tree, [root, a, b, c, d])
    }

    #[test]
    fn new_dispatcher_is_empty() {
        let dispatcher = EventDispatcher::new();
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.pending_count(), 0);
    }

    #[test]
    fn drain_is_fifo() {
        let (_, [root, _, _, c, _]) = build_tree();
        let mut dispatcher = EventDispatcher::new();
        dispatcher.push(Envelope::new(GuiseEvent::Action(ActionEvent::new(c)), c));
        dispatcher.push(Envelope::new(
            GuiseEvent::Keyboard(KeyboardEvent::press(root, KeystrokeInput::plain(Key::Enter))),
            root,
        ));
        assert_eq!(dispatcher.pending_count(), 2);

        let drained = dispatcher.drain();
        assert_eq!(drained[0].target, c);
        assert_eq!(drained[0].event.name(), "action");
        assert_eq!(drained[1].event.name(), "keyboard");
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn bubble_path_from_leaf() {
        let (tree, [root, a, _, c, _]) = build_tree();
        assert_eq!(EventDispatcher::bubble_path(&tree, c), vec![c, a, root]);
    }

    #[test]
    fn bubble_path_from_root() {
        let (tree, [root, ..]) = build_tree();
        assert_eq!(EventDispatcher::bubble_path(&tree, root), vec![root]);
    }

    #[test]
    fn bubble_path_missing_node() {
        let (mut tree, [_, _, b, _, _]) = build_tree();
        tree.remove(b);
        assert!(EventDispatcher::bubble_path(&tree, b).is_empty());
    }

    #[test]
    fn mark_handled() {
        let (_, [root, ..]) = build_tree();
        let mut envelope = Envelope::new(GuiseEvent::Action(ActionEvent::new(root)), root);
        assert!(!envelope.handled);
        envelope.mark_handled();
        assert!(envelope.handled);
    }
}
