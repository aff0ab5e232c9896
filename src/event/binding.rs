//! Input bindings: gestures mapped to shared actions and focus commands.
//!
//! [`BindingInputStrategy`] is consulted for input no component consumed.
//! `with_defaults()` binds Tab and Shift+Tab to focus traversal.

use std::collections::HashMap;
use std::sync::Arc;

use crate::input::{Input, Key, KeySet, KeystrokeInput};
use crate::prototype::ActionPrototype;

/// What a bound input does.
#[derive(Debug, Clone)]
pub enum BindingAction {
    /// Perform the prototype's action.
    Prototype(Arc<ActionPrototype>),
    FocusNext,
    FocusPrevious,
}

/// Map from gesture inputs to [`BindingAction`]s.
#[derive(Debug, Default)]
pub struct BindingInputStrategy {
    bindings: HashMap<Input, BindingAction>,
}

impl BindingInputStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab moves focus forward; Shift+Tab (either shift) moves it back.
    pub fn with_defaults() -> Self {
        let mut strategy = Self::new();
        strategy.bind(
            KeystrokeInput::new(Key::Tab, KeySet::new()),
            BindingAction::FocusNext,
        );
        for shift in [Key::ShiftLeft, Key::ShiftRight] {
            strategy.bind(
                KeystrokeInput::new(Key::Tab, [shift]),
                BindingAction::FocusPrevious,
            );
        }
        strategy
    }

    /// Bind an input, replacing any existing binding for it.
    pub fn bind(&mut self, input: impl Into<Input>, action: BindingAction) {
        self.bindings.insert(input.into(), action);
    }

    /// Returns the removed action, if any.
    pub fn unbind(&mut self, input: &Input) -> Option<BindingAction> {
        self.bindings.remove(input)
    }

    /// Exact match on the input, including its modifier set.
    pub fn resolve(&self, input: &Input) -> Option<&BindingAction> {
        self.bindings.get(input)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, MouseClickInput};

    fn stroke(key: Key, keys: impl Into<KeySet>) -> Input {
        Input::from(KeystrokeInput::new(key, keys))
    }

    #[test]
    fn new_strategy_is_empty() {
        let strategy = BindingInputStrategy::new();
        assert!(strategy.is_empty());
        assert_eq!(strategy.len(), 0);
    }

    #[test]
    fn defaults_cover_focus_traversal() {
        let strategy = BindingInputStrategy::with_defaults();
        assert_eq!(strategy.len(), 3);
        assert!(matches!(
            strategy.resolve(&stroke(Key::Tab, KeySet::new())),
            Some(BindingAction::FocusNext)
        ));
        assert!(matches!(
            strategy.resolve(&stroke(Key::Tab, [Key::ShiftRight])),
            Some(BindingAction::FocusPrevious)
        ));
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let strategy = BindingInputStrategy::with_defaults();
        assert!(strategy
            .resolve(&stroke(Key::Tab, [Key::ControlLeft]))
            .is_none());
    }

    #[test]
    fn bind_prototype_to_click() {
        let mut strategy = BindingInputStrategy::new();
        let prototype = Arc::new(ActionPrototype::new("Refresh"));
        let click = MouseClickInput::new(MouseButton::Middle, 1, KeySet::new());
        strategy.bind(click.clone(), BindingAction::Prototype(Arc::clone(&prototype)));

        match strategy.resolve(&Input::from(click)) {
            Some(BindingAction::Prototype(bound)) => assert_eq!(bound.id(), prototype.id()),
            other => panic!("unexpected binding {other:?}"),
        }
    }

    #[test]
    fn rebinding_replaces() {
        let mut strategy = BindingInputStrategy::with_defaults();
        let tab = stroke(Key::Tab, KeySet::new());
        strategy.bind(
            KeystrokeInput::plain(Key::Tab),
            BindingAction::FocusPrevious,
        );
        assert!(matches!(
            strategy.resolve(&tab),
            Some(BindingAction::FocusPrevious)
        ));
        assert!(matches!(
            strategy.unbind(&tab),
            Some(BindingAction::FocusPrevious)
        ));
        assert!(strategy.resolve(&tab).is_none());
    }
}
