//! Action model: listeners notified when a control is activated.

use crate::error::Result;
use crate::event::{ActionEvent, EventSource, ListenerId, ListenerList};

/// Action listeners of a button, link or other action control.
#[derive(Debug, Clone, Default)]
pub struct ActionModel {
    listeners: ListenerList<ActionEvent>,
}

impl ActionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action_listener(
        &self,
        listener: impl Fn(&ActionEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_action_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an existing event to the listeners.
    pub fn fire_action(&self, event: &ActionEvent) {
        self.listeners.fire(event);
    }

    /// Build an action from `force` and `option` and deliver it.
    pub fn perform_action(&self, source: impl Into<EventSource>, force: i64, option: i64) -> Result<()> {
        let event = ActionEvent::with_force_option(source, force, option)?;
        self.fire_action(&event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::event::Command;
    use crate::prototype::PrototypeId;

    #[test]
    fn perform_action_notifies() {
        let model = ActionModel::new();
        let commands = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&commands);
        model.add_action_listener(move |event| sink.lock().push(event.command()));

        model.perform_action(PrototypeId::next(), 1, 0).unwrap();
        model.perform_action(PrototypeId::next(), 2, 0).unwrap();
        assert_eq!(*commands.lock(), vec![Command::Select, Command::Activate]);
    }

    #[test]
    fn invalid_action_not_delivered() {
        let model = ActionModel::new();
        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);
        model.add_action_listener(move |_| *counter.lock() += 1);
        assert!(model.perform_action(PrototypeId::next(), -1, 0).is_err());
        assert_eq!(*count.lock(), 0);
    }

    #[test]
    fn remove_listener() {
        let model = ActionModel::new();
        let id = model.add_action_listener(|_| {});
        assert_eq!(model.listener_count(), 1);
        assert!(model.remove_action_listener(id));
        assert_eq!(model.listener_count(), 0);
    }
}
