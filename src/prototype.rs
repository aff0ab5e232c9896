//! Prototypes: shared action and menu descriptors.
//!
//! A prototype holds a label, an icon and an enabled flag that any number of
//! components may reference through an `Arc`. Components built from a
//! prototype present its state as their own, and performing the action on
//! any of them performs it on the prototype.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::{
    ActionEvent, EventSource, ListenerId, ListenerList, Property, PropertyChangeEvent,
    PropertyChangeSupport, PropertyName,
};

static NEXT_PROTOTYPE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique prototype identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrototypeId(u64);

impl PrototypeId {
    pub(crate) fn next() -> Self {
        Self(NEXT_PROTOTYPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PrototypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// What kind of component a prototype provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrototypeKind {
    /// Provides buttons and links.
    Action,
    /// Provides menus.
    Menu,
}

/// A shareable action descriptor.
#[derive(Debug)]
pub struct ActionPrototype {
    id: PrototypeId,
    kind: PrototypeKind,
    label: Property<Option<String>>,
    icon: Property<Option<String>>,
    enabled: Property<bool>,
    property_listeners: PropertyChangeSupport,
    action_listeners: ListenerList<ActionEvent>,
}

impl ActionPrototype {
    /// An action prototype with the given label, enabled.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_kind(PrototypeKind::Action, label.into())
    }

    /// A menu prototype with the given label, enabled.
    pub fn menu(label: impl Into<String>) -> Self {
        Self::with_kind(PrototypeKind::Menu, label.into())
    }

    fn with_kind(kind: PrototypeKind, label: String) -> Self {
        Self {
            id: PrototypeId::next(),
            kind,
            label: Property::new(Some(label)),
            icon: Property::new(None),
            enabled: Property::new(true),
            property_listeners: PropertyChangeSupport::new(),
            action_listeners: ListenerList::new(),
        }
    }

    /// Set the icon before the prototype is shared (builder).
    pub fn with_icon(self, icon: impl Into<String>) -> Self {
        self.icon.replace(Some(icon.into()));
        self
    }

    pub fn id(&self) -> PrototypeId {
        self.id
    }

    pub fn kind(&self) -> PrototypeKind {
        self.kind
    }

    pub fn label(&self) -> Option<String> {
        self.label.get()
    }

    pub fn icon(&self) -> Option<String> {
        self.icon.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Returns whether the label changed.
    pub fn set_label(&self, label: Option<String>) -> bool {
        self.update(&self.label, PropertyName::Label, label)
    }

    /// Returns whether the icon changed.
    pub fn set_icon(&self, icon: Option<String>) -> bool {
        self.update(&self.icon, PropertyName::Icon, icon)
    }

    /// Returns whether the enabled flag changed.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        self.update(&self.enabled, PropertyName::Enabled, enabled)
    }

    fn update<T>(&self, property: &Property<T>, name: PropertyName, value: T) -> bool
    where
        T: Clone + PartialEq + Into<crate::event::PropertyValue>,
    {
        match property.replace(value.clone()) {
            Some(old) => self.property_listeners.fire_property_change(
                EventSource::Prototype(self.id),
                name,
                old,
                value,
            ),
            None => false,
        }
    }

    pub fn add_property_listener(
        &self,
        listener: impl Fn(&PropertyChangeEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.property_listeners.add_listener(listener)
    }

    pub fn remove_property_listener(&self, id: ListenerId) -> bool {
        self.property_listeners.remove_listener(id)
    }

    pub fn add_action_listener(
        &self,
        listener: impl Fn(&ActionEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.action_listeners.add(listener)
    }

    pub fn remove_action_listener(&self, id: ListenerId) -> bool {
        self.action_listeners.remove(id)
    }

    /// Perform the action if the prototype is enabled.
    ///
    /// Listeners receive a copy of `event` sourced at this prototype, with the
    /// original target preserved. Returns whether listeners were notified.
    pub fn perform_action(&self, event: &ActionEvent) -> bool {
        if !self.is_enabled() {
            tracing::debug!(target: "guise::event", prototype = %self.id, "action on disabled prototype ignored");
            return false;
        }
        self.action_listeners.fire(&event.with_source(self.id));
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::event::{Command, PropertyValue};

    #[test]
    fn ids_are_unique() {
        let a = ActionPrototype::new("A");
        let b = ActionPrototype::new("B");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn kinds() {
        assert_eq!(ActionPrototype::new("Save").kind(), PrototypeKind::Action);
        assert_eq!(ActionPrototype::menu("File").kind(), PrototypeKind::Menu);
    }

    #[test]
    fn setters_fire_only_on_change() {
        let prototype = ActionPrototype::new("Save").with_icon("save.png");
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        prototype.add_property_listener(move |event| sink.lock().push(event.clone()));

        assert!(!prototype.set_label(Some("Save".into())));
        assert!(prototype.set_enabled(false));
        assert!(!prototype.set_enabled(false));
        assert!(prototype.set_icon(None));

        let events = events.lock();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].property(), PropertyName::Enabled);
        assert_eq!(events[0].source(), EventSource::Prototype(prototype.id()));
        assert_eq!(events[1].old_value(), &PropertyValue::from("save.png"));
    }

    #[test]
    fn listener_sees_new_state() {
        let prototype = Arc::new(ActionPrototype::new("Open"));
        let seen = Arc::new(Mutex::new(None));
        {
            let handle = Arc::clone(&prototype);
            let seen = Arc::clone(&seen);
            prototype.add_property_listener(move |_| *seen.lock() = handle.label());
        }
        prototype.set_label(Some("Open…".into()));
        assert_eq!(seen.lock().as_deref(), Some("Open…"));
    }

    #[test]
    fn perform_action_relays_from_prototype() {
        let prototype = ActionPrototype::new("Delete");
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        prototype.add_action_listener(move |event| sink.lock().push(event.clone()));

        let origin = EventSource::Prototype(PrototypeId::next());
        let event = ActionEvent::with_force_option(origin, 1, 1).unwrap();
        assert!(prototype.perform_action(&event));

        let received = received.lock();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].source(), EventSource::Prototype(prototype.id()));
        assert_eq!(received[0].target(), origin);
        assert_eq!(received[0].command(), Command::Info);
    }

    #[test]
    fn disabled_prototype_ignores_actions() {
        let prototype = ActionPrototype::new("Delete");
        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);
        prototype.add_action_listener(move |_| *counter.lock() += 1);
        prototype.set_enabled(false);
        assert!(!prototype.perform_action(&ActionEvent::new(prototype.id())));
        assert_eq!(*count.lock(), 0);
    }
}
