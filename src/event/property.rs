//! Property-change notification.
//!
//! Observable state on components, models and prototypes reports changes as
//! [`PropertyChangeEvent`]s carrying the property name and both values.
//! Delivery is synchronous, in registration order, and suppressed when the
//! new value equals the old one.

use std::fmt;

use parking_lot::RwLock;

use super::listener::{ListenerId, ListenerList};
use super::source::EventSource;

// ---------------------------------------------------------------------------
// PropertyName
// ---------------------------------------------------------------------------

/// Names of observable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyName {
    Label,
    Icon,
    Enabled,
    Name,
    Value,
    Open,
    RolloverOpen,
    Source,
}

impl PropertyName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Icon => "icon",
            Self::Enabled => "enabled",
            Self::Name => "name",
            Self::Value => "value",
            Self::Open => "open",
            Self::RolloverOpen => "rolloverOpen",
            Self::Source => "source",
        }
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PropertyValue
// ---------------------------------------------------------------------------

/// An old or new property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Text(Option<String>),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Option<String>> for PropertyValue {
    fn from(value: Option<String>) -> Self {
        Self::Text(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(Some(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(Some(value.to_owned()))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(Some(value)) => write!(f, "{value:?}"),
            Self::Text(None) => f.write_str("none"),
        }
    }
}

// ---------------------------------------------------------------------------
// PropertyChangeEvent
// ---------------------------------------------------------------------------

/// A property of `source` changed from `old` to `new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChangeEvent {
    source: EventSource,
    property: PropertyName,
    old: PropertyValue,
    new: PropertyValue,
}

impl PropertyChangeEvent {
    pub fn new(
        source: EventSource,
        property: PropertyName,
        old: impl Into<PropertyValue>,
        new: impl Into<PropertyValue>,
    ) -> Self {
        Self {
            source,
            property,
            old: old.into(),
            new: new.into(),
        }
    }

    /// The same change reported by another source.
    pub fn with_source(&self, source: EventSource) -> Self {
        Self {
            source,
            ..self.clone()
        }
    }

    pub fn source(&self) -> EventSource {
        self.source
    }

    pub fn property(&self) -> PropertyName {
        self.property
    }

    pub fn old_value(&self) -> &PropertyValue {
        &self.old
    }

    pub fn new_value(&self) -> &PropertyValue {
        &self.new
    }
}

// ---------------------------------------------------------------------------
// PropertyChangeSupport
// ---------------------------------------------------------------------------

/// Listener list for property changes, with equal-value suppression.
#[derive(Debug, Clone, Default)]
pub struct PropertyChangeSupport {
    listeners: ListenerList<PropertyChangeEvent>,
}

impl PropertyChangeSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &self,
        listener: impl Fn(&PropertyChangeEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Notify listeners that `property` changed, unless `old == new`.
    ///
    /// Returns whether an event was fired.
    pub fn fire_property_change<T>(
        &self,
        source: EventSource,
        property: PropertyName,
        old: T,
        new: T,
    ) -> bool
    where
        T: PartialEq + Into<PropertyValue>,
    {
        if old == new {
            return false;
        }
        self.fire(&PropertyChangeEvent::new(source, property, old, new));
        true
    }

    /// Deliver an already-built event.
    pub fn fire(&self, event: &PropertyChangeEvent) {
        tracing::trace!(
            target: "guise::event",
            source = %event.source(),
            property = %event.property(),
            old = %event.old_value(),
            new = %event.new_value(),
            "property change"
        );
        self.listeners.fire(event);
    }
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

/// A shared value with change detection, readable while listeners run.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Read the value through a closure without cloning it.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`, returning the previous value if it differed.
    ///
    /// The lock is released before this returns, so callers notify
    /// listeners afterwards.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::prototype::PrototypeId;

    fn source() -> EventSource {
        EventSource::Prototype(PrototypeId::next())
    }

    fn recorder(support: &PropertyChangeSupport) -> Arc<Mutex<Vec<PropertyChangeEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        support.add_listener(move |event| sink.lock().push(event.clone()));
        events
    }

    #[test]
    fn equal_values_suppressed() {
        let support = PropertyChangeSupport::new();
        let events = recorder(&support);
        assert!(!support.fire_property_change(source(), PropertyName::Enabled, true, true));
        assert!(events.lock().is_empty());
    }

    #[test]
    fn toggle_then_revert_fires_twice() {
        let support = PropertyChangeSupport::new();
        let events = recorder(&support);
        let src = source();
        let original = String::from("Save");
        let mut current = original.clone();

        // set to the value it already holds
        let same = String::from("Save");
        support.fire_property_change(src, PropertyName::Label, Some(current.clone()), Some(same.clone()));
        current = same;
        // toggle
        support.fire_property_change(src, PropertyName::Label, Some(current.clone()), Some("Saving".into()));
        current = "Saving".into();
        // back to an equal but distinct instance of the original
        let restored = original.clone();
        support.fire_property_change(src, PropertyName::Label, Some(current), Some(restored));

        let events = events.lock();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].new_value(), &PropertyValue::from("Saving"));
        assert_eq!(events[1].old_value(), &PropertyValue::from("Saving"));
        assert_eq!(events[1].new_value(), &PropertyValue::from("Save"));
    }

    #[test]
    fn with_source_keeps_values() {
        let event = PropertyChangeEvent::new(source(), PropertyName::Open, false, true);
        let other = source();
        let copy = event.with_source(other);
        assert_eq!(copy.source(), other);
        assert_eq!(copy.property(), PropertyName::Open);
        assert_eq!(copy.new_value(), &PropertyValue::Bool(true));
    }

    #[test]
    fn listener_reads_updated_property() {
        let property = Arc::new(Property::new(1_i64));
        let support = PropertyChangeSupport::new();
        let seen = Arc::new(Mutex::new(None));
        {
            let property = Arc::clone(&property);
            let seen = Arc::clone(&seen);
            support.add_listener(move |_| *seen.lock() = Some(property.get()));
        }
        if let Some(old) = property.replace(2) {
            support.fire_property_change(source(), PropertyName::Value, old, 2);
        }
        assert_eq!(*seen.lock(), Some(2));
    }

    #[test]
    fn property_replace_detects_change() {
        let property = Property::new(String::from("a"));
        assert_eq!(property.replace("a".into()), None);
        assert_eq!(property.replace("b".into()), Some("a".into()));
        assert_eq!(property.with(|value| value.len()), 1);
    }

    #[test]
    fn property_names() {
        assert_eq!(PropertyName::RolloverOpen.to_string(), "rolloverOpen");
        assert_eq!(PropertyName::Label.as_str(), "label");
    }
}
