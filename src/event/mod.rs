//! Events: actions, keystrokes, property changes, listeners, dispatch, bindings.

pub mod action;
pub mod binding;
pub mod dispatch;
pub mod keyboard;
pub mod listener;
pub mod property;
pub mod source;

pub use action::{ActionEvent, Command, DEFAULT_FORCE, DEFAULT_OPTION};
pub use binding::{BindingAction, BindingInputStrategy};
pub use dispatch::{Envelope, EventDispatcher, GuiseEvent};
pub use keyboard::{KeyPhase, KeyboardEvent};
pub use listener::{ListenerId, ListenerList, Propagation};
pub use property::{
    Property, PropertyChangeEvent, PropertyChangeSupport, PropertyName, PropertyValue,
};
pub use source::EventSource;
