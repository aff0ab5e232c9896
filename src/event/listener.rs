//! Registration-ordered listener lists.
//!
//! A [`ListenerList`] is cheap to clone; clones share the same registrations.
//! Firing takes a snapshot of the registered callbacks and releases the lock
//! before calling any of them, so a listener may add or remove listeners, or
//! fire the list again, without deadlocking.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Handle returned by [`ListenerList::add`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Whether an event should continue to the next handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Propagation {
    #[default]
    Continue,
    Stop,
}

type Callback<E, R> = Arc<dyn Fn(&E) -> R + Send + Sync>;

struct Registry<E, R> {
    next_id: u64,
    entries: Vec<(ListenerId, Callback<E, R>)>,
}

/// Listeners for events of type `E`, each returning `R`.
pub struct ListenerList<E, R = ()> {
    inner: Arc<Mutex<Registry<E, R>>>,
}

impl<E, R> ListenerList<E, R> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a listener. Listeners are called in registration order.
    pub fn add(&self, listener: impl Fn(&E) -> R + Send + Sync + 'static) -> ListenerId {
        let mut registry = self.inner.lock();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.entries.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut registry = self.inner.lock();
        let before = registry.entries.len();
        registry.entries.retain(|(entry, _)| *entry != id);
        registry.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    fn snapshot(&self) -> Vec<Callback<E, R>> {
        self.inner
            .lock()
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect()
    }
}

impl<E> ListenerList<E> {
    /// Deliver `event` to every listener.
    pub fn fire(&self, event: &E) {
        for listener in self.snapshot() {
            listener(event);
        }
    }
}

impl<E> ListenerList<E, Propagation> {
    /// Deliver `event` until a listener returns [`Propagation::Stop`].
    pub fn fire(&self, event: &E) -> Propagation {
        for listener in self.snapshot() {
            if listener(event) == Propagation::Stop {
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }
}

impl<E, R> Clone for ListenerList<E, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E, R> Default for ListenerList<E, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, R> fmt::Debug for ListenerList<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn fires_in_registration_order() {
        let list: ListenerList<u32> = ListenerList::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let seen = Arc::clone(&seen);
            list.add(move |value: &u32| seen.lock().push(format!("{tag}{value}")));
        }
        list.fire(&7);
        assert_eq!(*seen.lock(), vec!["a7", "b7", "c7"]);
    }

    #[test]
    fn remove_listener() {
        let list: ListenerList<()> = ListenerList::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let id = list.add(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(list.remove(id));
        assert!(!list.remove(id));
        list.fire(&());
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn clones_share_registrations() {
        let list: ListenerList<()> = ListenerList::new();
        let other = list.clone();
        other.add(|_| {});
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn listener_may_register_during_fire() {
        let list: ListenerList<()> = ListenerList::new();
        let handle = list.clone();
        list.add(move |_| {
            handle.add(|_| {});
        });
        list.fire(&());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn stop_halts_delivery() {
        let list: ListenerList<u8, Propagation> = ListenerList::new();
        let reached = Arc::new(AtomicUsize::new(0));
        list.add(|_| Propagation::Continue);
        list.add(|_| Propagation::Stop);
        let counter = Arc::clone(&reached);
        list.add(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Propagation::Continue
        });
        assert_eq!(list.fire(&0), Propagation::Stop);
        assert_eq!(reached.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_list_continues() {
        let list: ListenerList<u8, Propagation> = ListenerList::default();
        assert_eq!(list.fire(&0), Propagation::Continue);
    }
}
