//! Single-threaded publish/subscribe channel

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

/// Handle returned by [`EventChannel::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// Observable event with any number of listeners
///
/// Listeners may subscribe or unsubscribe at any time, including from inside
/// a callback. Dispatch works on a snapshot of the listener list: a listener
/// removed during dispatch is not called afterwards, and a listener added
/// during dispatch first hears the next event.
pub struct EventChannel<T: ?Sized> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
}

impl<T: ?Sized> EventChannel<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener; returns `false` if it was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(existing, _)| *existing == id)
    }

    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(SubscriptionId, Listener<T>)> = self.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if self.is_subscribed(id) {
                listener(value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl<T: ?Sized> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.len())
            .finish()
    }
}
