//! Observable values
//!
//! An [`Observable`] owns a value and a set of subscribers. Writing a
//! different value notifies every subscriber synchronously, in subscription
//! order, before `set` returns.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`Observable::subscribe`]
    pub struct SubscriptionId;
}

/// Subscriber callback
pub type Subscriber<T> = Box<dyn FnMut(&T)>;

/// A value that notifies subscribers when it changes
pub struct Observable<T> {
    value: T,
    subscribers: SlotMap<SubscriptionId, Subscriber<T>>,
}

impl<T: PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: SlotMap::with_key(),
        }
    }

    /// Current value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Store a new value; subscribers run only if it differs from the old one
    ///
    /// Returns whether the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.notify();
        true
    }

    /// Run every subscriber with the current value
    pub fn notify(&mut self) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.value);
        }
    }

    /// Register a callback for future changes
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        self.subscribers.insert(Box::new(callback))
    }

    /// Remove a callback; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: PartialEq + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
