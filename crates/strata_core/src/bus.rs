//! Snapshot subscription bus
//!
//! Delivers the latest resolved state to mounted consumers. Delivery is
//! latest-only: publishers coalesce upstream, and the bus keeps exactly one
//! current value which is replayed to new subscribers on registration.
//!
//! [`Subscription`] is an RAII dispose handle — dropping it unregisters the
//! callback, so a consumer that unmounts cannot leave a dangling callback
//! behind.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, Weak};

new_key_type! {
    /// Unique identifier for a bus subscriber
    pub struct SubscriberId;
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct BusInner<T> {
    subscribers: SlotMap<SubscriberId, Callback<T>>,
    latest: Option<T>,
}

/// Fan-out of resolved snapshots to consumers
pub struct SubscriptionBus<T> {
    inner: Arc<Mutex<BusInner<T>>>,
}

impl<T: Clone + Send + 'static> SubscriptionBus<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusInner {
                subscribers: SlotMap::with_key(),
                latest: None,
            })),
        }
    }

    /// Register a subscriber. The current snapshot, if any, is replayed
    /// immediately so a late mount never waits for the next recompute.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let replay = {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.subscribers.insert(Arc::clone(&callback));
            let weak = Arc::downgrade(&self.inner);
            (id, weak, inner.latest.clone())
        };
        let (id, weak, latest) = replay;
        if let Some(value) = latest {
            callback(&value);
        }
        Subscription::new(move || {
            if let Some(inner) = Weak::upgrade(&weak) {
                inner.lock().unwrap().subscribers.remove(id);
            }
        })
    }

    /// Publish a new snapshot, replacing the previous one
    pub fn publish(&self, value: T) {
        // Snapshot the callbacks, then invoke outside the lock so a
        // subscriber may touch the bus without deadlocking.
        let callbacks: Vec<Callback<T>> = {
            let mut inner = self.inner.lock().unwrap();
            inner.latest = Some(value.clone());
            inner.subscribers.values().cloned().collect()
        };
        for callback in callbacks {
            callback(&value);
        }
    }

    /// The most recently published snapshot
    pub fn latest(&self) -> Option<T> {
        self.inner.lock().unwrap().latest.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subscribers.len()
    }

    /// Drop all subscribers and the retained snapshot
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.clear();
        inner.latest = None;
    }
}

impl<T: Clone + Send + 'static> Default for SubscriptionBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII handle for a bus subscription; unregisters on drop
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new<F: FnOnce() + Send + 'static>(cancel: F) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unregister explicitly (equivalent to dropping the handle)
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_publish_reaches_subscribers() {
        let bus = SubscriptionBus::<u32>::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let _sub = bus.subscribe(move |v| {
            seen_clone.store(*v as usize, Ordering::SeqCst);
        });

        bus.publish(7);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_latest_is_replayed_on_subscribe() {
        let bus = SubscriptionBus::<u32>::new();
        bus.publish(3);
        bus.publish(9);

        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let _sub = bus.subscribe(move |v| {
            seen_clone.store(*v as usize, Ordering::SeqCst);
        });
        // Only the newest value is ever observable
        assert_eq!(seen.load(Ordering::SeqCst), 9);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = SubscriptionBus::<u32>::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let sub = bus.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_is_explicit_drop() {
        let bus = SubscriptionBus::<u32>::new();
        let sub = bus.subscribe(|_| {});
        sub.cancel();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = SubscriptionBus::<u32>::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }

    #[test]
    fn test_clear_tears_down_everything() {
        let bus = SubscriptionBus::<u32>::new();
        let _sub = bus.subscribe(|_| {});
        bus.publish(5);
        bus.clear();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.latest(), None);
    }
}
