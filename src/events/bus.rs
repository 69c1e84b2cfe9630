use super::models::DomainEvent;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

type Callback = Arc<dyn Fn(&DomainEvent) + Send + Sync>;

/// Process-wide, synchronous publish/subscribe dispatcher for [`DomainEvent`]s.
///
/// Publishing runs every registered callback on the publishing thread before
/// returning. A subscriber that unsubscribes (or drops its [`Subscription`])
/// on that same thread is guaranteed to receive no further events, which is
/// what view teardown relies on.
#[derive(Default)]
pub struct EventBus {
    inner: Mutex<BusInner>,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: HashMap<u64, Callback>,
}

impl EventBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a callback. Delivery stops when the returned [`Subscription`]
    /// is dropped or explicitly unsubscribed.
    pub fn subscribe<F>(self: &Arc<Self>, callback: F) -> Subscription
    where
        F: Fn(&DomainEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, Arc::new(callback));
        Subscription {
            id,
            bus: Arc::downgrade(self),
        }
    }

    /// Dispatch an event to all current subscribers, synchronously.
    pub fn publish(&self, event: DomainEvent) {
        let callbacks: Vec<Callback> = {
            let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.subscribers.values().cloned().collect()
        };
        debug!("Publishing {:?} to {} subscribers", event, callbacks.len());
        for callback in callbacks {
            callback(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.subscribers.len()
    }

    fn unsubscribe(&self, id: u64) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.subscribers.remove(&id);
    }
}

/// Handle tying a subscription to a view's lifetime.
///
/// Unsubscribes on drop, so a view that owns its subscription cannot leak a
/// callback past teardown.
pub struct Subscription {
    id: u64,
    bus: Weak<EventBus>,
}

impl Subscription {
    /// Unregister now instead of waiting for drop.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}
