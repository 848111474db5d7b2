//! Process-wide publish/subscribe channel for lifecycle signals.
//!
//! DESIGN
//! ======
//! Delivery is synchronous and happens inside `publish`, in subscription
//! order, so subscribers always observe state strictly after the mutation
//! that triggered the signal. Nothing is buffered: a signal published before
//! a subscriber registers is lost, which is why all lifecycle subscriptions
//! are wired during initialization.
//!
//! The subscriber list lock is released before handlers run, so handlers may
//! publish or subscribe re-entrantly without deadlocking. A subscription made
//! during delivery does not receive the in-flight publish.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

/// Named lifecycle signals carried by the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The identity record just became fully populated for this login.
    UserReady,
    /// A global sign-out was requested.
    UserSignout,
}

/// Handler invoked synchronously with each published payload.
type Handler = Arc<dyn Fn(&Value) + Send + Sync>;

/// Identifies one subscription for later removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: u64,
    once: bool,
    handler: Handler,
}

/// Synchronous in-process event bus for the two identity lifecycle signals.
///
/// Shared by `Arc` between the store and its host; never held in a global.
#[derive(Default)]
pub struct EventBus {
    next_id: AtomicU64,
    topics: Mutex<HashMap<Topic, Vec<Subscriber>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Topic, Vec<Subscriber>>> {
        self.topics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn add(&self, topic: Topic, once: bool, handler: Handler) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock()
            .entry(topic)
            .or_default()
            .push(Subscriber { id, once, handler });
        SubscriptionId(id)
    }

    /// Register a persistent subscription; lives until [`EventBus::unsubscribe`].
    pub fn subscribe(&self, topic: Topic, handler: impl Fn(&Value) + Send + Sync + 'static) -> SubscriptionId {
        self.add(topic, false, Arc::new(handler))
    }

    /// Register a subscription that fires at most once, then removes itself.
    pub fn subscribe_once(&self, topic: Topic, handler: impl Fn(&Value) + Send + Sync + 'static) -> SubscriptionId {
        self.add(topic, true, Arc::new(handler))
    }

    /// Remove a subscription. Removing an already-fired one-shot is a no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        for subscribers in self.lock().values_mut() {
            subscribers.retain(|s| s.id != id.0);
        }
    }

    /// Notify all current subscribers of `topic`, in subscription order,
    /// within this call. One-shot subscriptions are removed before their
    /// handler runs, so a handler inspecting the bus never sees itself.
    pub fn publish(&self, topic: Topic, payload: &Value) {
        let batch: Vec<Handler> = {
            let mut topics = self.lock();
            let Some(subscribers) = topics.get_mut(&topic) else {
                return;
            };
            let batch = subscribers.iter().map(|s| s.handler.clone()).collect();
            subscribers.retain(|s| !s.once);
            batch
        };
        for handler in batch {
            handler(payload);
        }
    }

    /// Current subscription count for `topic`, one-shots included.
    #[must_use]
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.lock().get(&topic).map_or(0, Vec::len)
    }
}
