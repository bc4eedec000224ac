//! Subscriber registry fanning updates out to sinks.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use log::{debug, error};

use super::{PortfolioUpdate, PortfolioUpdateSink};

type SubscriberList = RwLock<Vec<(u64, Arc<dyn PortfolioUpdateSink>)>>;

#[derive(Default)]
struct RegistryInner {
    next_id: AtomicU64,
    subscribers: SubscriberList,
}

/// Holds subscribers and delivers updates to them in subscription order.
///
/// Delivery works on a copy of the subscriber list, so a sink may subscribe
/// or unsubscribe from inside `on_update` without deadlocking.
#[derive(Default)]
pub struct SubscriberRegistry {
    inner: Arc<RegistryInner>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, sink: Arc<dyn PortfolioUpdateSink>) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, sink));
        debug!("Subscriber {} registered", id);
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Delivers an update to every subscriber. Returns the number of
    /// subscribers that handled it without panicking.
    pub fn publish(&self, update: &PortfolioUpdate) -> usize {
        let subscribers: Vec<_> = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut delivered = 0;
        for (id, sink) in subscribers {
            match catch_unwind(AssertUnwindSafe(|| sink.on_update(update))) {
                Ok(()) => delivered += 1,
                Err(_) => error!(
                    "Subscriber {} panicked while handling update #{}",
                    id,
                    update.sequence()
                ),
            }
        }
        delivered
    }

    /// Removes every subscriber. Outstanding [`Subscription`]s become inert.
    pub fn clear(&self) {
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`SubscriberRegistry::subscribe`].
///
/// Dropping the handle does not unsubscribe; call [`unsubscribe`](Self::unsubscribe).
#[must_use = "keep the subscription to be able to unsubscribe later"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RegistryInner>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Removes the subscriber. Returns `false` if it was already removed or
    /// the registry no longer exists.
    pub fn unsubscribe(self) -> bool {
        let Some(inner) = self.registry.upgrade() else {
            return false;
        };
        let mut subscribers = inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != self.id);
        let removed = subscribers.len() != before;
        if removed {
            debug!("Subscriber {} unregistered", self.id);
        }
        removed
    }
}
