//! Subscriber registry: one outbox per connected subscriber.
//!
//! The poller is the only producer; each connection handler consumes its own
//! outbox. Outboxes are unbounded so that publishing never waits on a slow
//! subscriber. A subscriber that stops reading keeps accumulating snapshots
//! until its connection is found dead.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mumble_online_common::Snapshot;
use tokio::sync::mpsc;

type Outbox = mpsc::UnboundedSender<Arc<Snapshot>>;

/// Identifier of a registered subscriber, unique for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Inner {
    outboxes: Mutex<HashMap<SubscriberId, Outbox>>,
    next_id: AtomicU64,
}

/// Thread-safe set of subscriber outboxes.
#[derive(Clone)]
pub struct SubscriberRegistry {
    inner: Arc<Inner>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                outboxes: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    fn outboxes(&self) -> MutexGuard<'_, HashMap<SubscriberId, Outbox>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.inner
            .outboxes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new outbox. It is removed again when the returned
    /// subscription is dropped.
    pub fn register(&self) -> Subscription {
        let id = SubscriberId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();

        let total = {
            let mut outboxes = self.outboxes();
            outboxes.insert(id, tx);
            outboxes.len()
        };
        tracing::debug!(subscriber = %id, total, "Subscriber registered");

        Subscription {
            id,
            rx,
            registry: self.clone(),
        }
    }

    /// Remove an outbox. Returns false if it was already gone.
    pub fn deregister(&self, id: SubscriberId) -> bool {
        let (removed, total) = {
            let mut outboxes = self.outboxes();
            let removed = outboxes.remove(&id).is_some();
            (removed, outboxes.len())
        };
        if removed {
            tracing::debug!(subscriber = %id, total, "Subscriber deregistered");
        }
        removed
    }

    /// Push `snapshot` to every outbox registered at this instant.
    ///
    /// The membership is copied under the lock and the pushes happen after it
    /// is released. Outboxes whose receiver is already gone are skipped.
    /// Returns the number of outboxes that accepted the snapshot.
    pub fn publish(&self, snapshot: Snapshot) -> usize {
        let targets: Vec<(SubscriberId, Outbox)> = self
            .outboxes()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let snapshot = Arc::new(snapshot);
        let mut delivered = 0;
        for (id, tx) in targets {
            if tx.send(Arc::clone(&snapshot)).is_ok() {
                delivered += 1;
            } else {
                tracing::trace!(subscriber = %id, "Outbox closed, skipping");
            }
        }
        delivered
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.outboxes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered outbox. Dropping it deregisters the subscriber.
pub struct Subscription {
    id: SubscriberId,
    rx: mpsc::UnboundedReceiver<Arc<Snapshot>>,
    registry: SubscriberRegistry,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next published snapshot.
    ///
    /// Returns `None` only once the subscription has been deregistered and
    /// its outbox drained.
    pub async fn recv(&mut self) -> Option<Arc<Snapshot>> {
        self.rx.recv().await
    }

    /// Take the next snapshot if one is already queued.
    pub fn try_recv(&mut self) -> Option<Arc<Snapshot>> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.deregister(self.id);
    }
}
