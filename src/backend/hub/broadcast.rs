/**
 * Log Broadcast Hub
 *
 * The hub owns the set of live subscriptions and fans each published line
 * out to all of them.
 *
 * # Locking
 *
 * - The subscriber map sits behind a `std::sync::RwLock`.
 * - `subscribe` / `unsubscribe` take the write lock for a single map insert
 *   or removal.
 * - `publish` takes the read lock and only performs non-blocking queue
 *   pushes while holding it, so many producers publish concurrently and none
 *   of them ever waits on a consumer.
 *
 * No tracing call is made while a lock is held: the tracing subscriber
 * itself publishes into this hub, and std locks are not re-entrant.
 */
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::mailbox::Mailbox;
use super::subscription::{Subscription, SubscriptionId};
use crate::shared::LogLine;

/// Publish/subscribe hub for log lines.
///
/// Cheap to clone; all clones share the same subscriber set. Create one per
/// process and hand clones to every producer and consumer.
///
/// # Example
///
/// ```rust
/// use livetail::backend::hub::LogHub;
///
/// let hub = LogHub::new(128);
/// let mut subscription = hub.subscribe();
/// hub.publish("server started");
/// assert_eq!(subscription.try_recv().unwrap().as_str(), "server started");
/// ```
#[derive(Clone)]
pub struct LogHub {
    inner: Arc<HubInner>,
}

struct HubInner {
    subscribers: RwLock<HashMap<SubscriptionId, Arc<Mailbox>>>,
    capacity: usize,
    published: AtomicU64,
}

/// Snapshot of the hub counters
#[derive(Debug, Clone, Serialize)]
pub struct HubStats {
    pub subscribers: usize,
    pub published: u64,
    pub dropped: u64,
    pub queues: Vec<QueueStats>,
}

/// Counters for one subscriber queue
#[derive(Debug, Clone, Serialize)]
pub struct QueueStats {
    pub id: SubscriptionId,
    pub pending: usize,
    pub capacity: usize,
    pub dropped: u64,
}

impl LogHub {
    /// Queue capacity used by [`LogHub::default`]
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create a hub whose subscriptions buffer up to `capacity` lines each
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(HubInner {
                subscribers: RwLock::new(HashMap::new()),
                capacity: capacity.max(1),
                published: AtomicU64::new(0),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<SubscriptionId, Arc<Mailbox>>> {
        self.inner.subscribers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SubscriptionId, Arc<Mailbox>>> {
        self.inner.subscribers.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Default per-subscriber capacity
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Deliver `line` to every current subscriber.
    ///
    /// Never blocks on a consumer. Full queues drop their oldest line.
    /// Returns the number of subscribers the line was queued for; zero
    /// subscribers is a valid no-op.
    pub fn publish(&self, line: impl Into<LogLine>) -> usize {
        let line = line.into();
        self.inner.published.fetch_add(1, Ordering::Relaxed);

        let subscribers = self.read();
        subscribers
            .values()
            .filter(|mailbox| mailbox.push(line.clone()))
            .count()
    }

    /// Register a subscriber with the hub's default capacity
    pub fn subscribe(&self) -> Subscription {
        self.subscribe_with_capacity(self.inner.capacity)
    }

    /// Register a subscriber with its own queue capacity
    pub fn subscribe_with_capacity(&self, capacity: usize) -> Subscription {
        let id = SubscriptionId::generate();
        let mailbox = Arc::new(Mailbox::new(capacity));
        let total = {
            let mut subscribers = self.write();
            subscribers.insert(id, Arc::clone(&mailbox));
            subscribers.len()
        };
        tracing::debug!("[Hub] Subscriber {} joined ({} active)", id, total);
        Subscription::new(id, mailbox, self.clone())
    }

    /// Remove a subscriber. Unknown or already removed ids are ignored.
    ///
    /// Returns whether a subscription was actually removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let (removed, total) = {
            let mut subscribers = self.write();
            let removed = subscribers.remove(&id);
            (removed, subscribers.len())
        };
        match removed {
            Some(mailbox) => {
                mailbox.close();
                tracing::debug!(
                    "[Hub] Subscriber {} left ({} active, {} dropped)",
                    id,
                    total,
                    mailbox.dropped()
                );
                true
            }
            None => false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().len()
    }

    pub fn stats(&self) -> HubStats {
        let queues: Vec<QueueStats> = self
            .read()
            .iter()
            .map(|(id, mailbox)| QueueStats {
                id: *id,
                pending: mailbox.len(),
                capacity: mailbox.capacity(),
                dropped: mailbox.dropped(),
            })
            .collect();
        HubStats {
            subscribers: queues.len(),
            published: self.inner.published.load(Ordering::Relaxed),
            dropped: queues.iter().map(|q| q.dropped).sum(),
            queues,
        }
    }
}

impl Default for LogHub {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for LogHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHub")
            .field("capacity", &self.inner.capacity)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
