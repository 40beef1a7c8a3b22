/**
 * Subscription Handles
 *
 * A `Subscription` is the consumer side of one registration with the hub.
 * It can only read from its own queue; all registration state lives in the
 * hub. Dropping the handle unregisters it, so every exit path of a consumer
 * (normal return, `?` error, panic, a dropped response body when an HTTP
 * client disconnects) releases the subscription without extra bookkeeping.
 */
use futures_util::stream::{self, Stream};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::broadcast::LogHub;
use super::mailbox::Mailbox;
use crate::shared::LogLine;

/// Unique identity of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for SubscriptionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Read handle onto one subscriber queue.
///
/// Lines arrive in publish order. If the consumer falls behind by more than
/// the queue capacity the oldest lines are skipped; see [`Subscription::dropped`].
pub struct Subscription {
    id: SubscriptionId,
    mailbox: Arc<Mailbox>,
    hub: LogHub,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, mailbox: Arc<Mailbox>, hub: LogHub) -> Self {
        Self { id, mailbox, hub }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Wait for the next line.
    ///
    /// Returns `None` once the subscription has been removed from the hub.
    pub async fn recv(&mut self) -> Option<LogLine> {
        self.mailbox.recv().await
    }

    /// Take the next buffered line without waiting
    pub fn try_recv(&mut self) -> Option<LogLine> {
        self.mailbox.pop()
    }

    /// Take every buffered line
    pub fn drain(&mut self) -> Vec<LogLine> {
        self.mailbox.drain()
    }

    /// Lines evicted from this queue because it was full
    pub fn dropped(&self) -> u64 {
        self.mailbox.dropped()
    }

    pub fn pending(&self) -> usize {
        self.mailbox.len()
    }

    pub fn capacity(&self) -> usize {
        self.mailbox.capacity()
    }

    /// False once the hub no longer delivers to this subscription
    pub fn is_active(&self) -> bool {
        !self.mailbox.is_closed()
    }

    /// Turn the subscription into a stream that ends when `cancel` fires or
    /// the subscription is removed. The subscription is released as soon as
    /// the stream ends or is dropped.
    pub fn into_stream(self, cancel: CancellationToken) -> impl Stream<Item = LogLine> + Send + 'static {
        stream::unfold((self, cancel), |(mut subscription, cancel)| async move {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                line = subscription.recv() => line,
            };
            next.map(|line| (line, (subscription, cancel)))
        })
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("pending", &self.pending())
            .field("dropped", &self.dropped())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}
