/**
 * Bounded Delivery Queue
 *
 * One mailbox per subscription. The hub is the only writer and the owning
 * subscription the only reader. When the queue is full the oldest line is
 * evicted so a stalled consumer always resumes with the freshest activity.
 *
 * The queue mutex is only held for a single push/pop/clear, never across an
 * await point, so `push` stays non-blocking from the publisher's side.
 */
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

use crate::shared::LogLine;

#[derive(Debug)]
pub(crate) struct Mailbox {
    queue: Mutex<VecDeque<LogLine>>,
    capacity: usize,
    notify: Notify,
    dropped: AtomicU64,
    closed: AtomicBool,
}

impl Mailbox {
    /// Capacity is clamped to at least one slot.
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            notify: Notify::new(),
            dropped: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogLine>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue a line, evicting the oldest one when full.
    ///
    /// Returns `false` if the mailbox was already closed.
    pub(crate) fn push(&self, line: LogLine) -> bool {
        {
            let mut queue = self.lock();
            if self.closed.load(Ordering::Acquire) {
                return false;
            }
            if queue.len() >= self.capacity {
                queue.pop_front();
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            queue.push_back(line);
        }
        // Stores a permit when nobody is waiting yet.
        self.notify.notify_one();
        true
    }

    pub(crate) fn pop(&self) -> Option<LogLine> {
        self.lock().pop_front()
    }

    pub(crate) fn drain(&self) -> Vec<LogLine> {
        self.lock().drain(..).collect()
    }

    /// Wait for the next line. Resolves to `None` once the mailbox is closed.
    pub(crate) async fn recv(&self) -> Option<LogLine> {
        loop {
            if let Some(line) = self.pop() {
                return Some(line);
            }
            if self.is_closed() {
                return None;
            }
            self.notify.notified().await;
        }
    }

    /// Discard buffered lines and refuse further pushes.
    pub(crate) fn close(&self) {
        {
            let mut queue = self.lock();
            self.closed.store(true, Ordering::Release);
            queue.clear();
        }
        self.notify.notify_one();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
