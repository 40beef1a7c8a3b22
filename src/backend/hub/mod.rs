//! Log Broadcast Hub Module
//!
//! In-process publish/subscribe for log lines. Producers call
//! [`LogHub::publish`]; every consumer owns a [`Subscription`] with its own
//! bounded queue and reads at its own pace.
//!
//! # Module Structure
//!
//! ```text
//! hub/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - LogHub and its statistics
//! ├── subscription.rs - Subscription handle and id
//! └── mailbox.rs      - Bounded drop-oldest delivery queue
//! ```
//!
//! # Delivery Guarantees
//!
//! - A subscriber sees every line published after it subscribed, in publish
//!   order, unless its queue overflowed.
//! - On overflow the oldest buffered line is dropped and counted.
//! - Publishing never waits for a consumer and is a no-op with zero
//!   subscribers.
//! - Dropping a `Subscription` unsubscribes it.

/// Hub and statistics
pub mod broadcast;

/// Subscription handles
pub mod subscription;

mod mailbox;

pub use broadcast::{HubStats, LogHub, QueueStats};
pub use subscription::{Subscription, SubscriptionId};
