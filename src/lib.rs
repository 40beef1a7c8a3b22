//! Livetail - Main Library
//!
//! Livetail is the monitoring core of the application scaffold: an in-process
//! publish/subscribe hub for log lines, the producers that feed it, and the
//! consumers that stream it out to browsers (Server-Sent Events) and to the
//! live terminal dashboard.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared by every layer
//!   - `LogLine` payloads and the severity heuristic
//!   - Application configuration
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with the `server` feature)
//!   - Broadcast hub, subscriptions and delivery queues
//!   - Producer adapters (logger sink, demo generator, infra reporter)
//!   - Axum HTTP server with the SSE log and CPU streams
//!
//! - **`tui`** - Terminal dashboard
//!   - Bounded on-screen log pane fed through a write sink
//!   - Frame rendering and the redraw loop
//!
//! # Feature Flags
//!
//! - **`server`** (default) - Axum server, tracing wiring and the
//!   `monitor-server` binary
//!
//! # Data Flow
//!
//! ```text
//! tracing / generator / reporter ──► LogHub::publish ──► per-subscriber queues
//!                                                          ├─► GET /api/logs (SSE)
//!                                                          └─► ...
//! tracing ──► FanoutWriter ──► LogPane (terminal dashboard)
//! ```
//!
//! # Thread Safety
//!
//! - The hub is `Clone` and shares one `Arc` internally; publishing never
//!   waits on a consumer.
//! - Consumers own a `Subscription`; dropping it unsubscribes.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "server")]
pub mod backend;

/// Terminal dashboard
pub mod tui;
