//! Backend Module
//!
//! This module contains all server-side code: the log broadcast hub, the
//! producers that publish into it and the Axum HTTP server that streams it.
//!
//! This module is only compiled when the `server` feature is enabled.
//!
//! # Architecture
//!
//! - **`hub`** - Broadcast hub, subscriptions, bounded delivery queues
//! - **`producers`** - Hub write sink, fan-out writer, demo generator,
//!   infrastructure reporter
//! - **`logging`** - Global tracing subscriber wiring
//! - **`realtime`** - SSE log and CPU streams, generator control endpoints
//! - **`server`** - Application state and app creation
//! - **`routes`** - Route configuration
//! - **`error`** - Backend error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - monitor-server binary
//! ├── hub/            - Publish/subscribe core
//! ├── producers/      - Producer adapters
//! ├── logging.rs      - Tracing setup
//! ├── realtime/       - Streaming handlers
//! ├── server/         - State and initialization
//! ├── routes/         - Route configuration
//! └── error/          - Error types
//! ```
//!
//! # Data Flow
//!
//! ```text
//! tracing event ─► FanoutWriter ─┬─► HubWriter ─► LogHub::publish
//!                                └─► LogPane (dashboard mode)
//! DemoGenerator ──────────────────────────────► LogHub::publish
//! InfraReporter ──────────────────────────────► LogHub::publish
//!
//! LogHub ─► Subscription ─► GET /api/logs (one per client)
//! ```
//!
//! # Thread Safety
//!
//! - `LogHub` is `Clone` over a shared `Arc`; `publish` never waits on a
//!   consumer.
//! - The demo generator serializes its state transitions behind a
//!   `tokio::sync::Mutex`.
//! - Every long-lived stream is tied to a child of the shutdown
//!   `CancellationToken`.
//!
//! # Example
//!
//! ```rust,no_run
//! use livetail::backend::hub::LogHub;
//! use livetail::backend::server::create_app;
//! use livetail::shared::AppConfig;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> std::io::Result<()> {
//! let config = AppConfig::default();
//! let hub = LogHub::new(config.hub.capacity);
//! let shutdown = CancellationToken::new();
//! let app = create_app(&config, hub, shutdown.clone()).await;
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app)
//!     .with_graceful_shutdown(async move { shutdown.cancelled().await })
//!     .await
//! # }
//! ```

/// Broadcast hub
pub mod hub;

/// Producer adapters
pub mod producers;

/// Tracing subscriber setup
pub mod logging;

/// Streaming handlers
pub mod realtime;

/// Server setup and state
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use hub::{LogHub, Subscription, SubscriptionId};
pub use producers::{DemoGenerator, FanoutWriter, HubWriter, InfraReporter, Toggle};
pub use server::create_app;
