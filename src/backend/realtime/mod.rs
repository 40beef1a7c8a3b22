//! Real-time Streaming Module
//!
//! HTTP surface of the monitoring subsystem: the Server-Sent Events streams
//! and the small JSON endpoints that control and inspect them.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs      - Module exports and documentation
//! ├── logs.rs     - GET /api/logs (SSE log stream)
//! ├── cpu.rs      - GET /api/cpu (SSE CPU usage stream)
//! └── control.rs  - Demo generator toggle/status and hub statistics
//! ```
//!
//! # Stream Lifetime
//!
//! Every stream runs on a child of the server's shutdown token, so all of
//! them end when the server stops and graceful shutdown can complete. A
//! client that disconnects earlier drops the response body, which releases
//! its hub subscription.

/// SSE log stream
pub mod logs;

/// SSE CPU usage stream
pub mod cpu;

/// Generator control and statistics
pub mod control;

pub use control::{dummy_status, hub_stats, toggle_dummy};
pub use cpu::stream_cpu;
pub use logs::{sse_frame, stream_logs};
