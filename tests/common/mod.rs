//! Common test utilities and helpers
//!
//! - Spawning a real server on an ephemeral port
//! - Reading Server-Sent Event bodies incrementally
//! - Polling helpers for eventually-true conditions

pub mod server;
pub mod sse;

pub use server::*;
pub use sse::*;
