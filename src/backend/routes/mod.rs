//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint registration
//! ```
//!
//! # Routes
//!
//! - `GET /health` - Liveness check, returns `ok`
//! - `GET /api/logs` - Live log stream (SSE)
//! - `GET /api/cpu` - CPU usage stream (SSE)
//! - `GET /api/logs/dummy/status` - Demo generator state
//! - `POST /api/logs/dummy` - Demo generator toggle
//! - `GET /api/logs/stats` - Hub statistics
//! - `/*` - Static monitoring dashboard

/// Main router creation
pub mod router;

/// API endpoint registration
pub mod api_routes;

pub use router::create_router;
