/**
 * API Route Handlers
 *
 * This module registers the monitoring API endpoints:
 *
 * # Routes
 *
 * ## Streams
 * - `GET /api/logs` - Live log stream (SSE)
 * - `GET /api/cpu` - CPU usage stream (SSE)
 *
 * ## Demo generator
 * - `GET /api/logs/dummy/status` - Whether the generator is running
 * - `POST /api/logs/dummy` - Start or stop the generator
 *
 * ## Diagnostics
 * - `GET /api/logs/stats` - Hub subscriber and drop counters
 */

use axum::Router;

use crate::backend::realtime::{dummy_status, hub_stats, stream_cpu, stream_logs, toggle_dummy};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Streaming endpoints
        .route("/api/logs", axum::routing::get(stream_logs))
        .route("/api/cpu", axum::routing::get(stream_cpu))
        // Demo generator endpoints
        .route("/api/logs/dummy/status", axum::routing::get(dummy_status))
        .route("/api/logs/dummy", axum::routing::post(toggle_dummy))
        // Hub statistics
        .route("/api/logs/stats", axum::routing::get(hub_stats))
}
