/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. API routes (streams, generator control, statistics)
 * 3. Fallback: static dashboard files (`index.html` for `/`)
 *
 * Every request runs inside a `TraceLayer` span.
 */

use axum::Router;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the hub and generator
/// * `static_dir` - Directory holding the monitoring dashboard assets
pub fn create_router(app_state: AppState, static_dir: impl AsRef<Path>) -> Router<()> {
    let router = Router::new().route("/health", axum::routing::get(health));

    // Add API routes
    let router = configure_api_routes(router);

    // Everything else is served from the dashboard directory
    let router = router.fallback_service(ServeDir::new(static_dir));

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}

async fn health() -> &'static str {
    "ok"
}
