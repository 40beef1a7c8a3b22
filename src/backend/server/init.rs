/**
 * Server Initialization
 *
 * Builds the application state from the configuration and the process-wide
 * hub, applies generator autostart and returns the configured router.
 *
 * # Initialization Flow
 *
 * 1. **Generator**: created stopped, bound to the shutdown token
 * 2. **Autostart**: enabled right away when `generator.autostart` is set
 * 3. **State**: hub, generator, shutdown token and stream settings
 * 4. **Router**: all routes, static dashboard files and request tracing
 */

use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::backend::hub::LogHub;
use crate::backend::producers::DemoGenerator;
use crate::backend::routes::create_router;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create the Axum app
///
/// # Example
///
/// ```rust,no_run
/// use livetail::backend::hub::LogHub;
/// use livetail::backend::server::create_app;
/// use livetail::shared::AppConfig;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let hub = LogHub::new(config.hub.capacity);
/// let app = create_app(&config, hub, CancellationToken::new()).await;
/// # }
/// ```
pub async fn create_app(config: &AppConfig, hub: LogHub, shutdown: CancellationToken) -> Router<()> {
    tracing::info!("[Server] Initializing {} v{}", config.app.name, config.app.version);

    let generator = DemoGenerator::new(hub.clone(), config.generator_interval(), shutdown.clone());
    if config.generator.autostart {
        generator.enable().await;
    }

    let app_state = AppState::new(hub, generator, shutdown, config.keep_alive());
    let router = create_router(app_state, &config.server.static_dir);

    tracing::info!("[Server] Router configured (static files from {})", config.server.static_dir);
    router
}
