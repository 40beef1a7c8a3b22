/**
 * Monitor Server Entry Point
 *
 * Loads the configuration, wires the log hub into tracing, starts the HTTP
 * server and, when enabled, the live terminal dashboard. Ctrl-C or SIGTERM
 * cancels the shutdown token, which ends every SSE stream and the dashboard
 * so graceful shutdown can complete.
 */

use livetail::backend::hub::LogHub;
use livetail::backend::logging;
use livetail::backend::producers::InfraReporter;
use livetail::backend::server::create_app;
use livetail::shared::{AppConfig, LogLevel};
use livetail::tui::{DashboardInfo, LiveDashboard, LogPane};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let config = AppConfig::load()?;
    let hub = LogHub::new(config.hub.capacity);
    let pane = config.app.enable_tui.then(|| LogPane::new(config.tui.max_lines));

    logging::init(&config, &hub, pane.clone())?;
    tracing::info!(
        "[Startup] {} v{} ({})",
        config.app.name,
        config.app.version,
        config.app.env
    );

    let mut reporter = InfraReporter::new(hub.clone());
    if let Some(pane) = &pane {
        reporter = reporter.with_pane(pane.clone());
    }

    let shutdown = CancellationToken::new();
    let app = create_app(&config, hub, shutdown.clone()).await;

    let listener = match tokio::net::TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            reporter.report_error("http", &e);
            tracing::error!("[Startup] Failed to bind {}: {}", config.bind_address(), e);
            return Err(e.into());
        }
    };
    let addr = listener.local_addr()?;
    reporter.report_event("http", LogLevel::Info, format!("listening on {}", addr));
    tracing::info!("[Startup] Dashboard at http://127.0.0.1:{}", addr.port());

    let dashboard = pane.map(|pane| {
        let info = DashboardInfo {
            name: config.app.name.clone(),
            version: config.app.version.clone(),
            env: config.app.env.clone(),
            port: addr.port(),
            banner: load_banner(&config),
        };
        let dashboard = LiveDashboard::new(info, pane, config.tui_refresh());
        tokio::spawn(dashboard.run(std::io::stdout(), shutdown.clone()))
    });

    let serve_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await;
    shutdown.cancel();

    if let Some(dashboard) = dashboard {
        if let Err(e) = dashboard.await {
            tracing::warn!("[Shutdown] Dashboard task failed: {}", e);
        }
    }

    if let Err(e) = serve_result {
        reporter.report_error("http", &e);
        return Err(e.into());
    }
    tracing::info!("[Shutdown] Server stopped");
    Ok(())
}

/// Banner text from `app.banner_path`, if configured and readable
fn load_banner(config: &AppConfig) -> Option<String> {
    let path = config.app.banner_path.as_ref()?;
    match std::fs::read_to_string(path) {
        Ok(banner) => Some(banner),
        Err(e) => {
            tracing::warn!("[Startup] Could not read banner {}: {}", path, e);
            None
        }
    }
}

/// Resolves on Ctrl-C or SIGTERM and cancels `shutdown`
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("[Shutdown] Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("[Shutdown] Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = shutdown.cancelled() => {},
    }

    tracing::info!("[Shutdown] Signal received, closing streams");
    shutdown.cancel();
}
