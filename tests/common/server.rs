//! Test server helpers
//!
//! Starts the full application on `127.0.0.1:0` with its own hub and
//! shutdown token so tests can publish directly and observe subscriptions.

use livetail::backend::hub::LogHub;
use livetail::backend::server::create_app;
use livetail::shared::AppConfig;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct TestServer {
    pub base_url: String,
    pub hub: LogHub,
    pub shutdown: CancellationToken,
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
}

/// Configuration used by most tests: loopback, ephemeral port, fast generator
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .host("127.0.0.1")
        .port(0)
        .hub_capacity(64)
        .generator_interval_ms(20)
        .build()
        .expect("valid test configuration")
}

pub async fn spawn_server(config: AppConfig) -> TestServer {
    let hub = LogHub::new(config.hub.capacity);
    let shutdown = CancellationToken::new();
    let app = create_app(&config, hub.clone(), shutdown.clone()).await;

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().unwrap();

    let token = shutdown.clone();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await
            .expect("server error");
    });

    TestServer {
        base_url: format!("http://{}", addr),
        hub,
        shutdown,
        client: reqwest::Client::new(),
        handle,
    }
}

pub async fn spawn_default() -> TestServer {
    spawn_server(test_config()).await
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Cancel the shutdown token and wait for the server task to finish
    pub async fn stop(self) {
        self.shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not shut down")
            .expect("server task panicked");
    }
}

/// Poll `condition` until it holds or `limit` elapses
pub async fn eventually<F: FnMut() -> bool>(limit: Duration, mut condition: F) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
