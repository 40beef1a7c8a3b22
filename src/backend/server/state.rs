/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container, holding:
 * - The log hub every producer and consumer shares
 * - The demo generator behind the toggle endpoints
 * - The shutdown token that ends long-lived streams
 * - Stream settings taken from the configuration
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract only the part of
 * the state they need, e.g. `State<LogHub>` or `State<DemoGenerator>`.
 */

use axum::extract::FromRef;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::backend::hub::LogHub;
use crate::backend::producers::DemoGenerator;

/// Application state shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Process-wide log hub
    pub hub: LogHub,

    /// Toggleable demo log generator
    pub generator: DemoGenerator,

    /// Cancelled when the server shuts down. Every streaming response runs
    /// on a child of this token.
    pub shutdown: CancellationToken,

    /// Idle time before an SSE keep-alive comment is sent
    pub keep_alive: Duration,

    /// Period of the CPU usage stream
    pub cpu_interval: Duration,
}

impl AppState {
    pub fn new(hub: LogHub, generator: DemoGenerator, shutdown: CancellationToken, keep_alive: Duration) -> Self {
        Self {
            hub,
            generator,
            shutdown,
            keep_alive,
            cpu_interval: Duration::from_secs(1),
        }
    }
}

impl FromRef<AppState> for LogHub {
    fn from_ref(state: &AppState) -> Self {
        state.hub.clone()
    }
}

impl FromRef<AppState> for DemoGenerator {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}
