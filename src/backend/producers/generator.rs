/**
 * Demo Log Generator
 *
 * Publishes a canned, randomly picked log line on a fixed interval so the
 * monitoring surface has something to show. It can be switched on and off at
 * runtime from the toggle endpoint.
 *
 * # States
 *
 * ```text
 *            enable()                disable()
 * Stopped ───────────────► Running ───────────────► Stopped
 *    ▲  disable(): AlreadyStopped   enable(): AlreadyRunning
 * ```
 *
 * The state lives behind a `tokio::sync::Mutex`, so concurrent toggles are
 * serialized. `disable` waits for the publishing task to exit; once it
 * returns no further generator line reaches the hub. A task that already
 * exited (server shutdown) counts as stopped, and `enable` refuses to start
 * once shutdown has begun.
 */
use chrono::{Local, SecondsFormat};
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::backend::hub::LogHub;

const LEVELS: &[&str] = &["INFO", "WARN", "ERROR", "DEBUG"];

const MESSAGES: &[&str] = &[
    "User login successful",
    "Cache miss for key user:123",
    "Database query took 150ms",
    "Background job processing started",
    "Kafka message consumed from topic: orders",
    "Payment gateway timeout",
    "Service health check passed",
    "Redis connection pool refreshing",
];

/// Marker prefixed to every generated message
pub const DEMO_MARKER: &str = "[DUMMY]";

/// Outcome of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Started,
    AlreadyRunning,
    Stopped,
    AlreadyStopped,
    /// Shutdown has begun; nothing was started
    Unavailable,
}

impl Toggle {
    /// Message reported back to the client
    pub fn message(&self) -> &'static str {
        match self {
            Self::Started => "Dummy logs enabled",
            Self::AlreadyRunning => "Already active",
            Self::Stopped => "Dummy logs disabled",
            Self::AlreadyStopped => "Already inactive",
            Self::Unavailable => "Server is shutting down",
        }
    }
}

enum GeneratorState {
    Stopped,
    Running {
        cancel: CancellationToken,
        task: JoinHandle<()>,
    },
}

/// Runtime-toggleable producer of synthetic log lines
#[derive(Clone)]
pub struct DemoGenerator {
    hub: LogHub,
    interval: Duration,
    shutdown: CancellationToken,
    state: Arc<Mutex<GeneratorState>>,
}

#[derive(Serialize)]
struct DemoLine<'a> {
    time: String,
    level: &'a str,
    message: String,
}

impl DemoGenerator {
    /// The generator stops on its own once `shutdown` is cancelled.
    pub fn new(hub: LogHub, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            hub,
            interval,
            shutdown,
            state: Arc::new(Mutex::new(GeneratorState::Stopped)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start publishing. The first line goes out immediately.
    pub async fn enable(&self) -> Toggle {
        let mut state = self.state.lock().await;
        if self.shutdown.is_cancelled() {
            return Toggle::Unavailable;
        }
        if let GeneratorState::Running { task, .. } = &*state {
            if !task.is_finished() {
                return Toggle::AlreadyRunning;
            }
        }

        let cancel = self.shutdown.child_token();
        let task = tokio::spawn(run(self.hub.clone(), self.interval, cancel.clone()));
        *state = GeneratorState::Running { cancel, task };
        drop(state);

        tracing::info!(
            "[Generator] Demo logs enabled (every {}ms)",
            self.interval.as_millis()
        );
        Toggle::Started
    }

    /// Stop publishing and wait for the task to exit
    pub async fn disable(&self) -> Toggle {
        let mut state = self.state.lock().await;
        match std::mem::replace(&mut *state, GeneratorState::Stopped) {
            GeneratorState::Stopped => Toggle::AlreadyStopped,
            GeneratorState::Running { cancel, task } => {
                let finished = task.is_finished();
                cancel.cancel();
                if let Err(e) = task.await {
                    tracing::warn!("[Generator] Task ended abnormally: {}", e);
                }
                drop(state);
                if finished {
                    return Toggle::AlreadyStopped;
                }
                tracing::info!("[Generator] Demo logs disabled");
                Toggle::Stopped
            }
        }
    }

    pub async fn is_running(&self) -> bool {
        match &*self.state.lock().await {
            GeneratorState::Stopped => false,
            GeneratorState::Running { task, .. } => !task.is_finished(),
        }
    }
}

impl std::fmt::Debug for DemoGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoGenerator")
            .field("interval", &self.interval)
            .finish()
    }
}

async fn run(hub: LogHub, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                match demo_line() {
                    Ok(line) => {
                        hub.publish(line);
                    }
                    Err(e) => eprintln!("[Generator] failed to encode demo line: {}", e),
                }
            }
        }
    }
}

/// Build one JSON demo line: `{"time":..,"level":..,"message":"[DUMMY] .."}`
fn demo_line() -> Result<String, serde_json::Error> {
    let mut rng = rand::thread_rng();
    let level = LEVELS.choose(&mut rng).copied().unwrap_or("INFO");
    let message = MESSAGES.choose(&mut rng).copied().unwrap_or("Service health check passed");

    serde_json::to_string(&DemoLine {
        time: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        level,
        message: format!("{} {}", DEMO_MARKER, message),
    })
}
