/**
 * Tracing Subscriber Setup
 *
 * Installs the global tracing subscriber with two outputs:
 *
 * - a console layer (ANSI colors on stdout), only when the terminal
 *   dashboard is off, since the dashboard owns stdout;
 * - a broadcast layer without colors whose writer is a `FanoutWriter` over
 *   the hub and, in dashboard mode, the log pane.
 *
 * Every log call in the process therefore shows up on the console (or the
 * dashboard) and in every live SSE stream.
 */
use chrono::Local;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::backend::error::BackendError;
use crate::backend::hub::LogHub;
use crate::backend::producers::{FanoutWriter, HubWriter};
use crate::shared::AppConfig;
use crate::tui::LogPane;

/// `HH:MM:SS` local timestamps
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockTime;

impl FormatTime for ClockTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S"))
    }
}

/// Writer used by the broadcast layer
pub fn broadcast_writer(hub: &LogHub, pane: Option<LogPane>) -> FanoutWriter {
    let mut writer = FanoutWriter::new().with(HubWriter::new(hub.clone()));
    if let Some(pane) = pane {
        writer.push(pane);
    }
    writer
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &AppConfig, hub: &LogHub, pane: Option<LogPane>) -> Result<(), BackendError> {
    let default_level = if config.app.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console = (!config.app.enable_tui).then(|| {
        fmt::layer()
            .with_timer(ClockTime)
            .with_writer(std::io::stdout)
    });

    let broadcast = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_timer(ClockTime)
        .with_writer(broadcast_writer(hub, pane));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(broadcast)
        .try_init()
        .map_err(|e| BackendError::startup(format!("failed to install tracing subscriber: {}", e)))
}
