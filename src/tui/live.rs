//! Live terminal dashboard
//!
//! Redraws a plain-text frame (banner, status line, progress animation and
//! the most recent log pane entries) at a fixed refresh rate until the
//! shutdown token fires.

use chrono::Local;
use std::io::Write;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::pane::{LogPane, PaneEntry};

const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";
const BAR_WIDTH: usize = 30;
const BAR_FILL: usize = 10;
const BAR_FRAMES: usize = BAR_WIDTH + BAR_FILL;
const LOG_RULE_WIDTH: usize = 60;

/// Static information shown in the dashboard header
#[derive(Debug, Clone)]
pub struct DashboardInfo {
    pub name: String,
    pub version: String,
    pub env: String,
    pub port: u16,
    pub banner: Option<String>,
}

pub struct LiveDashboard {
    info: DashboardInfo,
    pane: LogPane,
    refresh: Duration,
    started: Instant,
    frame: usize,
}

impl LiveDashboard {
    pub fn new(info: DashboardInfo, pane: LogPane, refresh: Duration) -> Self {
        Self {
            info,
            pane,
            refresh,
            started: Instant::now(),
            frame: 0,
        }
    }

    /// Render the current frame
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(banner) = self.info.banner.as_deref().filter(|b| !b.trim().is_empty()) {
            out.push_str(banner.trim_end());
            out.push('\n');
        }

        out.push_str(&format!("⚡ {} v{} ⚡\n", self.info.name, self.info.version));
        out.push_str(&format!(
            "  ● RUNNING  │  Port: {}  │  Env: {}  │  Uptime: {}\n\n",
            self.info.port,
            self.info.env,
            format_uptime(self.started.elapsed())
        ));

        out.push_str("  ");
        out.push_str(&progress_bar(self.frame));
        out.push_str("\n\n");

        out.push_str("◆ Live Logs\n");
        out.push_str(&"─".repeat(LOG_RULE_WIDTH));
        out.push('\n');
        let entries = self.pane.snapshot();
        if entries.is_empty() {
            out.push_str("  Waiting for logs...\n");
        }
        for entry in &entries {
            out.push_str(&format_entry(entry));
            out.push('\n');
        }

        out.push_str(&format!(
            "\n  Press Ctrl+C to quit  │  {}\n",
            Local::now().format("%H:%M:%S")
        ));
        out
    }

    /// Redraw into `out` every refresh period until `cancel` fires.
    ///
    /// A failed write ends the loop; nothing else is affected.
    pub async fn run<W: Write>(mut self, mut out: W, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.refresh);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let frame = self.render();
                    let drawn = out
                        .write_all(CLEAR_SCREEN)
                        .and_then(|_| out.write_all(frame.as_bytes()))
                        .and_then(|_| out.flush());
                    if let Err(e) = drawn {
                        tracing::warn!("[TUI] Dashboard output failed, stopping redraw: {}", e);
                        break;
                    }
                    self.frame = (self.frame + 1) % BAR_FRAMES;
                }
            }
        }
    }
}

fn format_entry(entry: &PaneEntry) -> String {
    format!(
        "  {} [{:<5}] {}",
        entry.time.format("%H:%M:%S"),
        entry.level.label(),
        entry.message
    )
}

/// Looping bar: a block of `BAR_FILL` cells slides in from the left and out
/// on the right.
fn progress_bar(frame: usize) -> String {
    let frame = frame % BAR_FRAMES;
    let start = frame.saturating_sub(BAR_FILL - 1);
    let end = (frame + 1).min(BAR_WIDTH);
    (0..BAR_WIDTH)
        .map(|i| if i >= start && i < end { '█' } else { '░' })
        .collect()
}

fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{}h{}m{}s", h, m, s)
    } else if m > 0 {
        format!("{}m{}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::LogLevel;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn info() -> DashboardInfo {
        DashboardInfo {
            name: "livetail".to_string(),
            version: "0.1.0".to_string(),
            env: "test".to_string(),
            port: 3000,
            banner: Some("== LIVETAIL ==".to_string()),
        }
    }

    #[derive(Clone, Default)]
    struct Screen(Arc<Mutex<Vec<u8>>>);

    impl Write for Screen {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_progress_bar_frames() {
        assert_eq!(progress_bar(0), format!("█{}", "░".repeat(29)));
        assert_eq!(progress_bar(10), format!("░{}{}", "█".repeat(10), "░".repeat(19)));
        assert_eq!(progress_bar(29), format!("{}{}", "░".repeat(20), "█".repeat(10)));
        assert_eq!(progress_bar(39), "░".repeat(30));
        assert_eq!(progress_bar(40), progress_bar(0));
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(5)), "5s");
        assert_eq!(format_uptime(Duration::from_secs(65)), "1m5s");
        assert_eq!(format_uptime(Duration::from_secs(3725)), "1h2m5s");
    }

    #[test]
    fn test_render_empty_pane() {
        let dashboard = LiveDashboard::new(info(), LogPane::new(15), Duration::from_millis(100));
        let frame = dashboard.render();
        assert!(frame.starts_with("== LIVETAIL ==\n"));
        assert!(frame.contains("⚡ livetail v0.1.0 ⚡"));
        assert!(frame.contains("RUNNING"));
        assert!(frame.contains("Port: 3000"));
        assert!(frame.contains("Waiting for logs..."));
    }

    #[test]
    fn test_render_entries() {
        let pane = LogPane::new(15);
        pane.push(LogLevel::Warn, "Payment gateway timeout");
        let dashboard = LiveDashboard::new(info(), pane, Duration::from_millis(100));

        let frame = dashboard.render();
        assert!(frame.contains("[WARN ] Payment gateway timeout"));
        assert!(!frame.contains("Waiting for logs..."));
    }

    #[tokio::test]
    async fn test_run_redraws_until_cancelled() {
        let screen = Screen::default();
        let cancel = CancellationToken::new();
        let dashboard = LiveDashboard::new(info(), LogPane::new(15), Duration::from_millis(10));
        let task = tokio::spawn(dashboard.run(screen.clone(), cancel.clone()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), task).await.unwrap().unwrap();

        let drawn = String::from_utf8(screen.0.lock().unwrap().clone()).unwrap();
        assert!(drawn.matches("◆ Live Logs").count() >= 2);
    }

    #[tokio::test]
    async fn test_run_stops_on_write_error() {
        let dashboard = LiveDashboard::new(info(), LogPane::new(15), Duration::from_millis(10));
        let cancel = CancellationToken::new();
        tokio::time::timeout(Duration::from_secs(1), dashboard.run(Closed, cancel))
            .await
            .expect("redraw loop should end on its own");
    }
}
