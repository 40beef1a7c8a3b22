/**
 * Infrastructure Event Reporter
 *
 * Turns events from infrastructure wrappers (listener, background services,
 * external clients) into operator-facing lines of the form
 *
 * ```text
 * 14:03:22 ERROR [http] address already in use
 * ```
 *
 * and publishes them to the hub. When the terminal dashboard is running the
 * same event is also pushed onto its log pane.
 */
use chrono::Local;
use std::fmt::Display;

use crate::backend::hub::LogHub;
use crate::shared::LogLevel;
use crate::tui::LogPane;

#[derive(Debug, Clone)]
pub struct InfraReporter {
    hub: LogHub,
    pane: Option<LogPane>,
}

impl InfraReporter {
    pub fn new(hub: LogHub) -> Self {
        Self { hub, pane: None }
    }

    /// Also mirror reported events onto the dashboard pane
    pub fn with_pane(mut self, pane: LogPane) -> Self {
        self.pane = Some(pane);
        self
    }

    pub fn report_error(&self, component: &str, err: &dyn std::error::Error) {
        self.report_event(component, LogLevel::Error, err);
    }

    /// Publish one event. Returns the formatted line.
    pub fn report_event(&self, component: &str, level: LogLevel, message: impl Display) -> String {
        let message = message.to_string();
        let line = format_event(&Local::now().format("%H:%M:%S").to_string(), level, component, &message);
        self.hub.publish(line.as_str());
        if let Some(pane) = &self.pane {
            pane.push(level, format!("[{}] {}", component, message));
        }
        line
    }
}

fn format_event(time: &str, level: LogLevel, component: &str, message: &str) -> String {
    format!("{} {} [{}] {}", time, level.label(), component, message)
}
