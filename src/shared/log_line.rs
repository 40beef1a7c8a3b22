/**
 * Log Line Payloads
 *
 * This module defines the unit that flows through the broadcast hub. A log
 * line is an opaque, immutable text payload: producers may put plain text,
 * JSON or ANSI-colored output into it and the hub never looks inside.
 *
 * The severity helpers are only used by consumers that want to render a
 * level (the terminal pane). They work on a best-effort basis and default to
 * `info` when nothing recognizable is found.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How many leading whitespace-separated tokens are scanned for a level.
const LEVEL_SCAN_TOKENS: usize = 3;

/// A single published log line.
///
/// Cloning is cheap: the payload is reference counted so that one publish
/// can be fanned out to every subscriber without copying the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    payload: Arc<str>,
    received_at: DateTime<Utc>,
}

impl LogLine {
    /// Create a line stamped with the current time
    pub fn new(payload: impl Into<Arc<str>>) -> Self {
        Self {
            payload: payload.into(),
            received_at: Utc::now(),
        }
    }

    /// The raw payload
    pub fn as_str(&self) -> &str {
        &self.payload
    }

    /// When the line entered the hub
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

impl From<&str> for LogLine {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LogLine {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)
    }
}

/// Severity recognized in a log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    /// Recognize a level token such as `INF`, `WARN`, `[error]` or `FATAL:`.
    ///
    /// Matching is case-insensitive. `PANIC` is folded into `Fatal`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token
            .trim_start_matches(['[', '('])
            .trim_end_matches([']', ')', ':']);
        match token.to_ascii_uppercase().as_str() {
            "DBG" | "DEBUG" | "TRACE" => Some(Self::Debug),
            "INF" | "INFO" => Some(Self::Info),
            "WRN" | "WARN" | "WARNING" => Some(Self::Warn),
            "ERR" | "ERROR" => Some(Self::Error),
            "FTL" | "FATAL" | "PNC" | "PANIC" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Upper-case label used when rendering
    pub fn label(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Split a formatted log line into a level and the remaining message.
///
/// Recognizes, in order:
/// 1. JSON objects carrying a `level` field (message from `message` or `msg`)
/// 2. an upper-case level token among the first few words, e.g.
///    `15:00:51  WARN cache: miss` or `[ERROR] boom`. Directly after a clock
///    timestamp any case is accepted (`15:00:51 wrn cache miss`).
///
/// Anything else is reported as `info` with the whole trimmed line.
pub fn parse_line(line: &str) -> (LogLevel, String) {
    let trimmed = line.trim();

    if trimmed.starts_with('{') {
        if let Some(parsed) = parse_json_line(trimmed) {
            return parsed;
        }
    }

    let mut rest = trimmed;
    let mut after_clock = false;
    for _ in 0..LEVEL_SCAN_TOKENS {
        let candidate = rest.trim_start();
        if candidate.is_empty() {
            break;
        }
        let end = candidate
            .find(char::is_whitespace)
            .unwrap_or(candidate.len());
        let (token, after) = candidate.split_at(end);
        if after_clock || is_upper_token(token) {
            if let Some(level) = LogLevel::from_token(token) {
                return (level, after.trim().to_string());
            }
        }
        after_clock = is_clock_token(token);
        rest = after;
    }

    (LogLevel::Info, trimmed.to_string())
}

fn parse_json_line(line: &str) -> Option<(LogLevel, String)> {
    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    let object = value.as_object()?;
    let level = object
        .get("level")
        .and_then(|v| v.as_str())
        .and_then(LogLevel::from_token)?;
    let message = object
        .get("message")
        .or_else(|| object.get("msg"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| line.to_string());
    Some((level, message))
}

/// `HH:MM:SS`, optionally with fractional seconds
fn is_clock_token(token: &str) -> bool {
    let mut fields = token.split(':');
    let clock = (fields.next(), fields.next(), fields.next(), fields.next());
    match clock {
        (Some(h), Some(m), Some(s), None) => {
            let seconds = s.split('.').next().unwrap_or(s);
            [h, m, seconds]
                .iter()
                .all(|field| field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit()))
        }
        _ => false,
    }
}

fn is_upper_token(token: &str) -> bool {
    let mut letters = token.chars().filter(|c| c.is_ascii_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_ascii_uppercase())
}
