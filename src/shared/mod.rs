//! Shared Module
//!
//! Types used by both the backend server and the terminal dashboard. Nothing
//! in here depends on the HTTP stack.

/// Log line payloads and severity parsing
pub mod log_line;

/// Partial-line assembly for write sinks
pub mod line_buffer;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use log_line::{parse_line, LogLevel, LogLine};
pub use line_buffer::LineBuffer;
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
