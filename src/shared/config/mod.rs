//! Application configuration module
//!
//! Configuration is read from an optional TOML file and then overridden by
//! environment variables. Every field has a default so an empty (or missing)
//! file yields a runnable configuration.
//!
//! ```toml
//! [app]
//! name = "livetail"
//! enable_tui = true
//!
//! [server]
//! port = 8080
//!
//! [hub]
//! capacity = 512
//!
//! [generator]
//! interval_ms = 250
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::shared::error::SharedError;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "LIVETAIL_CONFIG";

/// Config file used when `LIVETAIL_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "livetail.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub server: ServerSection,
    pub hub: HubSection,
    pub generator: GeneratorSection,
    pub tui: TuiSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    pub version: String,
    pub env: String,
    pub debug: bool,
    /// Run the live terminal dashboard instead of plain console logging
    pub enable_tui: bool,
    pub banner_path: Option<String>,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "livetail".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            env: "development".to_string(),
            debug: false,
            enable_tui: false,
            banner_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Directory holding the monitoring dashboard assets
    pub static_dir: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "web/monitoring".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubSection {
    /// Per-subscriber queue capacity
    pub capacity: usize,
    /// Idle seconds before an SSE keep-alive comment is sent
    pub keep_alive_secs: u64,
}

impl Default for HubSection {
    fn default() -> Self {
        Self {
            capacity: 256,
            keep_alive_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    pub interval_ms: u64,
    pub autostart: bool,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            autostart: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TuiSection {
    pub max_lines: usize,
    pub refresh_ms: u64,
}

impl Default for TuiSection {
    fn default() -> Self {
        Self {
            max_lines: 15,
            refresh_ms: 100,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load the configuration the way the binary does: file, then
    /// environment overrides, then validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. A missing file yields the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[Config] {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply environment-style overrides using `lookup` to resolve keys.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = parse_value("SERVER_PORT", &port)?;
        }
        if let Some(enable) = lookup("LIVETAIL_ENABLE_TUI") {
            self.app.enable_tui = parse_flag(&enable);
        }
        if let Some(debug) = lookup("LIVETAIL_DEBUG") {
            self.app.debug = parse_flag(&debug);
        }
        if let Some(capacity) = lookup("LIVETAIL_HUB_CAPACITY") {
            self.hub.capacity = parse_value("LIVETAIL_HUB_CAPACITY", &capacity)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hub.capacity == 0 {
            return Err(SharedError::validation("hub.capacity", "must be at least 1").into());
        }
        if self.hub.keep_alive_secs == 0 {
            return Err(SharedError::validation("hub.keep_alive_secs", "must be at least 1").into());
        }
        if self.generator.interval_ms == 0 {
            return Err(SharedError::validation("generator.interval_ms", "must be at least 1").into());
        }
        if self.tui.max_lines == 0 {
            return Err(SharedError::validation("tui.max_lines", "must be at least 1").into());
        }
        if self.tui.refresh_ms == 0 {
            return Err(SharedError::validation("tui.refresh_ms", "must be at least 1").into());
        }
        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn generator_interval(&self) -> Duration {
        Duration::from_millis(self.generator.interval_ms)
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.hub.keep_alive_secs)
    }

    pub fn tui_refresh(&self) -> Duration {
        Duration::from_millis(self.tui.refresh_ms)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value: value.to_string() })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn hub_capacity(mut self, capacity: usize) -> Self {
        self.config.hub.capacity = capacity;
        self
    }

    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.config.hub.keep_alive_secs = secs;
        self
    }

    pub fn generator_interval_ms(mut self, interval_ms: u64) -> Self {
        self.config.generator.interval_ms = interval_ms;
        self
    }

    pub fn tui_max_lines(mut self, max_lines: usize) -> Self {
        self.config.tui.max_lines = max_lines;
        self
    }

    pub fn enable_tui(mut self, enable: bool) -> Self {
        self.config.app.enable_tui = enable;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.app.debug = debug;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error(transparent)]
    Invalid(#[from] SharedError),
}
