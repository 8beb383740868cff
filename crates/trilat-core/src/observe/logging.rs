//! # Structured Logging
//!
//! The solver reports its rejections and candidate counts as `trace` events
//! through `tracing`. Nothing is printed until a subscriber is installed; this
//! module installs one.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trilat_core::observe::{init_logging, LogConfig, LogLevel};
//!
//! let config = LogConfig {
//!     level: LogLevel::Trace,
//!     ..Default::default()
//! };
//! init_logging(&config);
//!
//! // Rejections now show up as "trilateration rejected" events.
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every solve outcome
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Machine-readable, one JSON object per event
    Json,
    /// Multi-line, colored
    #[default]
    Pretty,
    /// One line per event
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Include source location (file:line)
    pub source_location: bool,
    pub thread_ids: bool,
    /// Directive string such as `"trilat_core=trace"`; overrides `level`
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            source_location: false,
            thread_ids: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Verbose output with every solver event.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Trace,
            format: LogFormat::Pretty,
            source_location: true,
            ..Default::default()
        }
    }

    /// JSON output at info level.
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            ..Default::default()
        }
    }

    /// Errors only.
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            format: LogFormat::Compact,
            ..Default::default()
        }
    }

    /// Resolve the filter: explicit directive, then `RUST_LOG`, then `level`.
    fn env_filter(&self) -> EnvFilter {
        match self.filter {
            Some(ref custom) => {
                EnvFilter::try_new(custom).unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
            }
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.to_string())),
        }
    }
}

/// Initialize the global logging subscriber.
///
/// Call once at startup; later calls are silently ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = config.env_filter();
    let layer = fmt::layer()
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_thread_ids(config.thread_ids);

    let result = match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(layer.json()),
        ),
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(layer.pretty()),
        ),
        LogFormat::Compact => tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(layer.compact()),
        ),
    };

    // Already initialized elsewhere
    let _ = result;
}
