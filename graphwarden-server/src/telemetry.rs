//! Telemetry module for logging setup
//!
//! Unified logging configuration: `RUST_LOG` wins when set, otherwise the
//! configured default level applies. `LOG_FORMAT=json` switches to JSON
//! output for log shippers.

use std::env;
use tracing_subscriber::EnvFilter;

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Primary log filter (RUST_LOG env var)
    pub log_filter: String,
    /// Fallback log level if RUST_LOG not set
    pub default_level: String,
    /// Log format ("human" or "json")
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

impl TelemetryConfig {
    /// Read telemetry settings from the environment, falling back to
    /// `default_level` when `RUST_LOG` is unset
    pub fn from_env(default_level: &str) -> Self {
        Self {
            log_filter: env::var("RUST_LOG").unwrap_or_default(),
            default_level: default_level.to_string(),
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_default()
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Human,
            },
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::from_env("info")
    }
}

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops (relevant in
/// tests, where several cases may initialize logging).
pub fn init_logging(config: &TelemetryConfig) {
    let filter = if config.log_filter.is_empty() {
        EnvFilter::new(&config.default_level)
    } else {
        EnvFilter::new(&config.log_filter)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // An already-set subscriber is fine.
    let _ = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.try_init(),
    };
}
