//! Observability Config

use clap::{Args, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event, for terminals
    Compact,

    /// One JSON object per event, for log shippers
    Json,
}

/// Log output and request timing settings.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` holds no valid filter
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Requests slower than this many milliseconds are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}
