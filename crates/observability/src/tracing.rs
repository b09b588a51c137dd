//! Tracing/logging initialization.
//!
//! `RUST_LOG` always wins. Without it the filter follows the runtime
//! environment: chatty in development, warnings only in production unless
//! debugging is switched on.

use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// `"json"` (any case) selects JSON; everything else is pretty.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub default_filter: String,
    pub format: LogFormat,
}

impl ObservabilityConfig {
    pub fn new(production: bool, debug: bool, format: LogFormat) -> Self {
        Self {
            default_filter: default_filter(production, debug).to_string(),
            format,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(false, false, LogFormat::Pretty)
    }
}

pub fn default_filter(production: bool, debug: bool) -> &'static str {
    match (production, debug) {
        (false, _) => "debug",
        (true, true) => "info",
        (true, false) => "warn",
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}
