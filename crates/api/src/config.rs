//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use zeroerp_observability::{LogFormat, ObservabilityConfig};
use zeroerp_payments::stripe::DEFAULT_API_BASE;

/// Runtime environment tag, from `APP_ENV`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3001`)
/// - `APP_ENV`: `development` or `production` (default: development)
/// - `DEV_MODE`: `true` lets requests through when no `API_KEY` is set
/// - `API_KEY`: shared key required on protected routes
/// - `STRIPE_SECRET_KEY` (or legacy `STRIPE_API`), `STRIPE_API_BASE`, `STRIPE_WEBHOOK_SECRET`
/// - `FRONTEND_URL`: allowed CORS origin and billing-portal return URL
/// - `DATA_DIR`, `STORAGE_NAMESPACE`: where and under which key prefix collections are kept
/// - `LOG_FORMAT` (`json` or pretty), `DEBUG`: logging output
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub dev_mode: bool,
    pub api_key: Option<String>,
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base: String,
    pub stripe_webhook_secret: Option<String>,
    pub frontend_url: String,
    pub data_dir: PathBuf,
    pub storage_namespace: String,
    pub log_format: LogFormat,
    pub debug: bool,
}

fn flag(raw: Option<String>) -> bool {
    raw.is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            environment: get("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or_default(),
            dev_mode: flag(get("DEV_MODE")),
            api_key: get("API_KEY"),
            stripe_secret_key: get("STRIPE_SECRET_KEY").or_else(|| get("STRIPE_API")),
            stripe_api_base: get("STRIPE_API_BASE").unwrap_or(defaults.stripe_api_base),
            stripe_webhook_secret: get("STRIPE_WEBHOOK_SECRET"),
            frontend_url: get("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            data_dir: get("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            storage_namespace: get("STORAGE_NAMESPACE").unwrap_or(defaults.storage_namespace),
            log_format: get("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            debug: flag(get("DEBUG")),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn observability(&self) -> ObservabilityConfig {
        ObservabilityConfig::new(self.is_production(), self.debug, self.log_format)
    }

    /// Problems worth a warning at startup. None of them stop the server.
    pub fn startup_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.stripe_secret_key.is_none() {
            warnings.push(
                "STRIPE_SECRET_KEY not set; payment routes will return 503".to_string(),
            );
        }
        if self.api_key.is_none() {
            if self.dev_mode {
                warnings.push(
                    "API_KEY not set and DEV_MODE enabled; protected routes are open".to_string(),
                );
            } else {
                warnings.push(
                    "API_KEY not set; protected routes will return 503".to_string(),
                );
            }
        }
        if self.is_production() {
            if self.stripe_webhook_secret.is_none() {
                warnings.push(
                    "STRIPE_WEBHOOK_SECRET not set; webhooks will be rejected".to_string(),
                );
            }
            if self.dev_mode {
                warnings.push("DEV_MODE is enabled in production".to_string());
            }
        }
        warnings
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            environment: Environment::Development,
            dev_mode: false,
            api_key: None,
            stripe_secret_key: None,
            stripe_api_base: DEFAULT_API_BASE.to_string(),
            stripe_webhook_secret: None,
            frontend_url: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from("./data"),
            storage_namespace: "zeroerp".to_string(),
            log_format: LogFormat::Pretty,
            debug: false,
        }
    }
}
