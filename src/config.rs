//! Configuration loading and constants.
//!
//! Settings come from an optional TOML file, the `PORT` environment variable
//! and the command line. `AppConfig` is the root of the file format; every
//! section is optional so a service can run with no file at all.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::operator::OperatorKind;

// =============================================================================
// Endpoints
// =============================================================================

pub const OP_PATH: &str = "/op";
pub const HEALTH_PATH: &str = "/healthz";
pub const METRICS_PATH: &str = "/metrics";

/// Endpoint label values for the per-route counter
pub const ENDPOINT_OP: &str = "op";
pub const ENDPOINT_HEALTH: &str = "healthz";

/// Content type of the metrics exposition
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Body returned for non-POST requests to `/op`
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method not allowed";

/// Body returned when `/op` exceeds `http.max_body_bytes`
pub const PAYLOAD_TOO_LARGE_BODY: &str = "Request body too large";

// =============================================================================
// CORS
// =============================================================================

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

// =============================================================================
// Process Defaults
// =============================================================================

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "textop=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Seconds to wait for in-flight connections after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Operator to serve; the command line takes precedence
    #[serde(default)]
    pub operator: Option<OperatorKind>,
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    /// Listen port; falls back to the operator's default when unset
    pub port: Option<u16>,
    /// Largest accepted `/op` body in bytes; unlimited when unset
    #[serde(default)]
    pub max_body_bytes: Option<usize>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: None,
            max_body_bytes: None,
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    /// Pick the listen port: CLI, then `PORT`, then config file, then the
    /// operator default. An empty `PORT` counts as unset.
    pub fn resolve_port(
        &self,
        cli: Option<u16>,
        env: Option<&str>,
        operator_default: u16,
    ) -> Result<u16, ConfigError> {
        if let Some(port) = cli {
            return Ok(port);
        }
        if let Some(raw) = env.map(str::trim).filter(|s| !s.is_empty()) {
            return raw.parse().map_err(|_| {
                ConfigError::Validation(format!("{} is not a valid port: {:?}", PORT_ENV, raw))
            });
        }
        Ok(self.port.unwrap_or(operator_default))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;

        match config.logging.format.to_ascii_lowercase().as_str() {
            "text" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "Unknown logging.format {:?}, expected \"text\" or \"json\"",
                    other
                )))
            }
        }

        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_optional<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
