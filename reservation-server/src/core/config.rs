use chrono_tz::Tz;

use super::{Result, ServerError};
use crate::rules::BusinessHours;
use crate::utils::time::parse_timezone;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 5001 | HTTP listen port |
/// | DATABASE_PATH | reservations.db | SQLite database file |
/// | ENVIRONMENT | development | development / staging / production |
/// | BUSINESS_TIMEZONE | UTC | IANA timezone the restaurant operates in |
/// | LOG_LEVEL | reservation_server=info,tower_http=info | Log filter directive |
/// | LOG_DIR | (unset) | Directory for daily log files |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout (ms) |
///
/// # Example
///
/// ```ignore
/// BUSINESS_TIMEZONE=America/New_York HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Path of the SQLite database file
    pub database_path: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Timezone reservation dates and times are interpreted in
    pub timezone: Tz,
    /// Opening hours and closed weekday
    pub business_hours: BusinessHours,
    /// Log filter directive
    pub log_level: String,
    /// Optional directory for daily log files
    pub log_dir: Option<String>,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the defaults; an unknown timezone is an error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let timezone = match std::env::var("BUSINESS_TIMEZONE") {
            Ok(name) if !name.trim().is_empty() => parse_timezone(&name)
                .map_err(|e| ServerError::Config(format!("BUSINESS_TIMEZONE: {e}")))?,
            _ => defaults.timezone,
        };

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            database_path: std::env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            timezone,
            business_hours: defaults.business_hours,
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
        })
    }

    /// Override the database path and port
    ///
    /// Mostly used by tests
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        Self {
            database_path: database_path.into(),
            http_port,
            ..Self::default()
        }
    }

    /// Is this a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Is this a development deployment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 5001,
            database_path: "reservations.db".into(),
            environment: "development".into(),
            timezone: Tz::UTC,
            business_hours: BusinessHours::default(),
            log_level: "reservation_server=info,tower_http=info".into(),
            log_dir: None,
            request_timeout_ms: 30000,
        }
    }
}
