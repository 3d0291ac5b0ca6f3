//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `DASHBOARD_HOST` - Bind address (default: 127.0.0.1)
//! - `DASHBOARD_PORT` - Listen port (default: 3000)
//! - `DASHBOARD_STATE_PATH` - JSON file for session and settings state
//!   (default: kept in memory)
//! - `DASHBOARD_SETTINGS_SAVE_TIMEOUT_MS` - Per-attempt settings save timeout (default: 5000)
//! - `DASHBOARD_SETTINGS_SAVE_RETRIES` - Extra settings save attempts (default: 2)
//! - `DASHBOARD_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_SAVE_TIMEOUT_MS: &str = "5000";
const DEFAULT_SAVE_RETRIES: &str = "2";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// JSON state file; `None` keeps state in memory
    pub state_path: Option<PathBuf>,
    /// Timeout for one settings save attempt
    pub settings_save_timeout: Duration,
    /// Extra settings save attempts after the first failure
    pub settings_save_retries: u32,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            state_path: None,
            settings_save_timeout: Duration::from_millis(5000),
            settings_save_retries: 2,
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let host = env.parse_or("DASHBOARD_HOST", DEFAULT_HOST)?;
        let port = env.parse_or("DASHBOARD_PORT", DEFAULT_PORT)?;
        let state_path = env.optional("DASHBOARD_STATE_PATH").map(PathBuf::from);
        let timeout_ms: u64 =
            env.parse_or("DASHBOARD_SETTINGS_SAVE_TIMEOUT_MS", DEFAULT_SAVE_TIMEOUT_MS)?;
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "DASHBOARD_SETTINGS_SAVE_TIMEOUT_MS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let settings_save_retries =
            env.parse_or("DASHBOARD_SETTINGS_SAVE_RETRIES", DEFAULT_SAVE_RETRIES)?;
        let log_format = env.parse_or("DASHBOARD_LOG_FORMAT", "text")?;

        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            host,
            port,
            state_path,
            settings_save_timeout: Duration::from_millis(timeout_ms),
            settings_save_retries,
            log_format,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.optional(key).unwrap_or_else(|| default.to_string());
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.state_path.is_none());
        assert_eq!(config.settings_save_timeout, Duration::from_secs(5));
        assert_eq!(config.settings_save_retries, 2);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DASHBOARD_HOST", "0.0.0.0"),
            ("DASHBOARD_PORT", "8080"),
            ("DASHBOARD_STATE_PATH", "/var/lib/merchify/state.json"),
            ("DASHBOARD_SETTINGS_SAVE_TIMEOUT_MS", "250"),
            ("DASHBOARD_SETTINGS_SAVE_RETRIES", "0"),
            ("DASHBOARD_LOG_FORMAT", "JSON"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().port(), 8080);
        assert_eq!(
            config.state_path.as_deref(),
            Some(std::path::Path::new("/var/lib/merchify/state.json"))
        );
        assert_eq!(config.settings_save_timeout, Duration::from_millis(250));
        assert_eq!(config.settings_save_retries, 0);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("DASHBOARD_PORT", "70000"),
            ("DASHBOARD_HOST", "localhost"),
            ("DASHBOARD_SETTINGS_SAVE_TIMEOUT_MS", "0"),
            ("DASHBOARD_SETTINGS_SAVE_RETRIES", "-1"),
            ("DASHBOARD_LOG_FORMAT", "yaml"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            let ConfigError::InvalidEnvVar(name, _) = err;
            assert_eq!(name, key);
        }
    }

    #[test]
    fn test_blank_state_path_means_memory() {
        let config = load(&[("DASHBOARD_STATE_PATH", "  ")]).unwrap();
        assert!(config.state_path.is_none());
    }
}
