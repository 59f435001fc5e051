//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub server_address: String,
    /// HTTP server port
    pub server_port: u16,
    /// Eviction task interval in seconds, `<= 0` selects the engine default
    pub eviction_interval_secs: i64,
    /// Per-request timeout in seconds, `<= 0` disables it
    pub request_timeout_secs: i64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_ADDRESS` - Bind address (default: 127.0.0.1)
    /// - `SERVER_PORT` - HTTP server port (default: 63100)
    /// - `EVICTION_INTERVAL` - Eviction frequency in seconds (default: 60)
    /// - `REQUEST_TIMEOUT` - Per-request timeout in seconds (default: 15)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_address: env::var("SERVER_ADDRESS")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.server_address),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            eviction_interval_secs: parse_var("EVICTION_INTERVAL")
                .unwrap_or(defaults.eviction_interval_secs),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT")
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Returns the eviction interval as a Duration. Zero and negative values
    /// both map to `Duration::ZERO`, which the engine replaces with its default.
    pub fn eviction_interval(&self) -> Duration {
        Duration::from_secs(self.eviction_interval_secs.max(0) as u64)
    }

    /// Returns the request timeout, or None when requests may run unbounded.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs as u64))
    }

    /// Returns the `address:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_address, self.server_port)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1".to_string(),
            server_port: 63100,
            eviction_interval_secs: 60,
            request_timeout_secs: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_address, "127.0.0.1");
        assert_eq!(config.server_port, 63100);
        assert_eq!(config.eviction_interval_secs, 60);
        assert_eq!(config.bind_address(), "127.0.0.1:63100");
    }

    #[test]
    fn test_eviction_interval_duration() {
        let mut config = Config::default();
        assert_eq!(config.eviction_interval(), Duration::from_secs(60));

        config.eviction_interval_secs = 0;
        assert_eq!(config.eviction_interval(), Duration::ZERO);

        config.eviction_interval_secs = -10;
        assert_eq!(config.eviction_interval(), Duration::ZERO);
    }

    #[test]
    fn test_request_timeout() {
        let mut config = Config::default();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));

        config.request_timeout_secs = 0;
        assert_eq!(config.request_timeout(), None);

        config.request_timeout_secs = -1;
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touching the environment, so no other test races it
        env::remove_var("SERVER_ADDRESS");
        env::remove_var("SERVER_PORT");
        env::remove_var("EVICTION_INTERVAL");
        env::remove_var("REQUEST_TIMEOUT");

        let config = Config::from_env();
        assert_eq!(config.server_address, "127.0.0.1");
        assert_eq!(config.server_port, 63100);
        assert_eq!(config.eviction_interval_secs, 60);

        env::set_var("SERVER_PORT", "8080");
        env::set_var("EVICTION_INTERVAL", "not-a-number");
        env::set_var("REQUEST_TIMEOUT", "0");
        let config = Config::from_env();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.eviction_interval_secs, 60);
        assert_eq!(config.request_timeout(), None);

        env::remove_var("SERVER_PORT");
        env::remove_var("EVICTION_INTERVAL");
        env::remove_var("REQUEST_TIMEOUT");
    }
}
