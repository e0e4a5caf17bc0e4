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
    /// Default TTL in seconds for cached records
    pub default_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Page size used when a list request gives no limit
    pub default_page_limit: usize,
    /// Largest page size a list request may ask for
    pub max_page_limit: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Cache TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Expired-entry sweep period in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_PAGE_LIMIT` - List page size (default: 20)
    /// - `MAX_PAGE_LIMIT` - Upper bound on list page size (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            // A zero period would spin the sweep on the exclusive lock.
            sweep_interval: Some(env_or("SWEEP_INTERVAL", defaults.sweep_interval))
                .filter(|&secs| secs > 0)
                .unwrap_or(defaults.sweep_interval),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            default_page_limit: env_or("DEFAULT_PAGE_LIMIT", defaults.default_page_limit),
            max_page_limit: env_or("MAX_PAGE_LIMIT", defaults.max_page_limit),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 300,
            sweep_interval: 300,
            server_port: 3000,
            default_page_limit: 20,
            max_page_limit: 100,
        }
    }
}

/// Parses `name` from the environment, falling back on absence or garbage.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
