//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment
//! variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Cache configuration parameters.
///
/// Chosen once at process startup; a constructed cache never changes its
/// capacity or TTL afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Lifespan assigned to each entry at insertion
    pub ttl: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_SECS` - Entry lifespan in seconds (default: 1800)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
            ttl: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.ttl),
        }
    }

    /// Checks that the configuration describes a usable cache.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            ttl: Duration::from_secs(30 * 60),
        }
    }
}
