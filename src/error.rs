//! Error types for the cache
//!
//! The cache's runtime operations are total: absence is a normal return
//! value, never an error. The only failure the crate reports is
//! construction-time misconfiguration.

use thiserror::Error;

// == Config Error Enum ==
/// Rejected cache configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must admit at least one entry
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,

    /// A zero TTL would expire every entry on insertion
    #[error("cache ttl must be a positive duration")]
    ZeroTtl,
}
