//! Lookup Cache - A bounded in-memory cache for expensive upstream lookups
//!
//! Provides a process-wide key-value cache with TTL expiration and LRU
//! eviction, intended to sit in front of slow third-party API calls inside a
//! concurrently-accessed service.
//!
//! Request handlers share a single [`ExpiringLruCache`] instance (cloning it
//! is cheap and shares the underlying store), call [`ExpiringLruCache::get`]
//! before doing expensive work, and [`ExpiringLruCache::set`] once a result
//! has been obtained. Keys are opaque strings; any normalization (case
//! folding, trimming) is the caller's business.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, ExpiringLruCache};
pub use config::Config;
pub use error::ConfigError;
