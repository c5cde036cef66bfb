//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod recency;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use recency::RecencyList;
pub use shared::ExpiringLruCache;
pub use stats::CacheStats;
pub use store::CacheStore;
