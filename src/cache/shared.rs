//! Shared Cache Module
//!
//! The thread-safe facade over [`CacheStore`], shared by all request
//! handlers in the process.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::ConfigError;

// == Expiring LRU Cache ==
/// A bounded, time-expiring, LRU-evicting key-value cache safe for
/// concurrent use.
///
/// One coarse mutex serializes every operation, so callers always observe
/// storage and recency bookkeeping in a consistent state and the capacity
/// bound holds at every observable instant. No operation blocks on I/O or
/// suspends; each completes in bounded, short time.
///
/// Cloning the handle is cheap and shares the same underlying store, which
/// is how a single process-wide instance gets injected into handlers.
#[derive(Debug)]
pub struct ExpiringLruCache<V> {
    inner: Arc<Mutex<CacheStore<V>>>,
}

impl<V> Clone for ExpiringLruCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> ExpiringLruCache<V> {
    // == Constructors ==
    /// Creates a cache holding at most `capacity` entries, each living for
    /// `ttl` after its last write.
    ///
    /// Fails if `capacity` is zero or `ttl` is a zero duration; both are
    /// construction-time misconfiguration, never a runtime failure.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self, ConfigError> {
        Self::from_config(&Config { capacity, ttl })
    }

    /// Creates a cache from a validated [`Config`].
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(Mutex::new(CacheStore::new(config.capacity, config.ttl))),
        })
    }

    // == Get ==
    /// Retrieves the value stored under `key`, bumping it to most recently
    /// used.
    ///
    /// Returns `None` whether the key was never set, has expired, or has
    /// been evicted; the cache does not distinguish these causes.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().get(key)
    }

    // == Set ==
    /// Stores `value` under `key`, resetting its lifetime.
    ///
    /// Sweeps expired entries first and, if the cache is still full, evicts
    /// the least recently used entry to make room. Never fails.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.lock().set(key.into(), value)
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones that no
    /// operation has swept yet. Storage occupancy, not a liveness count.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // == Clear ==
    /// Atomically empties the cache.
    pub fn clear(&self) {
        self.lock().clear()
    }

    // == Stats ==
    /// Returns a snapshot of the cache's activity counters.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    // == Internal Helpers ==
    /// Acquires the store lock.
    ///
    /// No panicking code runs while the lock is held, so a poisoned lock
    /// cannot hide a half-mutated store; recover it instead of propagating,
    /// keeping every operation total.
    fn lock(&self) -> MutexGuard<'_, CacheStore<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
