//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with recency tracking and TTL
//! expiration. Single-threaded; [`super::ExpiringLruCache`] wraps it for
//! concurrent use.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, RecencyList};

// == Cache Store ==
/// Bounded key-value storage with LRU eviction and TTL expiration.
///
/// `entries` is the source of truth for membership; `recency` only decides
/// eviction order. Every operation leaves the two holding exactly the same
/// key set, with `entries.len() <= capacity`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Access-order tracker, least recently used first
    recency: RecencyList,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Lifespan assigned to every entry at insertion
    ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL.
    ///
    /// A zero capacity is clamped to one entry; construction through
    /// [`super::ExpiringLruCache`] rejects such configurations up front.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
            ttl,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A live entry is bumped to most recently used and its value returned.
    /// An expired entry is purged on discovery and reported as absent, the
    /// same as a key that was never set or has been evicted.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = current_timestamp_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            // Lazy expiry: discovering a dead entry removes it on the spot.
            self.entries.remove(key);
            self.recency.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(key, "entry expired on read");
            return None;
        }

        let value = self.entries.get(key).map(|entry| entry.value.clone());
        self.recency.touch(key);
        self.stats.record_hit();
        value
    }

    // == Set ==
    /// Stores a key-value pair with `expires_at = now + ttl`.
    ///
    /// Expired entries are swept first so they neither count against capacity
    /// nor linger indefinitely on a write-only workload. Overwriting an
    /// existing key refreshes its value, expiry and recency without touching
    /// capacity; inserting a new key into a full cache evicts the least
    /// recently used entry, whatever its expiry status.
    pub fn set(&mut self, key: String, value: V) {
        let now = current_timestamp_ms();
        self.sweep_expired(now);

        if let Some(entry) = self.entries.get_mut(&key) {
            *entry = CacheEntry::new(value, now, self.ttl);
            self.recency.touch(&key);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        self.recency.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, now, self.ttl));
    }

    // == Clear ==
    /// Removes every entry. Activity counters are not reset.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        debug!("cache cleared");
    }

    // == Length ==
    /// Returns the current number of stored entries.
    ///
    /// Deliberately does not sweep, so the count may include expired entries
    /// that no operation has touched yet. It reflects storage occupancy, not
    /// liveness; callers needing liveness must use `get`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the activity counters and current occupancy.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.entries = self.entries.len();
        stats
    }

    // == Internal Helpers ==
    /// Removes every entry whose expiry has passed as of `now`, in one pass.
    fn sweep_expired(&mut self, now: u64) {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        if expired.is_empty() {
            return;
        }

        for key in &expired {
            self.entries.remove(key);
            self.recency.remove(key);
            self.stats.record_expiration();
        }
        debug!(count = expired.len(), "swept expired entries");
    }

    /// Evicts the single least recently used entry.
    fn evict_lru(&mut self) {
        if let Some(victim) = self.recency.pop_lru() {
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(key = %victim, "evicted least recently used entry");
        }
    }
}
