//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache's core guarantees against arbitrary
//! operation sequences, with a naive linear-scan cache as the reference
//! model. TTLs are long enough that expiry never fires here; timing-driven
//! behavior is covered by the unit tests.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_CAPACITY: usize = 8;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates keys from a deliberately small alphabet so that sequences
/// collide, overwrite and overflow capacity often.
fn small_key_strategy() -> impl Strategy<Value = String> {
    "[a-l]".prop_map(|s| s)
}

/// Generates cache values.
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (small_key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        4 => small_key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => Just(CacheOp::Clear),
    ]
}

// == Reference Model ==
/// Executable restatement of the cache contract: a hash map for values plus
/// a linear-scan recency vector, least recently used at the front.
struct ModelCache {
    values: HashMap<String, String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl ModelCache {
    fn new(capacity: usize) -> Self {
        Self {
            values: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let value = self.values.get(key).cloned()?;
        self.order.retain(|k| k != key);
        self.order.push_back(key.to_string());
        Some(value)
    }

    fn set(&mut self, key: String, value: String) {
        if !self.values.contains_key(&key) && self.values.len() >= self.capacity {
            if let Some(victim) = self.order.pop_front() {
                self.values.remove(&victim);
            }
        }
        self.values.insert(key.clone(), value);
        self.order.retain(|k| k != &key);
        self.order.push_back(key);
    }

    fn clear(&mut self) {
        self.values.clear();
        self.order.clear();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every get observes exactly what the reference model predicts, for any
    // interleaving of sets, gets and clears; occupancy agrees at the end.
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store: CacheStore<String> = CacheStore::new(TEST_CAPACITY, TEST_TTL);
        let mut model = ModelCache::new(TEST_CAPACITY);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone());
                    model.set(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(&key), "Get mismatch");
                }
                CacheOp::Clear => {
                    store.clear();
                    model.clear();
                }
            }
        }

        prop_assert_eq!(store.len(), model.values.len(), "Occupancy mismatch");
    }

    // The capacity bound holds after every single operation, not just at the
    // end of a sequence.
    #[test]
    fn prop_capacity_never_exceeded(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store: CacheStore<String> = CacheStore::new(TEST_CAPACITY, TEST_TTL);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => store.set(key, value),
                CacheOp::Get { key } => { store.get(&key); }
                CacheOp::Clear => store.clear(),
            }
            prop_assert!(store.len() <= TEST_CAPACITY, "Capacity bound violated");
            prop_assert_eq!(store.stats().entries, store.len(), "Stats occupancy mismatch");
        }
    }

    // Storing at most `capacity` distinct keys never evicts anything: every
    // key stays retrievable with the value most recently written to it.
    #[test]
    fn prop_within_capacity_all_retrievable(
        entries in prop::collection::hash_map("[a-zA-Z0-9_]{1,16}", value_strategy(), 1..=TEST_CAPACITY)
    ) {
        let mut store: CacheStore<String> = CacheStore::new(TEST_CAPACITY, TEST_TTL);

        for (key, value) in &entries {
            store.set(key.clone(), value.clone());
        }

        for (key, value) in &entries {
            let got = store.get(key);
            prop_assert_eq!(got.as_ref(), Some(value), "Key lost within capacity");
        }
        prop_assert_eq!(store.stats().evictions, 0);
    }

    // Storing a value and retrieving it before expiry returns the exact
    // value that was stored.
    #[test]
    fn prop_roundtrip_storage(key in "[a-zA-Z0-9_]{1,64}", value in value_strategy()) {
        let mut store: CacheStore<String> = CacheStore::new(TEST_CAPACITY, TEST_TTL);

        store.set(key.clone(), value.clone());

        prop_assert_eq!(store.get(&key), Some(value), "Round-trip value mismatch");
    }

    // Overwriting a key leaves exactly one entry, holding the last value.
    #[test]
    fn prop_overwrite_semantics(
        key in small_key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy()
    ) {
        let mut store: CacheStore<String> = CacheStore::new(TEST_CAPACITY, TEST_TTL);

        store.set(key.clone(), v1);
        store.set(key.clone(), v2.clone());

        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.get(&key), Some(v2), "Overwrite not observed");
    }

    // After a clear, every previously-present key reads as absent and the
    // cache reports empty.
    #[test]
    fn prop_clear_empties(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let mut store: CacheStore<String> = CacheStore::new(TEST_CAPACITY, TEST_TTL);
        let mut seen: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    seen.insert(key.clone());
                    store.set(key, value);
                }
                CacheOp::Get { key } => { store.get(&key); }
                CacheOp::Clear => store.clear(),
            }
        }

        store.clear();

        prop_assert_eq!(store.len(), 0);
        for key in seen {
            prop_assert_eq!(store.get(&key), None, "Key survived clear");
        }
    }

    // Hit and miss counters track exactly how many gets found a live entry.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store: CacheStore<String> = CacheStore::new(TEST_CAPACITY, TEST_TTL);
        let mut model = ModelCache::new(TEST_CAPACITY);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone());
                    model.set(key, value);
                }
                CacheOp::Get { key } => {
                    match model.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                    store.get(&key);
                }
                CacheOp::Clear => {
                    store.clear();
                    model.clear();
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.entries, store.len(), "Entries mismatch");
    }
}
