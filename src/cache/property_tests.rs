//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check byte accounting, budget enforcement, oversized
//! rejection, LRU order and TTL expiry over generated operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::{CacheStore, SetOutcome};

// == Test Configuration ==
const TEST_CAPACITY: usize = 1000;
const TEST_TTL_MS: u64 = 1000;

// == Strategies ==
/// Keys drawn from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

/// Sizes around the capacity so both eviction and rejection happen
fn size_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![
        8 => 1usize..400,
        1 => (TEST_CAPACITY - 5)..(TEST_CAPACITY + 50),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, size: usize },
    Get { key: String },
    Remove { key: String },
    Advance { ms: u64 },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (key_strategy(), size_strategy()).prop_map(|(key, size)| CacheOp::Set { key, size }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        2 => (0u64..1500).prop_map(|ms| CacheOp::Advance { ms }),
        1 => Just(CacheOp::Clear),
    ]
}

fn apply(store: &mut CacheStore<usize>, now: &mut u64, op: CacheOp) {
    match op {
        CacheOp::Set { key, size } => {
            let _ = store.set(key, size, size, *now);
        }
        CacheOp::Get { key } => {
            let _ = store.get(&key, *now);
        }
        CacheOp::Remove { key } => {
            store.remove(&key);
        }
        CacheOp::Advance { ms } => *now += ms,
        CacheOp::Clear => {
            store.clear();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Byte accounting: the running total always matches the live entries,
    // whatever mix of sets, reads, removes, sweeps and clears happened.
    #[test]
    fn prop_occupied_bytes_matches_live_entries(
        ops in prop::collection::vec(cache_op_strategy(), 1..80),
        timed in any::<bool>()
    ) {
        let ttl = timed.then_some(TEST_TTL_MS);
        let mut store = CacheStore::new(TEST_CAPACITY, ttl).unwrap();
        let mut now = 0u64;

        for op in ops {
            apply(&mut store, &mut now, op);
            prop_assert_eq!(store.occupied_bytes(), store.live_bytes());
            prop_assert_eq!(store.stats().total_entries, store.len());
        }
    }

    // Budget enforcement: no set returns with the budget exceeded.
    #[test]
    fn prop_budget_holds_after_every_set(
        entries in prop::collection::vec((key_strategy(), size_strategy()), 1..100)
    ) {
        let mut store = CacheStore::new(TEST_CAPACITY, None).unwrap();

        for (key, size) in entries {
            store.set(key, size, size, 0).unwrap();
            prop_assert!(
                store.occupied_bytes() <= TEST_CAPACITY,
                "occupied {} exceeds capacity {}",
                store.occupied_bytes(),
                TEST_CAPACITY
            );
        }
    }

    // Oversized rejection: a payload at least as large as the budget is
    // never retrievable afterwards, even if the key held something before.
    #[test]
    fn prop_oversized_never_retrievable(
        key in key_strategy(),
        before in 1usize..TEST_CAPACITY,
        oversize in TEST_CAPACITY..(TEST_CAPACITY * 3)
    ) {
        let mut store = CacheStore::new(TEST_CAPACITY, None).unwrap();

        store.set(key.clone(), before, before, 0).unwrap();
        let outcome = store.set(key.clone(), oversize, oversize, 0).unwrap();

        prop_assert_eq!(outcome, SetOutcome::TooLarge);
        prop_assert_eq!(store.get(&key, 0).unwrap(), None);
        prop_assert_eq!(store.occupied_bytes(), 0);
    }

    // LRU order: with room for exactly N equal entries, inserting one more
    // evicts the first inserted; touching it beforehand shifts eviction to
    // the second.
    #[test]
    fn prop_lru_eviction_order(
        keys in prop::collection::vec("[a-z]{1,8}", 3..10),
        entry_size in 2usize..100,
        touch_first in any::<bool>()
    ) {
        let unique: Vec<String> = keys
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        prop_assume!(unique.len() >= 3);

        let capacity = entry_size * unique.len() + 1;
        let mut store = CacheStore::new(capacity, None).unwrap();

        for key in &unique {
            store.set(key.clone(), 0, entry_size, 0).unwrap();
        }
        prop_assert_eq!(store.len(), unique.len());

        if touch_first {
            store.get(&unique[0], 0).unwrap();
        }

        let newcomer = "NEW".to_string();
        let outcome = store.set(newcomer.clone(), 0, entry_size, 0).unwrap();
        prop_assert_eq!(outcome, SetOutcome::Stored { evicted: 1, expired: 0 });

        let victim = if touch_first { &unique[1] } else { &unique[0] };
        prop_assert!(!store.contains_key(victim), "'{}' should have been evicted", victim);
        prop_assert!(store.contains_key(&newcomer));
        for key in unique.iter().filter(|key| *key != victim) {
            prop_assert!(store.contains_key(key), "'{}' should still be cached", key);
        }
    }

    // TTL expiry: an entry idle for longer than the TTL is gone after any
    // other operation sweeps; one read inside the window keeps it alive.
    #[test]
    fn prop_ttl_expiry_and_refresh(
        idle in (TEST_TTL_MS + 1)..(TEST_TTL_MS * 5),
        within in 0..=TEST_TTL_MS
    ) {
        let mut store = CacheStore::new(TEST_CAPACITY, Some(TEST_TTL_MS)).unwrap();

        store.set("x".to_string(), 1, 10, 0).unwrap();
        prop_assert!(store.get("x", within).unwrap().is_some());

        store.set("other".to_string(), 2, 10, within + idle).unwrap();
        prop_assert!(!store.contains_key("x"));
        prop_assert_eq!(store.get("other", within + idle).unwrap(), Some(2));
        prop_assert_eq!(store.occupied_bytes(), 10);
    }
}
