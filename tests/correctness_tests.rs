//! Correctness Tests for Cache Engines
//!
//! This module validates the fundamental correctness of each engine using
//! small, predictable access patterns. Each test states which key is expected
//! to be evicted, or where capacity is expected to move, after every step.
//!
//! ## Test Strategy
//! - Small cache sizes (1-5 entries) for predictable behavior
//! - Deterministic access patterns
//! - Explicit checks on eviction victims and ARC capacity transfers

use adaptive_cache_rs::config::{ArcCacheConfig, LfuCacheConfig, LruCacheConfig, LruKCacheConfig};
use adaptive_cache_rs::metrics::CacheMetrics;
use adaptive_cache_rs::{ArcCache, CachePolicy, LfuCache, LruCache, LruKCache};
use std::num::NonZeroUsize;

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

fn make_arc<K: std::hash::Hash + Eq + Clone, V: Clone>(cap: usize, threshold: usize) -> ArcCache<K, V> {
    let config = ArcCacheConfig {
        capacity: cap,
        transform_threshold: threshold,
    };
    ArcCache::init(config, None)
}

fn make_lru<K: std::hash::Hash + Eq + Clone, V: Clone>(cap: usize) -> LruCache<K, V> {
    LruCache::init(LruCacheConfig::new(NonZeroUsize::new(cap).unwrap()), None)
}

fn make_lru_k<K: std::hash::Hash + Eq + Clone, V: Clone>(cap: usize, k: usize) -> LruKCache<K, V> {
    let config = LruKCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
        history_capacity: NonZeroUsize::new(cap * 4).unwrap(),
        k,
    };
    LruKCache::init(config, None)
}

fn make_lfu<K: std::hash::Hash + Eq + Clone, V: Clone>(
    cap: usize,
    max_average_frequency: usize,
) -> LfuCache<K, V> {
    let config = LfuCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
        max_average_frequency,
    };
    LfuCache::init(config, None)
}

// ============================================================================
// ARC CORRECTNESS
// ============================================================================
// ARC keeps a recency part and a frequency part, each with a ghost list.
// Correctness criteria:
// 1. A hit on the recency ghost list moves one slot to the recency part
// 2. A hit on the frequency ghost list moves one slot to the frequency part
// 3. Entries hit `transform_threshold` times are copied into the frequency part
// 4. Capacity only moves between the parts; it is never created

#[test]
fn test_arc_recency_ghost_hit_grows_recency_side() {
    let _ = tracing_subscriber::fmt::try_init();
    let mut cache = make_arc(2, 2);

    cache.put(1, "a");
    cache.put(2, "b");
    cache.put(3, "c");
    // Both parts are full; key 1 went to both ghost lists.
    assert_eq!(cache.recent_ghost_len(), 1);
    assert_eq!(cache.frequent_ghost_len(), 1);

    // The recency ghost hit is consumed; the frequency part gives up a slot,
    // evicting its least frequent entry (2) to its own ghost list.
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.recent_capacity(), 3);
    assert_eq!(cache.frequent_capacity(), 1);
    assert_eq!(cache.recent_ghost_len(), 0);
    assert_eq!(cache.frequent_ghost_len(), 2);
    assert!(cache.contains_frequent(&3));
    assert!(!cache.contains_frequent(&2));
    assert_eq!(cache.total_capacity(), 4);
}

#[test]
fn test_arc_frequency_ghost_hit_grows_frequency_side() {
    let mut cache = make_arc(2, 2);

    cache.put(1, "a");
    cache.put(2, "b");
    cache.put(3, "c");
    assert_eq!(cache.get(&1), None);
    // Recency part: [3, 2] with capacity 3. Frequency ghost holds 1 and 2.

    // Key 2 is on the frequency ghost list and still resident in the
    // recency part. The ghost hit moves a slot back, then the recency hit
    // reaches the threshold and copies 2 into the frequency part.
    assert_eq!(cache.get(&2), Some("b"));
    assert_eq!(cache.recent_capacity(), 2);
    assert_eq!(cache.frequent_capacity(), 2);
    assert!(cache.contains_recent(&2));
    assert!(cache.contains_frequent(&2));
    assert!(cache.contains_frequent(&3));
    assert_eq!(cache.total_capacity(), 4);
}

#[test]
fn test_arc_ghost_hit_on_put_stores_in_recency_only() {
    let mut cache = make_arc(1, 2);

    cache.put(1, 10);
    cache.put(2, 20);
    // 1 is on both ghost lists now.

    cache.put(1, 11);
    assert!(cache.contains_recent(&1));
    assert!(!cache.contains_frequent(&1));
    assert_eq!(cache.get(&1), Some(11));
}

#[test]
fn test_arc_promotion_counts_every_hit_past_threshold() {
    let mut cache = make_arc(4, 3);

    cache.put("k", 1);
    assert_eq!(cache.get(&"k"), Some(1));
    assert_eq!(cache.arc_metrics().recent.promotions, 0);

    assert_eq!(cache.get(&"k"), Some(1));
    assert_eq!(cache.arc_metrics().recent.promotions, 1);

    assert_eq!(cache.get(&"k"), Some(1));
    assert_eq!(cache.arc_metrics().recent.promotions, 2);
    assert!(cache.contains_frequent(&"k"));
}

#[test]
fn test_arc_promoted_entry_survives_recency_eviction() {
    let mut cache = make_arc(2, 2);

    cache.put(1, 10);
    assert_eq!(cache.get(&1), Some(10));
    cache.put(2, 20);
    cache.put(3, 30);
    assert!(!cache.contains_recent(&1));

    // Served by the frequency part after the recency ghost hit.
    assert_eq!(cache.get(&1), Some(10));
    assert!(cache.contains_frequent(&1));
    assert_eq!(cache.total_capacity(), 4);
}

#[test]
fn test_arc_zero_capacity_stores_nothing() {
    let mut cache = make_arc(0, 2);

    cache.put(1, 1);
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.recent_len(), 0);
    assert_eq!(cache.frequent_len(), 0);
    assert_eq!(cache.total_capacity(), 0);
    assert_eq!(cache.get_or_default(&1), 0);
}

#[test]
fn test_arc_clear_restores_capacity_split() {
    let mut cache = make_arc(2, 2);

    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);
    let _ = cache.get(&1);
    assert_eq!(cache.recent_capacity(), 3);

    cache.clear();
    assert_eq!(cache.recent_capacity(), 2);
    assert_eq!(cache.frequent_capacity(), 2);
    assert_eq!(cache.recent_len(), 0);
    assert_eq!(cache.frequent_len(), 0);
    assert_eq!(cache.recent_ghost_len(), 0);
    assert_eq!(cache.frequent_ghost_len(), 0);
}

#[test]
fn test_arc_parts_never_exceed_their_capacity() {
    let mut cache = make_arc(8, 2);

    for round in 0..20 {
        for key in 0..30 {
            if (key + round) % 3 == 0 {
                let _ = cache.get(&key);
            } else {
                cache.put(key, key * round);
            }
            assert!(cache.recent_len() <= cache.recent_capacity());
            assert!(cache.frequent_len() <= cache.frequent_capacity());
            assert!(cache.recent_ghost_len() <= cache.ghost_capacity());
            assert!(cache.frequent_ghost_len() <= cache.ghost_capacity());
            assert_eq!(cache.total_capacity(), 16);
        }
    }
    assert_eq!(cache.algorithm_name(), "ARC");
}

// ============================================================================
// LRU CORRECTNESS
// ============================================================================
// LRU evicts the Least Recently Used item.
// Correctness criteria:
// 1. Most recently accessed items stay in cache
// 2. Oldest accessed items are evicted first
// 3. Access (get) updates recency, peek does not

#[test]
fn test_lru_evicts_least_recently_used() {
    let mut cache = make_lru(3);

    cache.put(1, 10);
    cache.put(2, 20);
    cache.put(3, 30);
    // LRU order: 1 (LRU) -> 2 -> 3 (MRU)

    assert!(cache.get(&1).is_some());
    // LRU order: 2 -> 3 -> 1

    assert_eq!(cache.put(4, 40), Some((2, 20)), "Key 2 was LRU");
    assert_eq!(cache.put(5, 50), Some((3, 30)), "Key 3 was LRU");
    assert!(cache.contains_key(&1));
    assert!(cache.contains_key(&4));
    assert!(cache.contains_key(&5));
}

#[test]
fn test_lru_peek_does_not_update_recency() {
    let mut cache = make_lru(2);

    cache.put("a", 1);
    cache.put("b", 2);
    assert_eq!(cache.peek(&"a"), Some(&1));

    assert_eq!(cache.put("c", 3), Some(("a", 1)));
}

#[test]
fn test_lru_overwrite_returns_old_value() {
    let mut cache = make_lru(2);

    cache.put("a", 1);
    assert_eq!(cache.put("a", 2), Some(("a", 1)));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&"a"), Some(&2));
}

#[test]
fn test_lru_pop_and_remove() {
    let mut cache = make_lru(3);

    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);

    assert_eq!(cache.pop_lru(), Some((1, 1)));
    assert_eq!(cache.remove(&3), Some(3));
    assert_eq!(cache.remove(&3), None);
    assert_eq!(cache.len(), 1);

    let keys: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![2]);
}

// ============================================================================
// LRU-K CORRECTNESS
// ============================================================================
// LRU-K admits a key only after K recorded accesses.
// Correctness criteria:
// 1. Puts below the threshold are only counted
// 2. Gets count as accesses too
// 3. One-off scans cannot push out admitted keys

#[test]
fn test_lru_k_defers_admission_until_k_accesses() {
    let mut cache = make_lru_k(2, 2);

    assert_eq!(cache.put(1, 10), None);
    assert!(!cache.contains_key(&1));
    assert_eq!(cache.history_count(&1), Some(1));

    assert_eq!(cache.put(1, 10), None);
    assert!(cache.contains_key(&1));
    assert_eq!(cache.history_count(&1), None);
    assert_eq!(cache.get(&1), Some(&10));
}

#[test]
fn test_lru_k_gets_count_toward_admission() {
    let mut cache = make_lru_k(2, 3);

    cache.put(5, 50);
    assert!(cache.get(&5).is_none());
    assert_eq!(cache.history_count(&5), Some(2));

    cache.put(5, 50);
    assert_eq!(cache.peek(&5), Some(&50));
}

#[test]
fn test_lru_k_resists_scans() {
    let mut cache = make_lru_k(2, 2);

    for key in [1, 1, 2, 2] {
        cache.put(key, key * 10);
    }
    assert_eq!(cache.len(), 2);

    for key in 100..120 {
        cache.put(key, key);
    }
    assert!(cache.contains_key(&1));
    assert!(cache.contains_key(&2));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_lru_k_overwrite_and_remove() {
    let mut cache = make_lru_k(2, 1);

    assert_eq!(cache.put(1, 10), None);
    assert_eq!(cache.put(1, 11), Some((1, 10)));
    assert_eq!(cache.remove(&1), Some(11));
    assert!(cache.is_empty());
    assert_eq!(cache.history_count(&1), None);
}

// ============================================================================
// LFU CORRECTNESS
// ============================================================================
// LFU evicts the Least Frequently Used item, oldest first among equals.
// Correctness criteria:
// 1. Frequently accessed items stay in cache
// 2. Ties are broken by insertion order within a frequency
// 3. Aging lowers every frequency once the average gets too high

#[test]
fn test_lfu_evicts_least_frequently_used() {
    let mut cache = make_lfu(3, 0);

    cache.put(1, 10);
    cache.put(2, 20);
    cache.put(3, 30);
    let _ = cache.get(&1);
    let _ = cache.get(&3);

    assert_eq!(cache.put(4, 40), Some((2, 20)));
    assert_eq!(cache.put(5, 50), Some((4, 40)));
    assert!(cache.contains_key(&1));
    assert!(cache.contains_key(&3));
}

#[test]
fn test_lfu_ties_evict_oldest() {
    let mut cache = make_lfu(3, 0);

    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);

    assert_eq!(cache.put("d", 4), Some(("a", 1)));
    assert_eq!(cache.put("e", 5), Some(("b", 2)));
}

#[test]
fn test_lfu_without_aging_counts_every_access() {
    let mut cache = make_lfu(2, 0);

    cache.put(1, 1);
    for _ in 0..10 {
        let _ = cache.get(&1);
    }
    assert_eq!(cache.frequency(&1), Some(11));
    assert_eq!(cache.lfu_metrics().aging_passes, 0);
}

#[test]
fn test_lfu_aging_lowers_frequencies() {
    let mut cache = make_lfu(2, 4);

    cache.put(1, 1);
    for _ in 0..4 {
        let _ = cache.get(&1);
    }
    // The fourth hit pushed the average to 5; every frequency drops by 2.
    assert_eq!(cache.frequency(&1), Some(3));
    assert_eq!(cache.total_frequency(), 3);
    assert_eq!(cache.lfu_metrics().aging_passes, 1);
}

// ============================================================================
// SHARED INTERFACE
// ============================================================================

fn exercise_policy<C: CachePolicy<u32, String>>(cache: &mut C) {
    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());
    assert_eq!(cache.get(&1).as_deref(), Some("one"));
    assert_eq!(cache.get_or_default(&99), String::new());
}

#[test]
fn test_every_engine_implements_cache_policy() {
    exercise_policy(&mut make_arc::<u32, String>(4, 2));
    exercise_policy(&mut make_lru::<u32, String>(4));
    exercise_policy(&mut make_lru_k::<u32, String>(4, 1));
    exercise_policy(&mut make_lfu::<u32, String>(4, 10));
}
