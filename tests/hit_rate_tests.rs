//! Hit Rate Tests
//!
//! Replays synthetic access traces through every engine via [`CachePolicy`]
//! and checks the hit rates each replacement policy is expected to achieve.
//! Traces come from a seeded RNG so every run sees the same sequence.

use adaptive_cache_rs::config::{ArcCacheConfig, LfuCacheConfig, LruCacheConfig, LruKCacheConfig};
use adaptive_cache_rs::{ArcCache, CachePolicy, LfuCache, LruCache, LruKCache};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroUsize;

const CAPACITY: usize = 50;

/// Looks every key up and inserts it on a miss. Returns the hit ratio.
fn replay<C: CachePolicy<u64, u64>>(cache: &mut C, trace: &[u64]) -> f64 {
    let mut hits = 0usize;
    for &key in trace {
        if cache.get(&key).is_some() {
            hits += 1;
        } else {
            cache.put(key, key);
        }
    }
    hits as f64 / trace.len() as f64
}

/// 90% of accesses go to 20 hot keys, the rest to a large cold key space.
fn hot_spot_trace(len: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..len)
        .map(|_| {
            if rng.random_bool(0.9) {
                rng.random_range(0..20)
            } else {
                rng.random_range(1_000..6_000)
            }
        })
        .collect()
}

/// Each round touches 10 hot keys, then 30 keys that are never seen again.
fn loop_scan_trace(rounds: u64) -> Vec<u64> {
    let mut trace = Vec::new();
    let mut next_scan_key = 10_000;
    for _ in 0..rounds {
        trace.extend(0..10);
        for _ in 0..30 {
            trace.push(next_scan_key);
            next_scan_key += 1;
        }
    }
    trace
}

fn cap() -> NonZeroUsize {
    NonZeroUsize::new(CAPACITY).unwrap()
}

#[test]
fn test_hot_spot_workload_every_engine_hits() {
    let trace = hot_spot_trace(20_000);

    let arc = replay(&mut ArcCache::init(ArcCacheConfig::new(CAPACITY), None), &trace);
    let lru = replay(&mut LruCache::init(LruCacheConfig::new(cap()), None), &trace);
    let lfu = replay(&mut LfuCache::init(LfuCacheConfig::new(cap()), None), &trace);
    let lru_k = replay(
        &mut LruKCache::init(
            LruKCacheConfig {
                capacity: cap(),
                history_capacity: NonZeroUsize::new(CAPACITY * 10).unwrap(),
                k: 2,
            },
            None,
        ),
        &trace,
    );

    assert!(arc > 0.5, "ARC hit rate {arc}");
    assert!(lru > 0.5, "LRU hit rate {lru}");
    assert!(lfu > 0.5, "LFU hit rate {lfu}");
    assert!(lru_k > 0.5, "LRU-K hit rate {lru_k}");
}

#[test]
fn test_loop_scan_defeats_lru_but_not_lru_k() {
    // 40 distinct keys between two uses of a hot key never fit in 20 slots.
    let trace = loop_scan_trace(50);
    let small = NonZeroUsize::new(20).unwrap();

    let lru = replay(&mut LruCache::init(LruCacheConfig::new(small), None), &trace);

    // A miss followed by a put counts twice, so k = 3 keeps one-off keys out.
    let lru_k = replay(
        &mut LruKCache::init(
            LruKCacheConfig {
                capacity: small,
                history_capacity: NonZeroUsize::new(1_000).unwrap(),
                k: 3,
            },
            None,
        ),
        &trace,
    );

    let arc = replay(&mut ArcCache::init(ArcCacheConfig::new(20), None), &trace);

    assert_eq!(lru, 0.0);
    assert!(lru_k > 0.2, "LRU-K hit rate {lru_k}");
    assert!(arc >= lru, "ARC hit rate {arc}");
}

#[test]
fn test_lfu_aging_lets_new_favourites_in() {
    // Phase one makes keys 0..10 very popular. Phase two switches to
    // 100..110, each looked up in bursts of ten.
    let mut trace = Vec::new();
    for _ in 0..200 {
        trace.extend(0..10);
    }
    for _ in 0..200 {
        for key in 100..110 {
            trace.extend(std::iter::repeat(key).take(10));
        }
    }

    let small = NonZeroUsize::new(10).unwrap();
    let aged = replay(
        &mut LfuCache::init(
            LfuCacheConfig {
                capacity: small,
                max_average_frequency: 8,
            },
            None,
        ),
        &trace,
    );
    let unaged = replay(
        &mut LfuCache::init(
            LfuCacheConfig {
                capacity: small,
                max_average_frequency: 0,
            },
            None,
        ),
        &trace,
    );

    assert!(aged > unaged, "aged {aged} vs unaged {unaged}");
}
