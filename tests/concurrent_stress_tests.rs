//! Stress Tests for Concurrent Caches
//!
//! These tests verify thread safety and the structural invariants of every
//! concurrent cache under high contention.

#![cfg(feature = "concurrent")]

use adaptive_cache_rs::config::{
    ArcCacheConfig, ConcurrentCacheConfig, ConcurrentLfuCacheConfig, ConcurrentLruCacheConfig,
    LfuCacheConfig, LruCacheConfig,
};
use adaptive_cache_rs::{ConcurrentArcCache, ConcurrentLfuCache, ConcurrentLruCache};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const NUM_THREADS: usize = 16;
const OPS_PER_THREAD: usize = 10_000;

fn lru_config(capacity: usize, segments: usize) -> ConcurrentLruCacheConfig {
    ConcurrentCacheConfig {
        base: LruCacheConfig::new(NonZeroUsize::new(capacity).unwrap()),
        segments,
    }
}

fn lfu_config(capacity: usize, segments: usize) -> ConcurrentLfuCacheConfig {
    ConcurrentCacheConfig {
        base: LfuCacheConfig::new(NonZeroUsize::new(capacity).unwrap()),
        segments,
    }
}

/// ARC under contention: capacity only moves between the parts
#[test]
fn stress_arc_capacity_is_conserved() {
    let capacity = 64;
    let cache: Arc<ConcurrentArcCache<usize, usize>> =
        Arc::new(ConcurrentArcCache::init(ArcCacheConfig::new(capacity), None));

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..OPS_PER_THREAD / 4 {
                // A hot set shared by all threads plus a per-thread scan.
                let key = if i % 2 == 0 { i % 32 } else { 1_000 + t * OPS_PER_THREAD + i };
                if i % 3 == 0 {
                    cache.put(key, key);
                } else if let Some(value) = cache.get(&key) {
                    assert_eq!(value, key);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(cache.total_capacity(), capacity * 2);
    assert!(cache.recent_len() <= cache.recent_capacity());
    assert!(cache.frequent_len() <= cache.frequent_capacity());
    assert!(cache.recent_ghost_len() <= cache.ghost_capacity());
    assert!(cache.frequent_ghost_len() <= cache.ghost_capacity());
}

/// ARC values read back are always the last ones written for that key
#[test]
fn stress_arc_values_are_consistent() {
    let cache: Arc<ConcurrentArcCache<usize, usize>> =
        Arc::new(ConcurrentArcCache::init(ArcCacheConfig::new(128), None));
    let hits = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for t in 0..8 {
        let cache = Arc::clone(&cache);
        let hits = Arc::clone(&hits);
        handles.push(thread::spawn(move || {
            for i in 0..2_000 {
                let key = t * 100 + i % 100;
                cache.put(key, key * 3);
                if cache.get(&key) == Some(key * 3) {
                    hits.fetch_add(1, Ordering::Relaxed);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert!(hits.load(Ordering::Relaxed) > 0);
}

/// High contention on a small key set
#[test]
fn stress_lru_high_contention() {
    let cache: Arc<ConcurrentLruCache<usize, usize>> =
        Arc::new(ConcurrentLruCache::init(lru_config(100, 16), None));
    let capacity = cache.capacity();

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..OPS_PER_THREAD {
                let key = i % 10;
                if i % 2 == 0 {
                    cache.put(key, t * OPS_PER_THREAD + i);
                } else {
                    let _ = cache.get(&key);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert!(cache.len() <= capacity);
}

/// Test with various segment counts
#[test]
fn stress_segment_counts() {
    for segments in [1, 2, 4, 8, 16, 32] {
        let cache: Arc<ConcurrentLruCache<usize, usize>> =
            Arc::new(ConcurrentLruCache::init(lru_config(1000, segments), None));

        let mut handles = Vec::new();
        for t in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..1000 {
                    cache.put(t * 1000 + i, i);
                    let _ = cache.get(&(t * 1000 + i));
                }
            }));
        }

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert_eq!(cache.segment_count(), segments);
        assert!(cache.len() <= cache.capacity());
    }
}

/// LFU under contention keeps every segment within capacity
#[test]
fn stress_lfu_capacity_limits() {
    let cache: Arc<ConcurrentLfuCache<usize, usize>> =
        Arc::new(ConcurrentLfuCache::init(lfu_config(100, 8), None));
    let capacity = cache.capacity();

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..OPS_PER_THREAD {
                let key = if i % 4 == 0 { i % 8 } else { t * OPS_PER_THREAD + i };
                cache.put(key, i);
                let _ = cache.get(&(i % 8));
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert!(cache.len() <= capacity);
    let metrics = cache.lfu_metrics();
    assert!(metrics.core.cache_hits > 0);
}

/// Test edge case: empty cache operations
#[test]
fn stress_empty_cache() {
    let cache: Arc<ConcurrentLfuCache<usize, usize>> =
        Arc::new(ConcurrentLfuCache::init(lfu_config(100, 16), None));

    let mut handles = Vec::new();
    for _ in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..1000 {
                assert!(cache.get(&i).is_none());
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert!(cache.is_empty());
    assert_eq!(cache.lfu_metrics().core.requests, (NUM_THREADS * 1000) as u64);
}
