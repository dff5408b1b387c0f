//! Cache Metrics System
//!
//! Provides a flexible metrics system for cache algorithms using BTreeMap-based
//! metrics reporting. Each cache algorithm can track its own specific metrics
//! while implementing a common CacheMetrics trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap is used instead of HashMap for several reasons:
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Essential for testing and comparing policies
//! - **Better debugging**: Consistent output makes logs more readable
//!
//! The performance difference (O(log n) vs O(1)) is negligible with a couple
//! of dozen metric keys.
//!
//! # Counting model
//!
//! All caches in this crate are count-based, so every counter is a number of
//! operations or entries. A request is one `get`; `put` contributes insertions,
//! updates and evictions but never a request.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod arc;
pub mod lfu;
pub mod lru;

pub use arc::{ArcCacheMetrics, ArcPartMetrics};
pub use lfu::LfuCacheMetrics;
pub use lru::LruCacheMetrics;

/// Common metrics tracked by all cache algorithms
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups made to the cache
    pub requests: u64,

    /// Number of lookups that found the key
    pub cache_hits: u64,

    /// Number of new entries written into the cache
    pub insertions: u64,

    /// Number of `put` calls that overwrote an entry already present
    pub updates: u64,

    /// Number of entries evicted because of capacity constraints
    pub evictions: u64,
}

impl CoreCacheMetrics {
    /// Creates an empty set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found the key.
    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find the key.
    ///
    /// Cache misses are derived as `requests - cache_hits`.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new entry being written.
    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an existing entry being overwritten.
    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an entry leaving the cache because of capacity.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Number of lookups that missed.
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Calculates the hit rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the miss rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Adds another set of counters into this one.
    ///
    /// Used by the sharded caches to report a single view over all segments.
    pub fn merge(&mut self, other: &CoreCacheMetrics) {
        self.requests += other.requests;
        self.cache_hits += other.cache_hits;
        self.insertions += other.insertions;
        self.updates += other.updates;
        self.evictions += other.evictions;
    }

    /// Convert core metrics to BTreeMap for reporting
    ///
    /// # Returns
    /// A BTreeMap containing all core metrics with consistent key ordering
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Trait that all cache algorithms implement for metrics reporting
///
/// This trait provides a uniform interface for retrieving metrics from any cache
/// implementation, so different policies can be compared side by side.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    ///
    /// The returned BTreeMap contains all relevant metrics for the cache algorithm,
    /// including both core metrics and any algorithm-specific metrics.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g. "LRU", "LFU", "ARC")
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_counters() {
        let mut core = CoreCacheMetrics::new();
        core.record_hit();
        core.record_hit();
        core.record_miss();
        core.record_insertion();
        core.record_update();
        core.record_eviction();

        assert_eq!(core.requests, 3);
        assert_eq!(core.cache_hits, 2);
        assert_eq!(core.cache_misses(), 1);
        assert!((core.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
        assert!((core.miss_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_without_requests() {
        let core = CoreCacheMetrics::new();
        assert_eq!(core.hit_rate(), 0.0);
        assert_eq!(core.miss_rate(), 0.0);
        assert!(!core.to_btreemap().contains_key("eviction_rate"));
    }

    #[test]
    fn test_merge() {
        let mut a = CoreCacheMetrics::new();
        a.record_hit();
        a.record_insertion();
        let mut b = CoreCacheMetrics::new();
        b.record_miss();
        b.record_eviction();

        a.merge(&b);
        assert_eq!(a.requests, 2);
        assert_eq!(a.cache_hits, 1);
        assert_eq!(a.insertions, 1);
        assert_eq!(a.evictions, 1);
    }

    #[test]
    fn test_btreemap_keys() {
        let mut core = CoreCacheMetrics::new();
        core.record_insertion();
        core.record_eviction();
        let map = core.to_btreemap();
        assert_eq!(map.get("insertions"), Some(&1.0));
        assert_eq!(map.get("evictions"), Some(&1.0));
        assert_eq!(map.get("eviction_rate"), Some(&1.0));
    }
}
