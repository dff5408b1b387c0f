//! ARC Cache Metrics
//!
//! Counters for the two sub-caches of the Adaptive Replacement Cache plus a
//! combined view. Each sub-cache keeps its own [`ArcPartMetrics`]; the
//! coordinator stitches them together into [`ArcCacheMetrics`] together with
//! the current capacity split, which is the quantity ARC adapts over time.
//!
//! A lookup first consults the recency part and only falls through to the
//! frequency part on a miss, so the frequency part's request count equals the
//! recency part's miss count and the cache-level hit count is the sum of both
//! parts' hits.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};

/// Counters kept by one ARC sub-cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcPartMetrics {
    /// Lookups, hits, insertions, in-place updates and evictions to the ghost list
    pub core: CoreCacheMetrics,

    /// Ghost entries found (and consumed) by the ghost check
    pub ghost_hits: u64,

    /// Ghost entries discarded because the ghost list was full
    pub ghost_drops: u64,

    /// Hits that reached the promotion threshold (recency part only)
    pub promotions: u64,

    /// Capacity units received from the other sub-cache
    pub capacity_gained: u64,

    /// Capacity units given away to the other sub-cache
    pub capacity_donated: u64,

    /// Requests to give up capacity that were refused because capacity was 0
    pub capacity_refused: u64,
}

impl ArcPartMetrics {
    /// Creates an empty set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_ghost_hit(&mut self) {
        self.ghost_hits += 1;
    }

    pub(crate) fn record_ghost_drop(&mut self) {
        self.ghost_drops += 1;
    }

    pub(crate) fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    pub(crate) fn record_capacity_gained(&mut self) {
        self.capacity_gained += 1;
    }

    pub(crate) fn record_capacity_donated(&mut self) {
        self.capacity_donated += 1;
    }

    pub(crate) fn record_capacity_refused(&mut self) {
        self.capacity_refused += 1;
    }

    /// Writes every counter into `metrics` with the given key prefix.
    pub fn write_prefixed(&self, prefix: &str, metrics: &mut BTreeMap<String, f64>) {
        for (key, value) in self.core.to_btreemap() {
            metrics.insert(format!("{prefix}_{key}"), value);
        }
        let extra = [
            ("ghost_hits", self.ghost_hits),
            ("ghost_drops", self.ghost_drops),
            ("promotions", self.promotions),
            ("capacity_gained", self.capacity_gained),
            ("capacity_donated", self.capacity_donated),
            ("capacity_refused", self.capacity_refused),
        ];
        for (key, value) in extra {
            metrics.insert(format!("{prefix}_{key}"), value as f64);
        }
    }
}

/// Snapshot of both ARC sub-caches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcCacheMetrics {
    /// Counters of the recency sub-cache
    pub recent: ArcPartMetrics,

    /// Counters of the frequency sub-cache
    pub frequent: ArcPartMetrics,

    /// Capacity of the recency sub-cache at snapshot time
    pub recent_capacity: usize,

    /// Capacity of the frequency sub-cache at snapshot time
    pub frequent_capacity: usize,
}

impl ArcCacheMetrics {
    /// Number of `get` calls seen by the cache.
    pub fn requests(&self) -> u64 {
        self.recent.core.requests
    }

    /// Number of `get` calls answered by either sub-cache.
    pub fn hits(&self) -> u64 {
        self.recent.core.cache_hits + self.frequent.core.cache_hits
    }

    /// Fraction of `get` calls that were answered.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests();
        if requests > 0 {
            self.hits() as f64 / requests as f64
        } else {
            0.0
        }
    }

    /// Converts the snapshot to a BTreeMap for reporting.
    ///
    /// Per-part counters are prefixed with `recent_` and `frequent_`.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        self.recent.write_prefixed("recent", &mut metrics);
        self.frequent.write_prefixed("frequent", &mut metrics);

        let requests = self.requests();
        let hits = self.hits();
        metrics.insert("requests".to_string(), requests as f64);
        metrics.insert("cache_hits".to_string(), hits as f64);
        metrics.insert("cache_misses".to_string(), (requests - hits) as f64);
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert(
            "recent_capacity".to_string(),
            self.recent_capacity as f64,
        );
        metrics.insert(
            "frequent_capacity".to_string(),
            self.frequent_capacity as f64,
        );
        metrics.insert(
            "total_capacity".to_string(),
            (self.recent_capacity + self.frequent_capacity) as f64,
        );
        metrics
    }
}

impl CacheMetrics for ArcCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ARC"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_hit_rate() {
        let mut snapshot = ArcCacheMetrics::default();
        snapshot.recent.core.record_hit();
        snapshot.recent.core.record_miss();
        snapshot.recent.core.record_miss();
        snapshot.frequent.core.record_hit();
        snapshot.frequent.core.record_miss();

        assert_eq!(snapshot.requests(), 3);
        assert_eq!(snapshot.hits(), 2);
        assert!((snapshot.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_prefixed_keys() {
        let mut snapshot = ArcCacheMetrics {
            recent_capacity: 3,
            frequent_capacity: 1,
            ..Default::default()
        };
        snapshot.recent.record_ghost_hit();
        snapshot.frequent.record_capacity_donated();

        let map = snapshot.to_btreemap();
        assert_eq!(map.get("recent_ghost_hits"), Some(&1.0));
        assert_eq!(map.get("frequent_capacity_donated"), Some(&1.0));
        assert_eq!(map.get("total_capacity"), Some(&4.0));
        assert_eq!(map.get("hit_rate"), Some(&0.0));
    }
}
