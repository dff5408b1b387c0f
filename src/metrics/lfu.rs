//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm.
//! LFU tracks access frequency for each item, so these metrics focus on the
//! frequency distribution and on the aging passes that keep it bounded.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Lowest populated frequency after the last update
    pub min_frequency: u64,

    /// Highest populated frequency after the last update
    pub max_frequency: u64,

    /// Total number of frequency increments (hits and overwriting puts)
    pub total_frequency_increments: u64,

    /// Number of distinct frequency buckets in use
    pub active_frequency_levels: u64,

    /// Number of times every frequency was lowered to bound the average
    pub aging_passes: u64,
}

impl LfuCacheMetrics {
    /// Creates an empty set of LFU metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frequency increment.
    pub fn record_frequency_increment(&mut self) {
        self.total_frequency_increments += 1;
    }

    /// Records one aging pass over the whole cache.
    pub fn record_aging_pass(&mut self) {
        self.aging_passes += 1;
    }

    /// Refreshes the frequency range from the bucket map.
    ///
    /// # Arguments
    /// * `frequency_lists` - Map of frequency to the bucket at that frequency
    pub fn update_frequency_levels<T>(&mut self, frequency_lists: &BTreeMap<usize, T>) {
        self.active_frequency_levels = frequency_lists.len() as u64;
        self.min_frequency = frequency_lists.keys().next().copied().unwrap_or(0) as u64;
        self.max_frequency = frequency_lists.keys().next_back().copied().unwrap_or(0) as u64;
    }

    /// Average number of frequency increments per hit.
    pub fn average_frequency(&self) -> f64 {
        if self.core.cache_hits > 0 {
            self.total_frequency_increments as f64 / self.core.cache_hits as f64
        } else {
            0.0
        }
    }

    /// Adds another set of LFU counters into this one.
    ///
    /// Frequency bounds are widened to cover both; bucket counts are summed.
    pub fn merge(&mut self, other: &LfuCacheMetrics) {
        self.core.merge(&other.core);
        self.total_frequency_increments += other.total_frequency_increments;
        self.aging_passes += other.aging_passes;
        self.active_frequency_levels += other.active_frequency_levels;
        if other.min_frequency > 0
            && (self.min_frequency == 0 || other.min_frequency < self.min_frequency)
        {
            self.min_frequency = other.min_frequency;
        }
        self.max_frequency = self.max_frequency.max(other.max_frequency);
    }

    /// Converts LFU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert("aging_passes".to_string(), self.aging_passes as f64);
        metrics.insert("average_frequency".to_string(), self.average_frequency());

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_levels() {
        let mut metrics = LfuCacheMetrics::new();
        let mut lists = BTreeMap::new();
        lists.insert(1usize, ());
        lists.insert(4usize, ());
        metrics.update_frequency_levels(&lists);
        assert_eq!(metrics.min_frequency, 1);
        assert_eq!(metrics.max_frequency, 4);
        assert_eq!(metrics.active_frequency_levels, 2);
    }

    #[test]
    fn test_merge_widens_range() {
        let mut a = LfuCacheMetrics::new();
        a.min_frequency = 3;
        a.max_frequency = 5;
        let mut b = LfuCacheMetrics::new();
        b.min_frequency = 1;
        b.max_frequency = 2;
        b.aging_passes = 1;
        a.merge(&b);
        assert_eq!(a.min_frequency, 1);
        assert_eq!(a.max_frequency, 5);
        assert_eq!(a.aging_passes, 1);
    }
}
