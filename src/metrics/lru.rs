//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache algorithms,
//! including the history-gated LRU-K variant.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Keys admitted after reaching the access threshold (LRU-K only)
    pub admissions: u64,

    /// Puts held back in the access history instead of being cached (LRU-K only)
    pub deferred_puts: u64,
}

impl LruCacheMetrics {
    /// Creates an empty set of LRU metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key being admitted from the access history into the cache.
    pub fn record_admission(&mut self) {
        self.admissions += 1;
    }

    /// Records a put that only bumped the access history.
    pub fn record_deferred_put(&mut self) {
        self.deferred_puts += 1;
    }

    /// Adds another set of LRU counters into this one.
    pub fn merge(&mut self, other: &LruCacheMetrics) {
        self.core.merge(&other.core);
        self.admissions += other.admissions;
        self.deferred_puts += other.deferred_puts;
    }

    /// Converts LRU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        if self.admissions > 0 || self.deferred_puts > 0 {
            metrics.insert("admissions".to_string(), self.admissions as f64);
            metrics.insert("deferred_puts".to_string(), self.deferred_puts as f64);
        }
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
