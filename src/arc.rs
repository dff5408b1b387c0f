//! Adaptive Replacement Cache (ARC) Implementation
//!
//! ARC splits its capacity between two sub-caches and keeps shifting the split
//! towards whichever side would have avoided the most recent misses.
//!
//! # Algorithm
//!
//! ```text
//!              ┌──────────────────────── recency part ────────────────────────┐
//!   put ─────▶ │ main list (MRU first)                 │ ghost list           │
//!              └───────────────┬───────────────────────┴──────────────────────┘
//!                              │ hit count reaches threshold: copy
//!              ┌───────────────▼──────── frequency part ──────────────────────┐
//!              │ frequency buckets (oldest first)      │ ghost list           │
//!              └───────────────────────────────────────┴──────────────────────┘
//! ```
//!
//! - Every `put` and `get` first checks the two ghost lists. A key found on the
//!   recency ghost list means the recency part evicted it too early, so the
//!   frequency part gives up one slot and the recency part gains one. A hit on
//!   the frequency ghost list moves a slot the other way. If the donor has no
//!   capacity left the transfer is skipped.
//! - A `put` that did not hit a ghost stores the pair in **both** parts. A
//!   `put` that hit a ghost stores it in the recency part only.
//! - A `get` consults the recency part first. Once an entry there has been
//!   hit `transform_threshold` times it is also written into the frequency
//!   part (it stays in the recency part as well). Recency misses fall through
//!   to the frequency part.
//!
//! Each ghost list is sized from the configured capacity and keeps that size
//! while capacity moves between the parts.
//!
//! # Performance Characteristics
//!
//! - `put`, `get`: O(1) for hashing and list relinking, plus O(log f) in the
//!   number of distinct frequencies for bucket lookups
//! - Memory: up to `4 * capacity` nodes (two main lists, two ghost lists)
//!
//! # Thread Safety
//!
//! `ArcCache` is not thread-safe. With the `concurrent` feature,
//! [`ConcurrentArcCache`](crate::concurrent::ConcurrentArcCache) guards each
//! part with its own lock.

mod lfu_part;
mod lru_part;

pub use self::lfu_part::ArcLfuPart;
pub use self::lru_part::ArcLruPart;

use crate::config::ArcCacheConfig;
use crate::metrics::{ArcCacheMetrics, CacheMetrics};
use crate::traits::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Which ghost list, if any, held a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GhostHit {
    None,
    Recent,
    Frequent,
}

impl GhostHit {
    pub(crate) fn is_hit(self) -> bool {
        self != GhostHit::None
    }
}

/// An Adaptive Replacement Cache.
///
/// # Examples
///
/// ```
/// use adaptive_cache_rs::ArcCache;
/// use adaptive_cache_rs::config::ArcCacheConfig;
///
/// let mut cache = ArcCache::init(ArcCacheConfig::new(2), None);
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.put(3, "c");
///
/// // 1 was evicted from both parts; asking for it grows the recency part.
/// assert_eq!(cache.get(&1), None);
/// assert_eq!(cache.recent_capacity(), 3);
/// assert_eq!(cache.frequent_capacity(), 1);
/// ```
pub struct ArcCache<K, V, S = DefaultHashBuilder> {
    recent: ArcLruPart<K, V, S>,
    frequent: ArcLfuPart<K, V, S>,
}

impl<K, V> ArcCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a new ARC cache from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity of each part and the promotion threshold
    /// * `hasher` - Optional hash builder; the default one is used when `None`
    pub fn init(config: ArcCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }

    /// Creates a cache with the given per-part capacity and threshold 2.
    pub fn new(capacity: usize) -> Self {
        Self::init(ArcCacheConfig::new(capacity), None)
    }
}

impl<K, V, S> ArcCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Creates a new ARC cache with a custom hash builder.
    pub fn init_with_hasher(config: ArcCacheConfig, hash_builder: S) -> Self {
        ArcCache {
            recent: ArcLruPart::with_hasher(
                config.capacity,
                config.transform_threshold,
                hash_builder.clone(),
            ),
            frequent: ArcLfuPart::with_hasher(
                config.capacity,
                config.transform_threshold,
                hash_builder,
            ),
        }
    }

    /// Inserts or overwrites `key`.
    ///
    /// If `key` was on a ghost list the pair goes into the recency part only;
    /// otherwise it is written to both parts.
    pub fn put(&mut self, key: K, value: V) {
        if self.check_ghosts(&key).is_hit() {
            self.recent.put(key, value);
        } else if self.recent.put(key.clone(), value.clone()) {
            self.frequent.put(key, value);
        }
    }

    /// Looks `key` up, recency part first.
    ///
    /// The ghost lists are always checked first, so a lookup for a recently
    /// evicted key shifts capacity even though it misses.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.check_ghosts(key);

        if let Some((value, should_promote)) = self.recent.get(key) {
            if should_promote {
                self.frequent.put(key.clone(), value.clone());
            }
            return Some(value);
        }
        self.frequent.get(key)
    }

    /// Looks `key` up and returns `V::default()` on a miss.
    pub fn get_or_default(&mut self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }

    fn check_ghosts(&mut self, key: &K) -> GhostHit {
        if self.recent.check_ghost(key) {
            if self.frequent.decrease_capacity() {
                self.recent.increase_capacity();
                tracing::trace!(
                    recent_capacity = self.recent.capacity(),
                    frequent_capacity = self.frequent.capacity(),
                    "moved one slot to the recency part"
                );
            } else {
                tracing::trace!("frequency part has no capacity to give");
            }
            GhostHit::Recent
        } else if self.frequent.check_ghost(key) {
            if self.recent.decrease_capacity() {
                self.frequent.increase_capacity();
                tracing::trace!(
                    recent_capacity = self.recent.capacity(),
                    frequent_capacity = self.frequent.capacity(),
                    "moved one slot to the frequency part"
                );
            } else {
                tracing::trace!("recency part has no capacity to give");
            }
            GhostHit::Frequent
        } else {
            GhostHit::None
        }
    }

    /// Returns `true` if the recency part holds `key`.
    pub fn contains_recent(&self, key: &K) -> bool {
        self.recent.contains_key(key)
    }

    /// Returns `true` if the frequency part holds `key`.
    pub fn contains_frequent(&self, key: &K) -> bool {
        self.frequent.contains_key(key)
    }

    /// Removes all entries and ghosts from both parts and restores the
    /// configured capacity split.
    pub fn clear(&mut self) {
        self.recent.clear();
        self.frequent.clear();
    }
}

impl<K, V, S> ArcCache<K, V, S> {
    /// Number of entries in the recency part.
    pub fn recent_len(&self) -> usize {
        self.recent.len()
    }

    /// Number of entries in the frequency part.
    pub fn frequent_len(&self) -> usize {
        self.frequent.len()
    }

    /// Current capacity of the recency part.
    pub fn recent_capacity(&self) -> usize {
        self.recent.capacity()
    }

    /// Current capacity of the frequency part.
    pub fn frequent_capacity(&self) -> usize {
        self.frequent.capacity()
    }

    /// Sum of both parts' capacities.
    ///
    /// Starts at twice the configured capacity and only drops when a capacity
    /// transfer is refused.
    pub fn total_capacity(&self) -> usize {
        self.recent.capacity() + self.frequent.capacity()
    }

    /// Number of keys on the recency ghost list.
    pub fn recent_ghost_len(&self) -> usize {
        self.recent.ghost_len()
    }

    /// Number of keys on the frequency ghost list.
    pub fn frequent_ghost_len(&self) -> usize {
        self.frequent.ghost_len()
    }

    /// Fixed size of each ghost list.
    pub fn ghost_capacity(&self) -> usize {
        self.recent.ghost_capacity()
    }

    /// Recency hits needed before an entry is copied to the frequency part.
    pub fn transform_threshold(&self) -> usize {
        self.recent.transform_threshold()
    }

    /// Snapshot of both parts' counters.
    pub fn arc_metrics(&self) -> ArcCacheMetrics {
        ArcCacheMetrics {
            recent: self.recent.metrics().clone(),
            frequent: self.frequent.metrics().clone(),
            recent_capacity: self.recent.capacity(),
            frequent_capacity: self.frequent.capacity(),
        }
    }
}

impl<K, V, S> CacheMetrics for ArcCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.arc_metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ARC"
    }
}

impl<K, V, S> CachePolicy<K, V> for ArcCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn put(&mut self, key: K, value: V) {
        ArcCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        ArcCache::get(self, key)
    }
}

impl<K, V, S> fmt::Debug for ArcCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCache")
            .field("recent", &self.recent)
            .field("frequent", &self.frequent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn cache(capacity: usize, threshold: usize) -> ArcCache<i32, &'static str> {
        ArcCache::init(
            ArcCacheConfig {
                capacity,
                transform_threshold: threshold,
            },
            None,
        )
    }

    #[test]
    fn test_put_writes_both_parts() {
        let mut cache = cache(2, 2);
        cache.put(1, "a");
        assert!(cache.contains_recent(&1));
        assert!(cache.contains_frequent(&1));
        assert_eq!(cache.get(&1), Some("a"));
    }

    #[test]
    fn test_two_slot_walkthrough() {
        let mut cache = cache(2, 2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");

        assert!(!cache.contains_recent(&1));
        assert!(cache.contains_recent(&2));
        assert!(cache.contains_recent(&3));
        assert!(!cache.contains_frequent(&1));
        assert!(cache.contains_frequent(&2));
        assert!(cache.contains_frequent(&3));

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.recent_capacity(), 3);
        assert_eq!(cache.frequent_capacity(), 1);
        assert_eq!(cache.frequent_len(), 1);
        assert!(cache.contains_frequent(&3));
        assert_eq!(cache.total_capacity(), 4);
    }

    #[test]
    fn test_ghost_hit_put_goes_to_recency_only() {
        let mut cache = cache(1, 2);
        cache.put(1, "a");
        cache.put(2, "b"); // 1 goes to both ghost lists
        cache.put(1, "A"); // recency ghost hit

        assert!(cache.contains_recent(&1));
        assert!(!cache.contains_frequent(&1));
        assert_eq!(cache.recent_capacity(), 2);
        assert_eq!(cache.frequent_capacity(), 0);
    }

    #[test]
    fn test_promotion_copies_into_frequency_part() {
        let mut cache = cache(2, 2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        cache.put(1, "a"); // recency ghost hit: stored in the recency part only
        assert!(cache.contains_recent(&1));
        assert!(!cache.contains_frequent(&1));

        // The frequency ghost still remembers 1, so this lookup hands a slot
        // back to the frequency part before the promotion lands there.
        assert_eq!(cache.get(&1), Some("a"));
        assert!(cache.contains_recent(&1));
        assert!(cache.contains_frequent(&1));
        assert_eq!(cache.recent_capacity(), 2);
        assert_eq!(cache.frequent_capacity(), 2);
    }

    #[test]
    fn test_refused_transfer_leaves_capacities() {
        let mut cache = cache(1, 2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(1, "a"); // frequency part gives its only slot away
        assert_eq!(cache.recent_capacity(), 2);
        assert_eq!(cache.frequent_capacity(), 0);

        cache.put(3, "c"); // recency evicts 2
        cache.put(4, "d"); // recency evicts 1, dropping the ghost of 2
        assert_eq!(cache.recent_ghost_len(), 1);

        // Recency ghost hit, but the frequency part has nothing to donate.
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.recent_capacity(), 2);
        assert_eq!(cache.frequent_capacity(), 0);
        assert_eq!(cache.arc_metrics().frequent.capacity_refused, 1);
    }

    #[test]
    fn test_zero_capacity_cache_stores_nothing() {
        let mut cache = cache(0, 2);
        cache.put(1, "a");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.recent_len(), 0);
        assert_eq!(cache.frequent_len(), 0);
        assert_eq!(cache.total_capacity(), 0);
    }

    #[test]
    fn test_get_or_default() {
        let mut cache: ArcCache<i32, i32> = ArcCache::new(2);
        cache.put(1, 5);
        assert_eq!(cache.get_or_default(&1), 5);
        assert_eq!(cache.get_or_default(&2), 0);
    }

    #[test]
    fn test_clear_restores_split() {
        let mut cache = cache(2, 2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        cache.get(&1);
        cache.clear();
        assert_eq!(cache.recent_capacity(), 2);
        assert_eq!(cache.frequent_capacity(), 2);
        assert_eq!(cache.recent_ghost_len(), 0);
        assert_eq!(cache.frequent_ghost_len(), 0);
        assert_eq!(cache.get(&3), None);
    }

    #[test]
    fn test_metrics_snapshot() {
        let mut cache = cache(2, 2);
        cache.put(1, "a");
        cache.get(&1);
        cache.get(&9);

        let snapshot = cache.arc_metrics();
        assert_eq!(snapshot.requests(), 2);
        assert_eq!(snapshot.hits(), 1);
        assert_eq!(snapshot.recent.promotions, 1);

        let map = cache.metrics();
        assert_eq!(map.get("requests"), Some(&2.0));
        assert_eq!(map.get("total_capacity"), Some(&4.0));
        assert_eq!(cache.algorithm_name(), "ARC");
    }

    #[test]
    fn test_string_keys() {
        let mut cache: ArcCache<String, usize> = ArcCache::new(4);
        for word in ["alpha", "beta", "gamma"] {
            cache.put(word.to_string(), word.len());
        }
        assert_eq!(cache.get(&"beta".to_string()), Some(4));
        assert_eq!(cache.ghost_capacity(), 4);
        assert_eq!(cache.transform_threshold(), 2);
    }
}
