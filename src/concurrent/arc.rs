//! Concurrent ARC Cache Implementation
//!
//! The thread-safe counterpart to [`ArcCache`](crate::ArcCache). Instead of
//! sharding, it keeps the two ARC sub-caches behind their own locks:
//!
//! ```text
//!   ┌──────────────── ConcurrentArcCache ────────────────┐
//!   │  ┌─ Mutex ──────────────┐  ┌─ Mutex ──────────────┐ │
//!   │  │ ArcLruPart           │  │ ArcLfuPart           │ │
//!   │  │ main + ghost         │  │ buckets + ghost      │ │
//!   │  └──────────────────────┘  └──────────────────────┘ │
//!   └────────────────────────────────────────────────────┘
//! ```
//!
//! Each call into a part takes that part's lock for the duration of the call
//! and releases it before the next part is touched; the two locks are never
//! held together, so there is no lock ordering to get wrong.
//!
//! A capacity transfer is therefore two critical sections: the donor gives up
//! a slot, then the recipient gains one. Between the two, another thread can
//! observe a total capacity one below the settled value. The eviction a
//! donor performs while shrinking happens inside its own critical section.

use crate::arc::{ArcLfuPart, ArcLruPart, GhostHit};
use crate::config::ArcCacheConfig;
use crate::metrics::{ArcCacheMetrics, CacheMetrics};
use crate::traits::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe Adaptive Replacement Cache.
///
/// All methods take `&self`; share the cache with `Arc`.
///
/// # Examples
///
/// ```
/// use adaptive_cache_rs::concurrent::ConcurrentArcCache;
/// use adaptive_cache_rs::config::ArcCacheConfig;
///
/// let cache = ConcurrentArcCache::init(ArcCacheConfig::new(2), None);
/// cache.put(1, "a");
/// assert_eq!(cache.get(&1), Some("a"));
/// assert_eq!(cache.get_or_default(&2), "");
/// ```
pub struct ConcurrentArcCache<K, V, S = DefaultHashBuilder> {
    recent: Mutex<ArcLruPart<K, V, S>>,
    frequent: Mutex<ArcLfuPart<K, V, S>>,
}

impl<K, V> ConcurrentArcCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates a new concurrent ARC cache from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity of each part and the promotion threshold
    /// * `hasher` - Optional hash builder; the default one is used when `None`
    pub fn init(config: ArcCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> ConcurrentArcCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    /// Creates a new concurrent ARC cache with a custom hash builder.
    pub fn init_with_hasher(config: ArcCacheConfig, hash_builder: S) -> Self {
        ConcurrentArcCache {
            recent: Mutex::new(ArcLruPart::with_hasher(
                config.capacity,
                config.transform_threshold,
                hash_builder.clone(),
            )),
            frequent: Mutex::new(ArcLfuPart::with_hasher(
                config.capacity,
                config.transform_threshold,
                hash_builder,
            )),
        }
    }

    fn check_ghosts(&self, key: &K) -> GhostHit {
        let recent_hit = self.recent.lock().check_ghost(key);
        if recent_hit {
            let granted = self.frequent.lock().decrease_capacity();
            if granted {
                self.recent.lock().increase_capacity();
                tracing::trace!("moved one slot to the recency part");
            } else {
                tracing::trace!("frequency part has no capacity to give");
            }
            return GhostHit::Recent;
        }

        let frequent_hit = self.frequent.lock().check_ghost(key);
        if frequent_hit {
            let granted = self.recent.lock().decrease_capacity();
            if granted {
                self.frequent.lock().increase_capacity();
                tracing::trace!("moved one slot to the frequency part");
            } else {
                tracing::trace!("recency part has no capacity to give");
            }
            return GhostHit::Frequent;
        }

        GhostHit::None
    }

    /// Inserts or overwrites `key`.
    ///
    /// If `key` was on a ghost list the pair goes into the recency part only;
    /// otherwise it is written to both parts.
    pub fn put(&self, key: K, value: V) {
        if self.check_ghosts(&key).is_hit() {
            self.recent.lock().put(key, value);
            return;
        }

        let stored = self.recent.lock().put(key.clone(), value.clone());
        if stored {
            self.frequent.lock().put(key, value);
        }
    }

    /// Looks `key` up, recency part first, and returns a clone of the value.
    pub fn get(&self, key: &K) -> Option<V> {
        self.check_ghosts(key);

        let recent = self.recent.lock().get(key);
        if let Some((value, should_promote)) = recent {
            if should_promote {
                self.frequent.lock().put(key.clone(), value.clone());
            }
            return Some(value);
        }
        self.frequent.lock().get(key)
    }

    /// Looks `key` up and returns `V::default()` on a miss.
    pub fn get_or_default(&self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }

    /// Returns `true` if the recency part holds `key`.
    pub fn contains_recent(&self, key: &K) -> bool {
        self.recent.lock().contains_key(key)
    }

    /// Returns `true` if the frequency part holds `key`.
    pub fn contains_frequent(&self, key: &K) -> bool {
        self.frequent.lock().contains_key(key)
    }

    /// Removes all entries and ghosts and restores the configured capacity split.
    pub fn clear(&self) {
        self.recent.lock().clear();
        self.frequent.lock().clear();
    }
}

impl<K, V, S> ConcurrentArcCache<K, V, S> {
    /// Number of entries in the recency part.
    pub fn recent_len(&self) -> usize {
        self.recent.lock().len()
    }

    /// Number of entries in the frequency part.
    pub fn frequent_len(&self) -> usize {
        self.frequent.lock().len()
    }

    /// Current capacity of the recency part.
    pub fn recent_capacity(&self) -> usize {
        self.recent.lock().capacity()
    }

    /// Current capacity of the frequency part.
    pub fn frequent_capacity(&self) -> usize {
        self.frequent.lock().capacity()
    }

    /// Sum of both parts' capacities, read one lock at a time.
    pub fn total_capacity(&self) -> usize {
        self.recent_capacity() + self.frequent_capacity()
    }

    /// Number of keys on the recency ghost list.
    pub fn recent_ghost_len(&self) -> usize {
        self.recent.lock().ghost_len()
    }

    /// Number of keys on the frequency ghost list.
    pub fn frequent_ghost_len(&self) -> usize {
        self.frequent.lock().ghost_len()
    }

    /// Fixed size of each ghost list.
    pub fn ghost_capacity(&self) -> usize {
        self.recent.lock().ghost_capacity()
    }

    /// Recency hits needed before an entry is copied to the frequency part.
    pub fn transform_threshold(&self) -> usize {
        self.recent.lock().transform_threshold()
    }

    /// Snapshot of both parts' counters.
    pub fn arc_metrics(&self) -> ArcCacheMetrics {
        let (recent, recent_capacity) = {
            let part = self.recent.lock();
            (part.metrics().clone(), part.capacity())
        };
        let (frequent, frequent_capacity) = {
            let part = self.frequent.lock();
            (part.metrics().clone(), part.capacity())
        };
        ArcCacheMetrics {
            recent,
            frequent,
            recent_capacity,
            frequent_capacity,
        }
    }
}

impl<K, V, S> CacheMetrics for ConcurrentArcCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.arc_metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentARC"
    }
}

impl<K, V, S> CachePolicy<K, V> for ConcurrentArcCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    fn put(&mut self, key: K, value: V) {
        ConcurrentArcCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        ConcurrentArcCache::get(self, key)
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentArcCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentArcCache")
            .field("recent_len", &self.recent_len())
            .field("frequent_len", &self.frequent_len())
            .field("recent_capacity", &self.recent_capacity())
            .field("frequent_capacity", &self.frequent_capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;
    use std::string::{String, ToString};
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    fn make_cache(capacity: usize) -> ConcurrentArcCache<i32, &'static str> {
        ConcurrentArcCache::init(ArcCacheConfig::new(capacity), None)
    }

    #[test]
    fn test_matches_single_threaded_walkthrough() {
        let cache = make_cache(2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");

        assert!(!cache.contains_recent(&1));
        assert!(!cache.contains_frequent(&1));
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.recent_capacity(), 3);
        assert_eq!(cache.frequent_capacity(), 1);
        assert_eq!(cache.total_capacity(), 4);
    }

    #[test]
    fn test_promotion_and_get_or_default() {
        let cache: ConcurrentArcCache<String, i32> =
            ConcurrentArcCache::init(ArcCacheConfig::new(4), None);
        cache.put("hot".to_string(), 7);
        assert_eq!(cache.get(&"hot".to_string()), Some(7));
        assert_eq!(cache.get_or_default(&"cold".to_string()), 0);
        assert_eq!(cache.arc_metrics().recent.promotions, 1);
    }

    #[test]
    fn test_clear() {
        let cache = make_cache(2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        cache.clear();
        assert_eq!(cache.recent_len(), 0);
        assert_eq!(cache.frequent_len(), 0);
        assert_eq!(cache.recent_ghost_len(), 0);
        assert_eq!(cache.frequent_ghost_len(), 0);
        assert_eq!(cache.total_capacity(), 4);
    }

    #[test]
    fn test_concurrent_access_keeps_invariants() {
        let cache: Arc<ConcurrentArcCache<i32, i32>> =
            Arc::new(ConcurrentArcCache::init(ArcCacheConfig::new(32), None));
        let mut handles: Vec<thread::JoinHandle<()>> = Vec::new();

        for t in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..2_000 {
                    let key = (i * 7 + t) % 200;
                    if i % 3 == 0 {
                        cache.put(key, key * 10);
                    } else if let Some(value) = cache.get(&key) {
                        assert_eq!(value, key * 10);
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.recent_len() <= cache.recent_capacity());
        assert!(cache.frequent_len() <= cache.frequent_capacity());
        assert!(cache.recent_ghost_len() <= cache.ghost_capacity());
        assert!(cache.frequent_ghost_len() <= cache.ghost_capacity());
        assert!(cache.total_capacity() <= 64);
    }

    #[test]
    fn test_cache_policy_through_mut_ref() {
        fn roundtrip<C: CachePolicy<i32, &'static str>>(cache: &mut C) -> Option<&'static str> {
            cache.put(5, "five");
            cache.get(&5)
        }
        let mut cache = make_cache(3);
        assert_eq!(roundtrip(&mut cache), Some("five"));
        assert_eq!(cache.algorithm_name(), "ConcurrentARC");
    }
}
