//! Concurrent LFU Cache Implementation
//!
//! A thread-safe LFU cache using lock striping. This is the multi-threaded
//! counterpart to [`LfuCache`](crate::LfuCache).
//!
//! # How It Works
//!
//! Keys are partitioned across segments by `hash(key) % segments`; every
//! segment is an independent LFU engine with its own frequency buckets,
//! frequency total and aging pass. Frequencies are therefore compared within
//! a segment only: the globally least frequent entry is not necessarily the
//! one evicted.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     ConcurrentLfuCache                       │
//! │  hash(key) % N  ──▶  Segment Selection                       │
//! │                                                              │
//! │  ┌──────────────┐ ┌──────────────┐     ┌──────────────┐      │
//! │  │    Mutex     │ │    Mutex     │ ... │    Mutex     │      │
//! │  │  LfuSegment  │ │  LfuSegment  │     │  LfuSegment  │      │
//! │  │ freq buckets │ │ freq buckets │     │ freq buckets │      │
//! │  └──────────────┘ └──────────────┘     └──────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use adaptive_cache_rs::concurrent::ConcurrentLfuCache;
//! use adaptive_cache_rs::config::{ConcurrentCacheConfig, ConcurrentLfuCacheConfig, LfuCacheConfig};
//! use std::num::NonZeroUsize;
//!
//! let config: ConcurrentLfuCacheConfig = ConcurrentCacheConfig {
//!     base: LfuCacheConfig::new(NonZeroUsize::new(1000).unwrap()),
//!     segments: 8,
//! };
//! let cache = ConcurrentLfuCache::init(config, None);
//!
//! cache.put("popular".to_string(), 1);
//! for _ in 0..5 {
//!     cache.get(&"popular".to_string());
//! }
//! assert_eq!(cache.frequency(&"popular".to_string()), Some(6));
//! ```

use super::segment_capacity;
use crate::config::{ConcurrentLfuCacheConfig, LfuCacheConfig};
use crate::lfu::LfuSegment;
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use crate::traits::CachePolicy;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LFU cache with segmented storage.
///
/// Each segment ages its own frequencies with the configured
/// `max_average_frequency`.
pub struct ConcurrentLfuCache<K, V, S = DefaultHashBuilder> {
    segments: Box<[Mutex<LfuSegment<K, V, S>>]>,
    hash_builder: S,
}

impl<K, V> ConcurrentLfuCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates a new concurrent LFU cache from a configuration with an optional hasher.
    ///
    /// # Panics
    ///
    /// Panics if `config.segments` is zero.
    pub fn init(config: ConcurrentLfuCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> ConcurrentLfuCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    /// Creates a concurrent LFU cache with a custom hash builder.
    ///
    /// # Panics
    ///
    /// Panics if `config.segments` is zero.
    pub fn init_with_hasher(config: ConcurrentLfuCacheConfig, hash_builder: S) -> Self {
        let segment_config = LfuCacheConfig {
            capacity: segment_capacity(config.base.capacity, config.segments),
            max_average_frequency: config.base.max_average_frequency,
        };

        let segments: Vec<_> = (0..config.segments)
            .map(|_| Mutex::new(LfuSegment::init(segment_config, hash_builder.clone())))
            .collect();

        Self {
            segments: segments.into_boxed_slice(),
            hash_builder,
        }
    }

    #[inline]
    fn segment_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        (self.hash_builder.hash_one(key) as usize) % self.segments.len()
    }

    /// Returns the total capacity across all segments.
    pub fn capacity(&self) -> usize {
        self.segments.iter().map(|s| s.lock().cap().get()).sum()
    }

    /// Returns the number of segments in the cache.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the total number of entries across all segments.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.lock().is_empty())
    }

    /// Retrieves a clone of the value and bumps its frequency.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get(key).cloned()
    }

    /// Applies `f` to the value while holding the segment lock.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get(key).map(f)
    }

    /// Applies `f` to a mutable reference to the value while holding the segment lock.
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get_mut(key).map(f)
    }

    /// Inserts a key-value pair into the owning segment.
    ///
    /// Returns the old value on overwrite, or the evicted pair when the
    /// segment was full.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let idx = self.segment_index(&key);
        let mut segment = self.segments[idx].lock();
        segment.put(key, value)
    }

    /// Removes a key from the cache, returning its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.remove(key)
    }

    /// Checks if the cache contains a key without bumping its frequency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let segment = self.segments[idx].lock();
        segment.contains_key(key)
    }

    /// Current frequency of `key`, if resident.
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let segment = self.segments[idx].lock();
        segment.frequency(key)
    }

    /// Removes all entries from all segments, one segment at a time.
    pub fn clear(&self) {
        for segment in self.segments.iter() {
            segment.lock().clear();
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ConcurrentLfuCache<K, V, S> {
    /// Counters of all segments combined.
    pub fn lfu_metrics(&self) -> LfuCacheMetrics {
        let mut aggregated = LfuCacheMetrics::default();
        for segment in self.segments.iter() {
            aggregated.merge(segment.lock().metrics());
        }
        aggregated
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for ConcurrentLfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.lfu_metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLFU"
    }
}

impl<K, V, S> CachePolicy<K, V> for ConcurrentLfuCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    fn put(&mut self, key: K, value: V) {
        ConcurrentLfuCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        ConcurrentLfuCache::get(self, key)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> core::fmt::Debug for ConcurrentLfuCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total_len: usize = self.segments.iter().map(|s| s.lock().len()).sum();
        f.debug_struct("ConcurrentLfuCache")
            .field("segment_count", &self.segments.len())
            .field("total_len", &total_len)
            .finish()
    }
}
