//! Concurrent LRU Cache Implementation
//!
//! A thread-safe LRU cache using lock striping (segmented storage). This is
//! the multi-threaded counterpart to [`LruCache`](crate::LruCache).
//!
//! # How It Works
//!
//! Keys are partitioned across independent segments, each behind its own lock:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      ConcurrentLruCache                              │
//! │                                                                      │
//! │  hash(key) % N  ──▶  Segment Selection                               │
//! │                                                                      │
//! │  ┌──────────────┐ ┌──────────────┐     ┌──────────────┐              │
//! │  │  Segment 0   │ │  Segment 1   │ ... │  Segment N-1 │              │
//! │  │    Mutex     │ │    Mutex     │     │    Mutex     │              │
//! │  │  LruSegment  │ │  LruSegment  │     │  LruSegment  │              │
//! │  └──────────────┘ └──────────────┘     └──────────────┘              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each segment gets `ceil(capacity / segments)` slots, so the total capacity
//! can exceed the configured one by up to `segments - 1`.
//!
//! LRU ordering is per segment, not global. An entry can be evicted from one
//! segment while another segment still holds entries used less recently.
//!
//! # Example
//!
//! ```rust
//! use adaptive_cache_rs::concurrent::ConcurrentLruCache;
//! use adaptive_cache_rs::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let config: ConcurrentLruCacheConfig = ConcurrentCacheConfig {
//!     base: LruCacheConfig::new(NonZeroUsize::new(10_000).unwrap()),
//!     segments: 16,
//! };
//! let cache = Arc::new(ConcurrentLruCache::init(config, None));
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for j in 0..1000 {
//!             cache.put(format!("key-{}-{}", i, j), j);
//!         }
//!     })
//! }).collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 4000);
//! ```

use super::segment_capacity;
use crate::config::{ConcurrentLruCacheConfig, LruCacheConfig};
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
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

/// A thread-safe LRU cache with segmented storage.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone + Send`.
/// - `V`: Value type. Must implement `Clone + Send`.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```rust
/// use adaptive_cache_rs::concurrent::ConcurrentLruCache;
/// use adaptive_cache_rs::config::{ConcurrentLruCacheConfig, LruCacheConfig};
/// use std::num::NonZeroUsize;
///
/// let config = ConcurrentLruCacheConfig::new(LruCacheConfig::new(NonZeroUsize::new(1000).unwrap()));
/// let cache = ConcurrentLruCache::init(config, None);
///
/// cache.put("key".to_string(), 42);
/// assert_eq!(cache.get(&"key".to_string()), Some(42));
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    segments: Box<[Mutex<LruSegment<K, V, S>>]>,
    hash_builder: S,
}

impl<K, V> ConcurrentLruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates a new concurrent LRU cache from a configuration with an optional hasher.
    ///
    /// # Arguments
    ///
    /// * `config` - Total capacity and segment count
    /// * `hasher` - Optional custom hash builder. If `None`, uses `DefaultHashBuilder`
    ///
    /// # Panics
    ///
    /// Panics if `config.segments` is zero.
    pub fn init(config: ConcurrentLruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    /// Creates a concurrent LRU cache with a custom hash builder.
    ///
    /// The hash builder is cloned into every segment and also used for
    /// segment selection.
    ///
    /// # Panics
    ///
    /// Panics if `config.segments` is zero.
    pub fn init_with_hasher(config: ConcurrentLruCacheConfig, hash_builder: S) -> Self {
        let segment_cap = segment_capacity(config.base.capacity, config.segments);

        let segments: Vec<_> = (0..config.segments)
            .map(|_| {
                Mutex::new(LruSegment::init(
                    LruCacheConfig::new(segment_cap),
                    hash_builder.clone(),
                ))
            })
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
    ///
    /// Segments are locked one after another, so the result may be stale
    /// under concurrent writes.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.lock().is_empty())
    }

    /// Retrieves a clone of the value and marks it most recently used.
    ///
    /// Use [`get_with()`](Self::get_with) to avoid the clone.
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
    /// # Returns
    ///
    /// - `Some((key, old_value))` if the key existed
    /// - `Some((evicted_key, evicted_value))` if the segment was full
    /// - `None` otherwise
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

    /// Checks if the cache contains a key without touching its recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let segment = self.segments[idx].lock();
        segment.contains_key(key)
    }

    /// Removes all entries from all segments, one segment at a time.
    pub fn clear(&self) {
        for segment in self.segments.iter() {
            segment.lock().clear();
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Counters of all segments summed together.
    pub fn lru_metrics(&self) -> LruCacheMetrics {
        let mut aggregated = LruCacheMetrics::default();
        for segment in self.segments.iter() {
            aggregated.merge(segment.lock().metrics());
        }
        aggregated
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for ConcurrentLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.lru_metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> CachePolicy<K, V> for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    fn put(&mut self, key: K, value: V) {
        ConcurrentLruCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        ConcurrentLruCache::get(self, key)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> core::fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total_len: usize = self.segments.iter().map(|s| s.lock().len()).sum();
        f.debug_struct("ConcurrentLruCache")
            .field("segment_count", &self.segments.len())
            .field("total_len", &total_len)
            .finish()
    }
}
