//! LRU-K Cache Implementation
//!
//! An LRU cache with an admission filter: a key is only stored once it has
//! been seen `k` times. Until then its accesses are counted in a separate,
//! bounded LRU *history* that holds nothing but counters.
//!
//! ```text
//!   put(x) ──▶ x cached? ── yes ──▶ overwrite in main cache
//!                 │
//!                 no
//!                 ▼
//!        history[x] += 1 ── reaches k ──▶ drop history[x], insert into main cache
//! ```
//!
//! Lookups count as accesses too: every `get` bumps the key's history
//! counter before consulting the main cache, so a key that is read a few
//! times and then written is admitted on that write.
//!
//! This keeps one-off keys (scans, cold misses) from pushing hot entries out
//! of the main cache, at the cost of a miss or two for genuinely new hot keys.

use crate::config::{LruCacheConfig, LruKCacheConfig};
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::traits::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// An LRU cache that admits a key only after `k` accesses.
///
/// # Examples
///
/// ```
/// use adaptive_cache_rs::LruKCache;
/// use adaptive_cache_rs::config::LruKCacheConfig;
/// use core::num::NonZeroUsize;
///
/// let config = LruKCacheConfig {
///     capacity: NonZeroUsize::new(2).unwrap(),
///     history_capacity: NonZeroUsize::new(8).unwrap(),
///     k: 2,
/// };
/// let mut cache = LruKCache::init(config, None);
///
/// cache.put("a", 1);
/// assert!(!cache.contains_key(&"a")); // seen once, only counted
///
/// cache.put("a", 1);
/// assert_eq!(cache.get(&"a"), Some(&1)); // second access admits it
/// ```
pub struct LruKCache<K, V, S = DefaultHashBuilder> {
    main: LruSegment<K, V, S>,
    history: LruSegment<K, usize, S>,
    k: usize,
}

impl<K: Hash + Eq + Clone, V> LruKCache<K, V, DefaultHashBuilder> {
    /// Creates a new LRU-K cache from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Main capacity, history capacity and admission threshold
    /// * `hasher` - Optional hash builder; the default one is used when `None`
    pub fn init(config: LruKCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        LruKCache::with_hasher(config, hasher.unwrap_or_default())
    }

    /// Creates an LRU-K cache whose history is as large as the cache itself.
    pub fn new(capacity: NonZeroUsize, k: usize) -> Self {
        LruKCache::init(
            LruKCacheConfig {
                capacity,
                history_capacity: capacity,
                k,
            },
            None,
        )
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> LruKCache<K, V, S> {
    /// Creates a new LRU-K cache with a custom hash builder.
    pub fn with_hasher(config: LruKCacheConfig, hash_builder: S) -> Self {
        LruKCache {
            main: LruSegment::init(LruCacheConfig::new(config.capacity), hash_builder.clone()),
            history: LruSegment::init(LruCacheConfig::new(config.history_capacity), hash_builder),
            k: config.k,
        }
    }

    /// Adds one to the history counter of `key` and returns the new count.
    fn record_access(&mut self, key: &K) -> usize {
        match self.history.get_mut(key) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.history.put(key.clone(), 1);
                1
            }
        }
    }

    /// Counts an access to `key`, then looks it up in the main cache.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.record_access(key);
        self.main.get(key)
    }

    /// Inserts or overwrites `key`.
    ///
    /// A cached key is overwritten in place and the previous value returned.
    /// Otherwise the access is counted and, once the count reaches `k`, the
    /// pair is admitted; the return value is then the evicted pair, if any.
    /// Puts that are only counted return `None`.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.main.contains_key(&key) {
            return self.main.put(key, value);
        }

        let count = self.record_access(&key);
        if count < self.k {
            self.main.metrics_mut().record_deferred_put();
            return None;
        }

        self.history.remove(&key);
        self.main.metrics_mut().record_admission();
        tracing::trace!(count, k = self.k, "admitting key into lru-k cache");
        self.main.put(key, value)
    }

    /// Removes `key` from the cache and forgets its access history.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.history.remove(key);
        self.main.remove(key)
    }

    /// Empties both the cache and the access history.
    pub fn clear(&mut self) {
        self.main.clear();
        self.history.clear();
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruKCache<K, V, S> {
    /// Returns the value for `key` without counting an access.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.main.peek(key)
    }

    /// Returns `true` if `key` has been admitted and is still cached.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.main.contains_key(key)
    }

    /// Number of accesses recorded for a key that is not yet admitted.
    pub fn history_count<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.history.peek(key).copied()
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.main.len()
    }

    /// Returns `true` if no entries are cached.
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Returns the maximum number of cached entries.
    pub fn cap(&self) -> NonZeroUsize {
        self.main.cap()
    }

    /// Returns the number of keys with an access history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Accesses required for admission.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Counters recorded so far for the main cache.
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        self.main.metrics()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruKCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.main.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU-K"
    }
}

impl<K, V, S> CachePolicy<K, V> for LruKCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn put(&mut self, key: K, value: V) {
        LruKCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        LruKCache::get(self, key).cloned()
    }
}

impl<K, V, S> core::fmt::Debug for LruKCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruKCache")
            .field("main", &self.main)
            .field("history", &self.history)
            .field("k", &self.k)
            .finish()
    }
}
