//! Least Frequently Used Cache Implementation.
//!
//! The LFU (Least Frequently Used) cache evicts the least frequently accessed items
//! when the cache reaches capacity. This implementation tracks the frequency of
//! access for each item and keeps items grouped by frequency.
//!
//! # Algorithm
//!
//! ```text
//!   freq 1: [ e ─ f ]        ◀── min_frequency, evict from the front
//!   freq 2: [ c ]
//!   freq 5: [ a ─ b ─ d ]    ◀── a hit on `c` moves it to the back of freq 3
//! ```
//!
//! Within a frequency, entries are ordered oldest first, so ties are broken
//! by evicting the entry that reached that frequency earliest.
//!
//! # Frequency aging
//!
//! Plain LFU lets entries that were popular long ago become unevictable. This
//! cache keeps a running total of all frequencies; whenever the average
//! frequency (`total / len`, integer division) exceeds the configured
//! `max_average_frequency`, every frequency is lowered by
//! `max_average_frequency / 2` (never below 1) and the buckets are rebuilt.
//! Setting `max_average_frequency` to 0 turns aging off.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, use
//! [`ConcurrentLfuCache`](crate::concurrent::ConcurrentLfuCache) with the
//! `concurrent` feature.

use crate::config::LfuCacheConfig;
use crate::entry::CacheEntry;
use crate::list::{Arena, List, NodeId};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use crate::traits::CachePolicy;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Internal LFU segment containing the actual cache algorithm.
///
/// This is shared between `LfuCache` (single-threaded) and
/// `ConcurrentLfuCache` (multi-threaded). All algorithm logic is
/// implemented here to avoid code duplication.
pub(crate) struct LfuSegment<K, V, S = DefaultHashBuilder> {
    /// Configuration for the LFU cache
    config: LfuCacheConfig,

    /// Lowest populated frequency, `None` when empty
    min_frequency: Option<usize>,

    /// Node storage shared by all frequency buckets
    arena: Arena<CacheEntry<K, V>>,

    /// Map from frequency to the entries at that frequency, oldest first
    buckets: BTreeMap<usize, List>,

    /// Map from keys to their node
    map: HashMap<K, NodeId, S>,

    /// Sum of the frequencies of all resident entries
    total_frequency: usize,

    /// Metrics for tracking cache performance and frequency distribution
    metrics: LfuCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuSegment<K, V, S> {
    /// Creates a new LFU segment from a configuration and hash builder.
    pub(crate) fn init(config: LfuCacheConfig, hash_builder: S) -> Self {
        let cap = config.capacity.get();
        LfuSegment {
            config,
            min_frequency: None,
            arena: Arena::with_capacity(cap + 8),
            buckets: BTreeMap::new(),
            map: HashMap::with_capacity_and_hasher(cap, hash_builder),
            total_frequency: 0,
            metrics: LfuCacheMetrics::new(),
        }
    }

    /// Returns the maximum number of key-value pairs the segment can hold.
    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the current number of key-value pairs in the segment.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the segment contains no key-value pairs.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns a reference to the metrics for this segment.
    #[inline]
    pub(crate) fn metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    #[inline]
    pub(crate) fn min_frequency(&self) -> Option<usize> {
        self.min_frequency
    }

    #[inline]
    pub(crate) fn total_frequency(&self) -> usize {
        self.total_frequency
    }

    fn push_to_bucket(&mut self, frequency: usize, id: NodeId) {
        let arena = &mut self.arena;
        let bucket = self
            .buckets
            .entry(frequency)
            .or_insert_with(|| arena.new_list());
        arena.push_back(bucket, id);
    }

    /// Unlinks `id` from the bucket for `frequency`, dropping the bucket if it empties.
    ///
    /// Returns `true` if the bucket was dropped.
    fn unlink_from_bucket(&mut self, frequency: usize, id: NodeId) -> bool {
        let Some(bucket) = self.buckets.get_mut(&frequency) else {
            return false;
        };
        self.arena.unlink(bucket, id);
        if !bucket.is_empty() {
            return false;
        }
        if let Some(bucket) = self.buckets.remove(&frequency) {
            self.arena.release_list(bucket);
        }
        true
    }

    /// Moves an entry to the back of the next frequency bucket.
    fn bump_frequency(&mut self, id: NodeId) {
        let Some(entry) = self.arena.get_mut(id) else {
            return;
        };
        let old = entry.access_count();
        let new = entry.record_access();

        if self.unlink_from_bucket(old, id) && self.min_frequency == Some(old) {
            self.min_frequency = Some(new);
        }
        self.push_to_bucket(new, id);
        self.metrics.record_frequency_increment();
        self.add_frequency();
    }

    /// Adds one to the running total and ages every entry if the average got too high.
    fn add_frequency(&mut self) {
        self.total_frequency += 1;
        let max = self.config.max_average_frequency;
        if max == 0 || self.map.is_empty() {
            return;
        }
        if self.total_frequency / self.map.len() > max {
            self.age_frequencies();
        }
    }

    fn age_frequencies(&mut self) {
        let decrement = self.config.max_average_frequency / 2;
        let old_buckets = mem::take(&mut self.buckets);
        let mut total = 0;

        for (_, mut bucket) in old_buckets {
            while let Some(id) = self.arena.pop_front(&mut bucket) {
                let Some(entry) = self.arena.get_mut(id) else {
                    continue;
                };
                let aged = entry.access_count().saturating_sub(decrement).max(1);
                entry.set_access_count(aged);
                total += aged;
                self.push_to_bucket(aged, id);
            }
            self.arena.release_list(bucket);
        }

        self.total_frequency = total;
        self.min_frequency = self.buckets.keys().next().copied();
        self.metrics.record_aging_pass();
        tracing::debug!(
            decrement,
            total_frequency = total,
            len = self.map.len(),
            "aged lfu frequencies"
        );
    }

    fn refresh_frequency_metrics(&mut self) {
        self.metrics.update_frequency_levels(&self.buckets);
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(id) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        self.metrics.core.record_hit();
        self.bump_frequency(id);
        self.refresh_frequency_metrics();
        self.arena.get(id).map(|entry| &entry.value)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(id) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        self.metrics.core.record_hit();
        self.bump_frequency(id);
        self.refresh_frequency_metrics();
        self.arena.get_mut(id).map(|entry| &mut entry.value)
    }

    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.get(key)?;
        self.arena.get(*id).map(|entry| &entry.value)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.get(key)?;
        self.arena.get(*id).map(CacheEntry::access_count)
    }

    /// Inserts a key-value pair.
    ///
    /// Overwriting an existing key counts as an access. Returns the previous
    /// value on overwrite, or the evicted pair when the insert pushed out the
    /// least frequently used entry.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(&id) = self.map.get(&key) {
            let old_value = {
                let entry = self.arena.get_mut(id)?;
                mem::replace(&mut entry.value, value)
            };
            self.metrics.core.record_update();
            self.bump_frequency(id);
            self.refresh_frequency_metrics();
            return Some((key, old_value));
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            evicted = self.pop_lfu();
        }

        let id = self.arena.insert(CacheEntry::new(key.clone(), value));
        self.push_to_bucket(1, id);
        self.map.insert(key, id);
        self.min_frequency = Some(1);
        self.metrics.core.record_insertion();
        self.add_frequency();
        self.refresh_frequency_metrics();

        evicted
    }

    /// Removes and returns the oldest entry of the lowest frequency.
    pub(crate) fn pop_lfu(&mut self) -> Option<(K, V)> {
        let min = match self.min_frequency {
            Some(min) if self.buckets.contains_key(&min) => min,
            _ => *self.buckets.keys().next()?,
        };
        let id = self.arena.front(self.buckets.get(&min)?)?;
        if self.unlink_from_bucket(min, id) {
            self.min_frequency = self.buckets.keys().next().copied();
        }

        let entry = self.arena.remove(id)?;
        self.map.remove(&entry.key);
        self.total_frequency = self.total_frequency.saturating_sub(entry.access_count());
        self.metrics.core.record_eviction();
        self.refresh_frequency_metrics();
        Some((entry.key, entry.value))
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.remove(key)?;
        let frequency = self.arena.get(id)?.access_count();
        if self.unlink_from_bucket(frequency, id) && self.min_frequency == Some(frequency) {
            self.min_frequency = self.buckets.keys().next().copied();
        }
        self.total_frequency = self.total_frequency.saturating_sub(frequency);
        self.refresh_frequency_metrics();
        self.arena.remove(id).map(|entry| entry.value)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.buckets.clear();
        self.arena.clear();
        self.min_frequency = None;
        self.total_frequency = 0;
        self.refresh_frequency_metrics();
    }
}

impl<K, V, S> core::fmt::Debug for LfuSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("min_frequency", &self.min_frequency)
            .field("total_frequency", &self.total_frequency)
            .finish()
    }
}

/// An implementation of a Least Frequently Used (LFU) cache with frequency aging.
///
/// # Examples
///
/// ```
/// use adaptive_cache_rs::LfuCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// // Access "a" several times to raise its frequency
/// cache.get(&"a");
/// cache.get(&"a");
///
/// // "b" has the lowest frequency and is evicted
/// cache.put("c", 3);
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    segment: LfuSegment<K, V, S>,
}

impl<K: Hash + Eq, V> LfuCache<K, V, DefaultHashBuilder> {
    /// Creates a new LFU cache from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity and aging ceiling
    /// * `hasher` - Optional hash builder; the default one is used when `None`
    pub fn init(config: LfuCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        LfuCache::with_hasher(config, hasher.unwrap_or_default())
    }

    /// Creates a new LFU cache with the default aging ceiling.
    pub fn new(cap: NonZeroUsize) -> Self {
        LfuCache::init(LfuCacheConfig::new(cap), None)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates a new LFU cache with a custom hash builder.
    pub fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: LfuSegment::init(config, hash_builder),
        }
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns the value for `key`, raising its frequency.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Returns a mutable reference to the value for `key`, raising its frequency.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns the value for `key` without changing its frequency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns `true` if `key` is cached.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains_key(key)
    }

    /// Current frequency of `key`.
    #[inline]
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.frequency(key)
    }

    /// Lowest frequency among cached entries.
    #[inline]
    pub fn min_frequency(&self) -> Option<usize> {
        self.segment.min_frequency()
    }

    /// Sum of all cached entries' frequencies.
    #[inline]
    pub fn total_frequency(&self) -> usize {
        self.segment.total_frequency()
    }

    /// Removes `key` and returns its value.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes every entry and resets all frequencies. Metrics are kept.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Same as [`clear`](Self::clear).
    #[inline]
    pub fn purge(&mut self) {
        self.segment.clear()
    }

    /// Counters recorded so far.
    pub fn lfu_metrics(&self) -> &LfuCacheMetrics {
        self.segment.metrics()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Inserts a key-value pair.
    ///
    /// Returns the key and previous value when `key` was already cached, or
    /// the evicted pair when the insert pushed out the least frequently used
    /// entry.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.segment.put(key, value)
    }

    /// Removes and returns the least frequently used entry.
    #[inline]
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        self.segment.pop_lfu()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

impl<K, V, S> CachePolicy<K, V> for LfuCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn put(&mut self, key: K, value: V) {
        LfuCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<V> {
        LfuCache::get(self, key).cloned()
    }
}
