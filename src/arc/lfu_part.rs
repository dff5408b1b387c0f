//! Frequency sub-cache of the Adaptive Replacement Cache.
//!
//! [`ArcLfuPart`] groups its entries into buckets keyed by access frequency.
//! Each bucket is a list ordered oldest first, so eviction removes the oldest
//! entry of the lowest populated frequency:
//!
//! ```text
//!   buckets                               ghost (oldest first)
//!   freq 1: [ d ─ e ]  ◀── min_frequency   [ x ─ y ] ◀── append evicted here
//!   freq 3: [ a ]                            ▲
//!   freq 4: [ b ─ c ]                        └── dropped first when full
//! ```
//!
//! A hit (or an overwriting `put`) moves the entry from bucket `f` to the tail
//! of bucket `f + 1`. Empty buckets are removed immediately. The ghost list
//! is sized from the construction capacity and keeps that size for the life
//! of the part.

use crate::entry::CacheEntry;
use crate::list::{Arena, List, NodeId};
use crate::metrics::ArcPartMetrics;
use alloc::collections::BTreeMap;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Frequency half of an ARC cache: frequency buckets plus a ghost list.
///
/// # Examples
///
/// ```
/// use adaptive_cache_rs::arc::ArcLfuPart;
///
/// let mut part: ArcLfuPart<&str, i32> = ArcLfuPart::new(2, 2);
/// part.put("a", 1);
/// part.put("b", 2);
/// assert_eq!(part.get(&"a"), Some(1)); // "a" now has frequency 2
///
/// part.put("c", 3); // "b" is the only entry at frequency 1
/// assert!(!part.contains_key(&"b"));
/// assert!(part.check_ghost(&"b"));
/// ```
pub struct ArcLfuPart<K, V, S = DefaultHashBuilder> {
    capacity: usize,
    ghost_capacity: usize,
    transform_threshold: usize,
    min_frequency: Option<usize>,
    arena: Arena<CacheEntry<K, V>>,
    buckets: BTreeMap<usize, List>,
    ghost: List,
    main_index: HashMap<K, NodeId, S>,
    ghost_index: HashMap<K, NodeId, S>,
    metrics: ArcPartMetrics,
}

impl<K, V> ArcLfuPart<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a frequency part with the default hasher.
    pub fn new(capacity: usize, transform_threshold: usize) -> Self {
        Self::with_hasher(capacity, transform_threshold, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ArcLfuPart<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Creates a frequency part. `capacity` also fixes the ghost list size.
    ///
    /// The threshold is only recorded; promotion is decided by the recency part.
    pub fn with_hasher(capacity: usize, transform_threshold: usize, hash_builder: S) -> Self {
        let mut arena = Arena::with_capacity(2 * capacity + 4);
        let ghost = arena.new_list();
        ArcLfuPart {
            capacity,
            ghost_capacity: capacity,
            transform_threshold,
            min_frequency: None,
            arena,
            buckets: BTreeMap::new(),
            ghost,
            main_index: HashMap::with_capacity_and_hasher(capacity, hash_builder.clone()),
            ghost_index: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            metrics: ArcPartMetrics::new(),
        }
    }

    /// Inserts or overwrites `key`.
    ///
    /// Overwriting counts as an access and raises the entry's frequency by
    /// one. A new entry starts at frequency 1, evicting the least frequent
    /// entry first when the part is full.
    ///
    /// Returns `false` only when the capacity is 0, in which case nothing is stored.
    pub fn put(&mut self, key: K, value: V) -> bool {
        if self.capacity == 0 {
            return false;
        }

        if let Some(&id) = self.main_index.get(&key) {
            if let Some(entry) = self.arena.get_mut(id) {
                entry.value = value;
            }
            self.bump_frequency(id);
            self.metrics.core.record_update();
            return true;
        }

        if self.main_index.len() >= self.capacity {
            self.evict_least_frequent();
        }

        let id = self.arena.insert(CacheEntry::new(key.clone(), value));
        self.push_to_bucket(1, id);
        self.main_index.insert(key, id);
        self.min_frequency = Some(1);
        self.metrics.core.record_insertion();
        true
    }

    /// Looks `key` up, raising its frequency on a hit. A miss changes nothing.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(&id) = self.main_index.get(key) else {
            self.metrics.core.record_miss();
            return None;
        };
        self.bump_frequency(id);
        self.metrics.core.record_hit();
        self.arena.get(id).map(|entry| entry.value.clone())
    }

    /// Consumes the ghost entry for `key`, returning whether there was one.
    pub fn check_ghost<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.ghost_index.remove(key) {
            Some(id) => {
                self.arena.unlink(&mut self.ghost, id);
                self.arena.remove(id);
                self.metrics.record_ghost_hit();
                tracing::trace!(ghost_len = self.ghost.len(), "frequency ghost hit");
                true
            }
            None => false,
        }
    }

    /// Grows the capacity by one slot.
    pub fn increase_capacity(&mut self) {
        self.capacity += 1;
        self.metrics.record_capacity_gained();
    }

    /// Gives up one slot of capacity.
    ///
    /// If the part is exactly full its least frequent entry is evicted to the
    /// ghost list first. Returns `false`, changing nothing, when the capacity
    /// is already 0.
    pub fn decrease_capacity(&mut self) -> bool {
        if self.capacity == 0 {
            self.metrics.record_capacity_refused();
            return false;
        }
        if self.main_index.len() == self.capacity {
            self.evict_least_frequent();
        }
        self.capacity -= 1;
        self.metrics.record_capacity_donated();
        true
    }

    /// Evicts the oldest entry of the lowest frequency to the ghost list.
    ///
    /// Does nothing when the part is empty.
    pub fn evict_least_frequent(&mut self) {
        let Some(min) = self.current_min_frequency() else {
            return;
        };
        let Some(bucket) = self.buckets.get_mut(&min) else {
            return;
        };
        let Some(id) = self.arena.pop_front(bucket) else {
            return;
        };
        if bucket.is_empty() {
            if let Some(bucket) = self.buckets.remove(&min) {
                self.arena.release_list(bucket);
            }
            self.min_frequency = self.buckets.keys().next().copied();
        }

        let Some(key) = self.arena.get(id).map(|entry| entry.key.clone()) else {
            return;
        };
        self.main_index.remove(&key);
        self.metrics.core.record_eviction();

        if self.ghost_capacity == 0 {
            self.arena.remove(id);
            return;
        }

        if let Some(stale) = self.ghost_index.remove(&key) {
            self.arena.unlink(&mut self.ghost, stale);
            self.arena.remove(stale);
        }
        if self.ghost_index.len() >= self.ghost_capacity {
            self.drop_oldest_ghost();
        }
        self.arena.push_back(&mut self.ghost, id);
        self.ghost_index.insert(key, id);
        tracing::trace!(
            frequency = min,
            len = self.main_index.len(),
            "evicted least frequent entry to ghost list"
        );
    }

    fn current_min_frequency(&mut self) -> Option<usize> {
        match self.min_frequency {
            Some(min) if self.buckets.contains_key(&min) => Some(min),
            _ => {
                self.min_frequency = self.buckets.keys().next().copied();
                self.min_frequency
            }
        }
    }

    fn bump_frequency(&mut self, id: NodeId) {
        let Some(entry) = self.arena.get_mut(id) else {
            return;
        };
        let old = entry.access_count();
        let new = entry.record_access();

        if let Some(bucket) = self.buckets.get_mut(&old) {
            self.arena.unlink(bucket, id);
            if bucket.is_empty() {
                if let Some(bucket) = self.buckets.remove(&old) {
                    self.arena.release_list(bucket);
                }
                if self.min_frequency == Some(old) {
                    self.min_frequency = Some(new);
                }
            }
        }
        self.push_to_bucket(new, id);
    }

    fn push_to_bucket(&mut self, frequency: usize, id: NodeId) {
        let arena = &mut self.arena;
        let bucket = self
            .buckets
            .entry(frequency)
            .or_insert_with(|| arena.new_list());
        arena.push_back(bucket, id);
    }

    fn drop_oldest_ghost(&mut self) {
        let Some(id) = self.arena.pop_front(&mut self.ghost) else {
            return;
        };
        if let Some(entry) = self.arena.remove(id) {
            self.ghost_index.remove(&entry.key);
            self.metrics.record_ghost_drop();
        }
    }

    /// Returns `true` if `key` is resident, without touching its frequency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.main_index.contains_key(key)
    }

    /// Returns `true` if `key` is on the ghost list.
    pub fn contains_ghost<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.ghost_index.contains_key(key)
    }

    /// Current frequency of a resident `key`.
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = *self.main_index.get(key)?;
        self.arena.get(id).map(CacheEntry::access_count)
    }

    /// Removes every entry and ghost and restores the construction capacity.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.buckets.clear();
        self.ghost = self.arena.new_list();
        self.main_index.clear();
        self.ghost_index.clear();
        self.min_frequency = None;
        self.capacity = self.ghost_capacity;
    }
}

impl<K, V, S> ArcLfuPart<K, V, S> {
    /// Number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.main_index.len()
    }

    /// Returns `true` if nothing is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.main_index.is_empty()
    }

    /// Current capacity; changes as capacity moves between the two parts.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of keys on the ghost list.
    #[inline]
    pub fn ghost_len(&self) -> usize {
        self.ghost_index.len()
    }

    /// Fixed size of the ghost list.
    #[inline]
    pub fn ghost_capacity(&self) -> usize {
        self.ghost_capacity
    }

    /// Threshold the part was built with.
    #[inline]
    pub fn transform_threshold(&self) -> usize {
        self.transform_threshold
    }

    /// Lowest populated frequency, `None` when empty.
    #[inline]
    pub fn min_frequency(&self) -> Option<usize> {
        self.min_frequency
    }

    /// Counters recorded so far.
    #[inline]
    pub fn metrics(&self) -> &ArcPartMetrics {
        &self.metrics
    }
}

impl<K, V, S> fmt::Debug for ArcLfuPart<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcLfuPart")
            .field("capacity", &self.capacity)
            .field("len", &self.main_index.len())
            .field("ghost_capacity", &self.ghost_capacity)
            .field("ghost_len", &self.ghost_index.len())
            .field("min_frequency", &self.min_frequency)
            .field("frequency_levels", &self.buckets.len())
            .finish()
    }
}
