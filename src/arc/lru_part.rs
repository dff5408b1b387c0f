//! Recency sub-cache of the Adaptive Replacement Cache.
//!
//! [`ArcLruPart`] is a plain LRU list with two additions:
//!
//! - a **ghost list** remembering the keys it recently evicted, so that the
//!   coordinator can tell when the recency side was too small;
//! - a **promotion threshold**: every hit bumps the entry's access count and
//!   reports whether it reached the threshold, at which point the coordinator
//!   copies the entry into the frequency sub-cache.
//!
//! ```text
//!   main  (MRU first)             ghost (newest first)
//!   ┌───┐  ┌───┐  ┌───┐  evict   ┌───┐  ┌───┐
//!   │ c │─▶│ b │─▶│ a │ ───────▶ │ a │─▶│ z │ ─▶ dropped when full
//!   └───┘  └───┘  └───┘          └───┘  └───┘
//! ```
//!
//! Both lists live in one [`Arena`], so evicting to the ghost list relinks a
//! node without copying it. The ghost list is sized once, from the capacity
//! the part was built with, and is not affected by later capacity transfers.

use crate::entry::CacheEntry;
use crate::list::{Arena, List, NodeId};
use crate::metrics::ArcPartMetrics;
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

/// Recency half of an ARC cache: an LRU list, a ghost list and a promotion threshold.
///
/// # Examples
///
/// ```
/// use adaptive_cache_rs::arc::ArcLruPart;
///
/// let mut part: ArcLruPart<&str, i32> = ArcLruPart::new(2, 2);
/// assert!(part.put("a", 1));
/// assert_eq!(part.get(&"a"), Some((1, true)));
///
/// part.put("b", 2);
/// part.put("c", 3); // "a" is least recent and moves to the ghost list
/// assert!(!part.contains_key(&"a"));
/// assert!(part.check_ghost(&"a"));
/// assert!(!part.check_ghost(&"a"));
/// ```
pub struct ArcLruPart<K, V, S = DefaultHashBuilder> {
    capacity: usize,
    ghost_capacity: usize,
    transform_threshold: usize,
    arena: Arena<CacheEntry<K, V>>,
    main: List,
    ghost: List,
    main_index: HashMap<K, NodeId, S>,
    ghost_index: HashMap<K, NodeId, S>,
    metrics: ArcPartMetrics,
}

impl<K, V> ArcLruPart<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a recency part with the default hasher.
    pub fn new(capacity: usize, transform_threshold: usize) -> Self {
        Self::with_hasher(capacity, transform_threshold, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ArcLruPart<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Creates a recency part. `capacity` also fixes the ghost list size.
    pub fn with_hasher(capacity: usize, transform_threshold: usize, hash_builder: S) -> Self {
        let mut arena = Arena::with_capacity(2 * capacity + 4);
        let main = arena.new_list();
        let ghost = arena.new_list();
        ArcLruPart {
            capacity,
            ghost_capacity: capacity,
            transform_threshold,
            arena,
            main,
            ghost,
            main_index: HashMap::with_capacity_and_hasher(capacity, hash_builder.clone()),
            ghost_index: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            metrics: ArcPartMetrics::new(),
        }
    }

    /// Inserts or overwrites `key`.
    ///
    /// An existing entry gets the new value and moves to the front without
    /// touching its access count. A new entry evicts the least recent one to
    /// the ghost list when the part is full.
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
            self.arena.move_to_front(&self.main, id);
            self.metrics.core.record_update();
            return true;
        }

        if self.main_index.len() >= self.capacity {
            self.evict_least_recent();
        }

        let id = self.arena.insert(CacheEntry::new(key.clone(), value));
        self.arena.push_front(&mut self.main, id);
        self.main_index.insert(key, id);
        self.metrics.core.record_insertion();
        true
    }

    /// Looks `key` up in the main list.
    ///
    /// A hit moves the entry to the front and increments its access count.
    /// The returned flag is `true` once the count has reached the promotion
    /// threshold; it stays `true` on every later hit.
    pub fn get<Q>(&mut self, key: &Q) -> Option<(V, bool)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(&id) = self.main_index.get(key) else {
            self.metrics.core.record_miss();
            return None;
        };

        self.arena.move_to_front(&self.main, id);
        let entry = self.arena.get_mut(id)?;
        let should_promote = entry.record_access() >= self.transform_threshold;
        self.metrics.core.record_hit();
        if should_promote {
            self.metrics.record_promotion();
            tracing::trace!(
                access_count = entry.access_count(),
                "recency entry reached promotion threshold"
            );
        }
        Some((entry.value.clone(), should_promote))
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
                tracing::trace!(ghost_len = self.ghost.len(), "recency ghost hit");
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
    /// If the main list is exactly full its least recent entry is evicted to
    /// the ghost list first. Returns `false`, changing nothing, when the
    /// capacity is already 0.
    pub fn decrease_capacity(&mut self) -> bool {
        if self.capacity == 0 {
            self.metrics.record_capacity_refused();
            return false;
        }
        if self.main_index.len() == self.capacity {
            self.evict_least_recent();
        }
        self.capacity -= 1;
        self.metrics.record_capacity_donated();
        true
    }

    fn evict_least_recent(&mut self) {
        let Some(id) = self.arena.pop_back(&mut self.main) else {
            return;
        };
        let key = match self.arena.get_mut(id) {
            Some(entry) => {
                entry.reset_access_count();
                entry.key.clone()
            }
            None => return,
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
        self.arena.push_front(&mut self.ghost, id);
        self.ghost_index.insert(key, id);
        tracing::trace!(
            len = self.main_index.len(),
            capacity = self.capacity,
            "evicted least recent entry to ghost list"
        );
    }

    fn drop_oldest_ghost(&mut self) {
        let Some(id) = self.arena.pop_back(&mut self.ghost) else {
            return;
        };
        if let Some(entry) = self.arena.remove(id) {
            self.ghost_index.remove(&entry.key);
            self.metrics.record_ghost_drop();
        }
    }

    /// Returns `true` if `key` is resident, without touching recency.
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

    /// Removes every entry and ghost and restores the construction capacity.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.main = self.arena.new_list();
        self.ghost = self.arena.new_list();
        self.main_index.clear();
        self.ghost_index.clear();
        self.capacity = self.ghost_capacity;
    }
}

impl<K, V, S> ArcLruPart<K, V, S> {
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

    /// Access count at which hits report promotion.
    #[inline]
    pub fn transform_threshold(&self) -> usize {
        self.transform_threshold
    }

    /// Counters recorded so far.
    #[inline]
    pub fn metrics(&self) -> &ArcPartMetrics {
        &self.metrics
    }
}

impl<K, V, S> fmt::Debug for ArcLruPart<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcLruPart")
            .field("capacity", &self.capacity)
            .field("len", &self.main_index.len())
            .field("ghost_capacity", &self.ghost_capacity)
            .field("ghost_len", &self.ghost_index.len())
            .field("transform_threshold", &self.transform_threshold)
            .finish()
    }
}
