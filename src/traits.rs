//! The policy contract shared by every cache engine.
//!
//! [`CachePolicy`] is the lowest common denominator of the engines in this
//! crate: insert a value, look a value up, or look it up and fall back to
//! `V::default()`. It lets callers swap eviction disciplines without
//! touching their code, and it is what the hit-rate comparisons in the test
//! suite are written against.
//!
//! ```
//! use adaptive_cache_rs::traits::CachePolicy;
//! use adaptive_cache_rs::config::ArcCacheConfig;
//! use adaptive_cache_rs::{ArcCache, LruCache};
//! use core::num::NonZeroUsize;
//!
//! fn warm<C: CachePolicy<u32, u32>>(cache: &mut C) -> u32 {
//!     cache.put(1, 10);
//!     cache.get_or_default(&1) + cache.get_or_default(&2)
//! }
//!
//! let mut lru: LruCache<u32, u32> = LruCache::new(NonZeroUsize::new(4).unwrap());
//! let mut arc: ArcCache<u32, u32> = ArcCache::init(ArcCacheConfig::new(4), None);
//! assert_eq!(warm(&mut lru), 10);
//! assert_eq!(warm(&mut arc), 10);
//! ```

/// Uniform put / get interface over all eviction policies.
///
/// Values are returned by clone so that sharded and lock-protected engines
/// can implement the trait without handing out references into their
/// storage.
pub trait CachePolicy<K, V> {
    /// Inserts or overwrites `key`.
    ///
    /// A policy may decline to store the value (a zero-capacity ARC, or an
    /// LRU-K key that has not been seen often enough yet).
    fn put(&mut self, key: K, value: V);

    /// Looks `key` up, updating the policy's bookkeeping.
    fn get(&mut self, key: &K) -> Option<V>;

    /// Looks `key` up and returns `V::default()` on a miss.
    fn get_or_default(&mut self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }
}
