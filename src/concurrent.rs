//! Concurrent Cache Implementations
//!
//! This module provides thread-safe caches built from the single-threaded
//! engines and `parking_lot::Mutex`.
//!
//! # Architecture
//!
//! Two locking layouts are used:
//!
//! - **One lock per ARC sub-cache.** [`ConcurrentArcCache`] keeps its recency
//!   part and its frequency part behind separate mutexes. Every sub-cache call
//!   is one short critical section and the coordinator never holds both locks
//!   at once, so the two parts can be worked on by different threads.
//! - **Lock striping.** [`ConcurrentLruCache`] and [`ConcurrentLfuCache`]
//!   partition the key space across independent segments with
//!   `hash(key) % segments`; operations only lock the segment that owns the key.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! Every `get()` updates internal state (recency order, frequency buckets,
//! ghost lists, capacity split), so a read is a write. `RwLock` would buy
//! nothing over `parking_lot::Mutex`, which has less bookkeeping.
//!
//! # Available Concurrent Caches
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConcurrentArcCache`] | ARC with one lock per sub-cache |
//! | [`ConcurrentLruCache`] | Sharded LRU cache |
//! | [`ConcurrentLfuCache`] | Sharded LFU cache with frequency aging |
//!
//! # Default Segment Count
//!
//! [`default_segment_count`] uses the available parallelism of the machine,
//! capped at 64 and never more than the cache capacity.
//!
//! # Example
//!
//! ```rust
//! use adaptive_cache_rs::concurrent::ConcurrentArcCache;
//! use adaptive_cache_rs::config::ArcCacheConfig;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentArcCache::init(ArcCacheConfig::new(1000), None));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 let key = format!("key_{}_{}", t, i);
//!                 cache.put(key.clone(), i);
//!                 let _ = cache.get(&key);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert!(cache.recent_len() > 0);
//! ```

mod arc;
mod lfu;
mod lru;

pub use self::arc::ConcurrentArcCache;
pub use self::lfu::ConcurrentLfuCache;
pub use self::lru::ConcurrentLruCache;

use core::num::NonZeroUsize;

/// Upper bound for [`default_segment_count`].
pub const MAX_DEFAULT_SEGMENTS: usize = 64;

/// Returns the default number of segments for a sharded cache of `capacity` entries.
///
/// This is the machine's available parallelism, clamped to
/// `1..=MAX_DEFAULT_SEGMENTS` and to `capacity` so that no segment is empty.
#[inline]
pub fn default_segment_count(capacity: usize) -> usize {
    let parallelism = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    parallelism
        .clamp(1, MAX_DEFAULT_SEGMENTS)
        .min(capacity.max(1))
}

/// Capacity of each segment when `capacity` is split `segments` ways.
///
/// Rounds up, so the combined capacity can exceed `capacity` by up to
/// `segments - 1`.
///
/// # Panics
///
/// Panics if `segments` is zero.
pub(crate) fn segment_capacity(capacity: NonZeroUsize, segments: usize) -> NonZeroUsize {
    assert!(segments > 0, "a sharded cache needs at least one segment");
    NonZeroUsize::new(capacity.get().div_ceil(segments)).unwrap_or(NonZeroUsize::MIN)
}
