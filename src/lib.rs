#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Which Engine?
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      Which cache should I use?                       │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                                                                      │
//! │  Do you know whether the workload is recency or frequency driven?    │
//! │                                                                      │
//! │        No / it changes ──────────▶ ┌──────────┐                      │
//! │                                    │   ARC    │                      │
//! │                                    └──────────┘                      │
//! │        Recency ──▶ one-off scans? ── Yes ──▶ ┌──────────┐            │
//! │                         │                    │  LRU-K   │            │
//! │                         No                   └──────────┘            │
//! │                         ▼                                            │
//! │                    ┌──────────┐                                      │
//! │                    │   LRU    │                                      │
//! │                    └──────────┘                                      │
//! │        Frequency ──────────────────▶ ┌──────────┐                    │
//! │                                      │   LFU    │ (with aging)       │
//! │                                      └──────────┘                    │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Engine | Description | Best Use Case |
//! |--------|-------------|---------------|
//! | [`ArcCache`] | Adaptive Replacement Cache | Unknown or shifting access patterns |
//! | [`LruCache`] | Least Recently Used | General purpose, recency-based access |
//! | [`LruKCache`] | LRU with K-access admission | Recency workloads polluted by one-off scans |
//! | [`LfuCache`] | Least Frequently Used with aging | Stable popularity patterns |
//!
//! Every engine implements [`CachePolicy`], so code can be written once
//! against `put` and `get` and run with any of them.
//!
//! ## Performance Characteristics
//!
//! | Engine | Get | Put | Remove | Scan Resist | Adapts |
//! |--------|-----|-----|--------|-------------|--------|
//! | ARC    | O(log F) | O(log F) | n/a | Good | Yes |
//! | LRU    | O(1) | O(1) | O(1) | Poor | N/A |
//! | LRU-K  | O(1) | O(1) | O(1) | Good | N/A |
//! | LFU    | O(log F) | O(log F) | O(log F) | Excellent | Aging |
//!
//! `F` is the number of distinct frequencies currently in use.
//!
//! ## Code Examples
//!
//! ### ARC (Adaptive Replacement Cache)
//!
//! Two sub-caches, one ordered by recency and one by frequency, each with a
//! ghost list of recently evicted keys. A ghost hit moves one slot of
//! capacity toward the side that would have kept the key.
//!
//! ```rust
//! use adaptive_cache_rs::ArcCache;
//! use adaptive_cache_rs::config::ArcCacheConfig;
//!
//! let mut cache = ArcCache::init(ArcCacheConfig::new(2), None);
//! cache.put(1, "a");
//! cache.put(2, "b");
//! cache.put(3, "c");           // 1 is evicted to the recency ghost list
//! assert_eq!(cache.get(&1), None);
//! assert_eq!(cache.recent_capacity(), 3);  // the ghost hit grew the recency side
//! assert_eq!(cache.frequent_capacity(), 1);
//! ```
//!
//! ### LRU (Least Recently Used)
//!
//! ```rust
//! use adaptive_cache_rs::LruCache;
//! use adaptive_cache_rs::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig::new(NonZeroUsize::new(2).unwrap());
//! let mut cache = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ### LRU-K
//!
//! A key is only admitted once it has been seen `k` times.
//!
//! ```rust
//! use adaptive_cache_rs::LruKCache;
//! use core::num::NonZeroUsize;
//!
//! let mut cache = LruKCache::new(NonZeroUsize::new(10).unwrap(), 2);
//! cache.put("once", 1);
//! assert!(cache.get(&"once").is_none());   // not admitted yet
//! cache.put("once", 1);
//! assert_eq!(cache.get(&"once"), Some(&1));
//! ```
//!
//! ### LFU (Least Frequently Used)
//!
//! ```rust
//! use adaptive_cache_rs::LfuCache;
//! use adaptive_cache_rs::config::LfuCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LfuCacheConfig::new(NonZeroUsize::new(2).unwrap());
//! let mut cache = LfuCache::init(config, None);
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//!
//! for _ in 0..10 { cache.get(&"popular"); }
//!
//! cache.put("new", 3);  // "rare" evicted (lowest frequency)
//! assert!(cache.get(&"popular").is_some());
//! ```
//!
//! ## Concurrent Caches
//!
//! Enable the `concurrent` feature for thread-safe versions:
//!
//! ```toml
//! [dependencies]
//! adaptive-cache-rs = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! [`ConcurrentArcCache`] keeps one lock per ARC sub-cache.
//! [`ConcurrentLruCache`] and [`ConcurrentLfuCache`] use lock striping:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │              ConcurrentLruCache (16 segments)                      │
//! │                                                                    │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐     ┌─────────┐               │
//! │  │Segment 0│ │Segment 1│ │Segment 2│ ... │Segment15│               │
//! │  │ [Mutex] │ │ [Mutex] │ │ [Mutex] │     │ [Mutex] │               │
//! │  └─────────┘ └─────────┘ └─────────┘     └─────────┘               │
//! │       ▲           ▲           ▲               ▲                    │
//! │  hash(k1)%16  hash(k2)%16  hash(k3)%16   hash(kN)%16               │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Logging
//!
//! Internal state changes (ghost hits, capacity transfers, promotions,
//! LFU aging passes, LRU-K admissions) are emitted as `tracing` events at
//! `trace` and `debug` level. Install any `tracing` subscriber to see them.
//!
//! ## Modules
//!
//! - [`arc`]: Adaptive Replacement Cache and its two sub-caches
//! - [`lru`]: Least Recently Used cache
//! - [`lru_k`]: LRU with K-access admission
//! - [`lfu`]: Least Frequently Used cache with frequency aging
//! - [`traits`]: The [`CachePolicy`] interface shared by all engines
//! - [`entry`]: The entry record stored in every list
//! - [`config`]: Configuration structures for all engines
//! - [`metrics`]: Counters for cache performance monitoring
//! - [`concurrent`]: Thread-safe caches (requires `concurrent` feature)

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

#[cfg(test)]
extern crate scoped_threadpool;

/// The `put`/`get` interface every engine implements.
pub mod traits;

/// Entry record holding key, value and access count.
pub mod entry;

/// Arena-backed doubly linked lists addressed by node handles.
///
/// Internal infrastructure shared by every engine.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Adaptive Replacement Cache (ARC).
///
/// Combines a recency sub-cache and a frequency sub-cache, each with a ghost
/// list, and shifts capacity between them based on ghost hits.
pub mod arc;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached.
pub mod lru;

/// LRU-K cache implementation.
///
/// An LRU cache that only admits a key after it has been seen K times.
pub mod lru_k;

/// Least Frequently Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least frequently used items
/// when capacity is reached, and periodically ages frequencies so old
/// favourites do not stay resident forever.
pub mod lfu;

/// Cache metrics system.
///
/// Each engine tracks its own counters and reports them through the
/// [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

/// Concurrent cache implementations.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use arc::ArcCache;
pub use entry::CacheEntry;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use lru_k::LruKCache;
pub use traits::CachePolicy;

#[cfg(feature = "concurrent")]
pub use concurrent::{ConcurrentArcCache, ConcurrentLfuCache, ConcurrentLruCache};
