//! Cache Configuration Module
//!
//! This module provides configuration structures for all cache engines.
//! Each engine has its own dedicated configuration struct with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **Shortcuts**: `new(capacity)` fills in the usual defaults where there are any
//!
//! # Single-Threaded Cache Configs
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `ArcCacheConfig` | [`ArcCache`](crate::ArcCache) | Adaptive Replacement Cache |
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Least Recently Used |
//! | `LruKCacheConfig` | [`LruKCache`](crate::LruKCache) | LRU with K-access admission |
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) | Least Frequently Used with aging |
//!
//! # Concurrent Cache Configs (requires `concurrent` feature)
//!
//! The sharded caches use `ConcurrentCacheConfig<C>` around a base config:
//!
//! | Type Alias | Base Config | Description |
//! |------------|-------------|-------------|
//! | `ConcurrentLruCacheConfig` | `LruCacheConfig` | Thread-safe sharded LRU |
//! | `ConcurrentLfuCacheConfig` | `LfuCacheConfig` | Thread-safe sharded LFU |
//!
//! `ConcurrentArcCache` is not sharded and takes a plain `ArcCacheConfig`.
//!
//! # Examples
//!
//! ```
//! use adaptive_cache_rs::config::ArcCacheConfig;
//! use adaptive_cache_rs::ArcCache;
//!
//! let config = ArcCacheConfig {
//!     capacity: 1000,
//!     transform_threshold: 2,
//! };
//! let cache: ArcCache<String, i32> = ArcCache::init(config, None);
//! assert_eq!(cache.total_capacity(), 2000);
//! ```

pub mod arc;
pub mod lfu;
pub mod lru;
pub mod lru_k;

pub use arc::ArcCacheConfig;
pub use lfu::LfuCacheConfig;
pub use lru::LruCacheConfig;
pub use lru_k::LruKCacheConfig;

/// Generic configuration wrapper for sharded concurrent caches.
///
/// Wraps a base cache configuration and adds the `segments` field
/// for controlling the number of independent segments used for sharding.
///
/// # Fields
///
/// - `base`: The single-threaded configuration. Its capacity applies to the
///   whole cache and is divided across segments, rounding up.
/// - `segments`: Number of independent segments (more = less contention).
///   Must be non-zero.
///
/// # Example
///
/// ```
/// use adaptive_cache_rs::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
/// use core::num::NonZeroUsize;
///
/// let config: ConcurrentLruCacheConfig = ConcurrentCacheConfig {
///     base: LruCacheConfig::new(NonZeroUsize::new(10_000).unwrap()),
///     segments: 16,
/// };
/// assert_eq!(config.segments, 16);
/// ```
#[cfg(feature = "concurrent")]
#[derive(Clone, Copy)]
pub struct ConcurrentCacheConfig<C> {
    /// Base configuration for the underlying cache engine
    pub base: C,
    /// Number of segments for sharding
    pub segments: usize,
}

#[cfg(feature = "concurrent")]
impl<C: core::fmt::Debug> core::fmt::Debug for ConcurrentCacheConfig<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentCacheConfig")
            .field("base", &self.base)
            .field("segments", &self.segments)
            .finish()
    }
}

#[cfg(feature = "concurrent")]
impl ConcurrentCacheConfig<LruCacheConfig> {
    /// Wraps `base` with the default segment count for this machine.
    pub fn new(base: LruCacheConfig) -> Self {
        Self {
            segments: crate::concurrent::default_segment_count(base.capacity.get()),
            base,
        }
    }
}

#[cfg(feature = "concurrent")]
impl ConcurrentCacheConfig<LfuCacheConfig> {
    /// Wraps `base` with the default segment count for this machine.
    pub fn new(base: LfuCacheConfig) -> Self {
        Self {
            segments: crate::concurrent::default_segment_count(base.capacity.get()),
            base,
        }
    }
}

#[cfg(feature = "concurrent")]
/// Configuration for a concurrent LRU cache.
/// Type alias for `ConcurrentCacheConfig<LruCacheConfig>`.
pub type ConcurrentLruCacheConfig = ConcurrentCacheConfig<LruCacheConfig>;

#[cfg(feature = "concurrent")]
/// Configuration for a concurrent LFU cache.
/// Type alias for `ConcurrentCacheConfig<LfuCacheConfig>`.
pub type ConcurrentLfuCacheConfig = ConcurrentCacheConfig<LfuCacheConfig>;
