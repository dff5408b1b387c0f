//! Configuration for the Adaptive Replacement Cache (ARC).
//!
//! # Examples
//!
//! ```
//! use adaptive_cache_rs::config::ArcCacheConfig;
//! use adaptive_cache_rs::ArcCache;
//!
//! // Default promotion threshold of 2
//! let config = ArcCacheConfig::new(100);
//! let cache: ArcCache<String, i32> = ArcCache::init(config, None);
//!
//! // Entries must be hit three times before they are copied to the frequency part
//! let config = ArcCacheConfig {
//!     capacity: 100,
//!     transform_threshold: 3,
//! };
//! let cache: ArcCache<String, i32> = ArcCache::init(config, None);
//! ```

use core::fmt;

/// Promotion threshold used by [`ArcCacheConfig::new`].
pub const DEFAULT_TRANSFORM_THRESHOLD: usize = 2;

/// Configuration for an ARC cache.
///
/// Both sub-caches start with `capacity` slots and a ghost list of the same
/// size, so a fresh cache advertises `2 * capacity` in total. A capacity of 0
/// is accepted and yields a cache that never stores anything until a capacity
/// transfer grows one side.
///
/// # Fields
///
/// - `capacity`: Initial capacity of each sub-cache and the fixed size of each ghost list
/// - `transform_threshold`: Number of recency hits after which an entry is copied into
///   the frequency sub-cache
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ArcCacheConfig {
    /// Initial capacity of each sub-cache
    pub capacity: usize,
    /// Access count at which a recency entry is promoted
    pub transform_threshold: usize,
}

impl ArcCacheConfig {
    /// Creates a config with the default promotion threshold.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            transform_threshold: DEFAULT_TRANSFORM_THRESHOLD,
        }
    }
}

impl fmt::Debug for ArcCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCacheConfig")
            .field("capacity", &self.capacity)
            .field("transform_threshold", &self.transform_threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_config_defaults() {
        let config = ArcCacheConfig::new(10);
        assert_eq!(config.capacity, 10);
        assert_eq!(config.transform_threshold, 2);
    }

    #[test]
    fn test_arc_config_zero_capacity() {
        let config = ArcCacheConfig {
            capacity: 0,
            transform_threshold: 5,
        };
        assert_eq!(config.capacity, 0);
        assert_eq!(config.transform_threshold, 5);
    }
}
