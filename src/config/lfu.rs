//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! # Examples
//!
//! ```
//! use adaptive_cache_rs::config::LfuCacheConfig;
//! use adaptive_cache_rs::LfuCache;
//! use core::num::NonZeroUsize;
//!
//! // Default aging ceiling
//! let config = LfuCacheConfig::new(NonZeroUsize::new(100).unwrap());
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//!
//! // Aging disabled
//! let config = LfuCacheConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//!     max_average_frequency: 0,
//! };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Aging ceiling used by [`LfuCacheConfig::new`].
pub const DEFAULT_MAX_AVERAGE_FREQUENCY: usize = 10;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// LFU tracks the frequency of access for each item and evicts
/// the least frequently used items when the cache reaches capacity.
/// To stop long-lived entries from becoming unevictable, every frequency is
/// lowered by `max_average_frequency / 2` whenever the average frequency
/// across the cache exceeds `max_average_frequency`.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold
/// - `max_average_frequency`: Average frequency that triggers aging; 0 disables aging
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: NonZeroUsize,
    /// Average frequency above which all frequencies are aged
    pub max_average_frequency: usize,
}

impl LfuCacheConfig {
    /// Creates a config with the default aging ceiling.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            max_average_frequency: DEFAULT_MAX_AVERAGE_FREQUENCY,
        }
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .field("max_average_frequency", &self.max_average_frequency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_config_creation() {
        let config = LfuCacheConfig::new(NonZeroUsize::new(100).unwrap());
        assert_eq!(config.capacity.get(), 100);
        assert_eq!(config.max_average_frequency, 10);
    }

    #[test]
    fn test_lfu_config_without_aging() {
        let config = LfuCacheConfig {
            capacity: NonZeroUsize::new(100).unwrap(),
            max_average_frequency: 0,
        };
        assert_eq!(config.max_average_frequency, 0);
    }
}
