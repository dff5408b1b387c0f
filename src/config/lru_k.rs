//! Configuration for the LRU-K cache.
//!
//! # Examples
//!
//! ```
//! use adaptive_cache_rs::config::LruKCacheConfig;
//! use adaptive_cache_rs::LruKCache;
//! use core::num::NonZeroUsize;
//!
//! // Admit a key on its second access, remember up to 500 candidates
//! let config = LruKCacheConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//!     history_capacity: NonZeroUsize::new(500).unwrap(),
//!     k: 2,
//! };
//! let cache: LruKCache<String, i32> = LruKCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU-K cache.
///
/// A key is only admitted into the main LRU list once it has been seen `k`
/// times. Accesses to keys that are not yet admitted are counted in a
/// separate LRU history of `history_capacity` entries.
///
/// # Fields
///
/// - `capacity`: Maximum number of admitted entries
/// - `history_capacity`: Maximum number of keys whose access counts are remembered
/// - `k`: Accesses required before admission. Values of 0 and 1 admit on first put.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruKCacheConfig {
    /// Maximum number of admitted entries
    pub capacity: NonZeroUsize,
    /// Maximum number of remembered access counts
    pub history_capacity: NonZeroUsize,
    /// Accesses required before admission
    pub k: usize,
}

impl fmt::Debug for LruKCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruKCacheConfig")
            .field("capacity", &self.capacity)
            .field("history_capacity", &self.history_capacity)
            .field("k", &self.k)
            .finish()
    }
}
