//! Cache Entry Type
//!
//! `CacheEntry<K, V>` is the node record shared by every engine in the crate:
//! a key, a value and an access counter. The links that place an entry in a
//! list are not part of the record; they belong to the arena slot holding it
//! (see the `list` module), so an entry can be relinked from one list to
//! another without being copied.
//!
//! # The access counter
//!
//! The counter starts at 1 and its meaning depends on the structure that owns
//! the entry:
//!
//! | Owner | Meaning of `access_count` |
//! |-------|---------------------------|
//! | ARC recency part | hits since insertion; compared with the promotion threshold |
//! | ARC frequency part, `LfuCache` | the frequency bucket the entry belongs to |
//! | `LruCache` | hits since insertion (informational) |
//!
//! When the ARC recency part moves an entry to its ghost list the counter is
//! reset to 1.

use core::fmt;

/// Node record holding key, value and access count.
///
/// # Examples
///
/// ```
/// use adaptive_cache_rs::entry::CacheEntry;
///
/// let mut entry = CacheEntry::new("key", 42);
/// assert_eq!(entry.access_count(), 1);
/// assert_eq!(entry.record_access(), 2);
/// entry.reset_access_count();
/// assert_eq!(entry.access_count(), 1);
/// ```
pub struct CacheEntry<K, V> {
    /// The cached key
    pub key: K,

    /// The cached value. Stale while the entry sits on a ghost list.
    pub value: V,

    access_count: usize,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates an entry with an access count of 1.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            access_count: 1,
        }
    }

    /// Returns the current access count.
    #[inline]
    pub fn access_count(&self) -> usize {
        self.access_count
    }

    /// Increments the access count and returns the new value.
    #[inline]
    pub fn record_access(&mut self) -> usize {
        self.access_count += 1;
        self.access_count
    }

    /// Resets the access count to 1.
    #[inline]
    pub fn reset_access_count(&mut self) {
        self.access_count = 1;
    }

    /// Overwrites the access count. Values below 1 are raised to 1.
    #[inline]
    pub fn set_access_count(&mut self, count: usize) {
        self.access_count = count.max(1);
    }
}

impl<K: Clone, V: Clone> Clone for CacheEntry<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            access_count: self.access_count,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("access_count", &self.access_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::format;
    use alloc::vec;

    #[test]
    fn test_new_entry() {
        let entry = CacheEntry::new("key", 42);
        assert_eq!(entry.key, "key");
        assert_eq!(entry.value, 42);
        assert_eq!(entry.access_count(), 1);
    }

    #[test]
    fn test_record_access() {
        let mut entry = CacheEntry::new("key", 42);
        assert_eq!(entry.record_access(), 2);
        assert_eq!(entry.record_access(), 3);
        assert_eq!(entry.access_count(), 3);
    }

    #[test]
    fn test_reset_and_set() {
        let mut entry = CacheEntry::new("key", 42);
        entry.record_access();
        entry.reset_access_count();
        assert_eq!(entry.access_count(), 1);

        entry.set_access_count(9);
        assert_eq!(entry.access_count(), 9);
        entry.set_access_count(0);
        assert_eq!(entry.access_count(), 1);
    }

    #[test]
    fn test_clone_entry() {
        let mut entry = CacheEntry::new("key", vec![1, 2, 3]);
        entry.record_access();
        let cloned = entry.clone();
        assert_eq!(cloned.key, entry.key);
        assert_eq!(cloned.value, entry.value);
        assert_eq!(cloned.access_count(), 2);
    }

    #[test]
    fn test_debug_impl() {
        let entry = CacheEntry::new("key", 42);
        let debug_str = format!("{:?}", entry);
        assert!(debug_str.contains("CacheEntry"));
        assert!(debug_str.contains("key"));
        assert!(debug_str.contains("42"));
        assert!(debug_str.contains("access_count"));
    }
}
