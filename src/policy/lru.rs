//! LRU (Least Recently Used) cache replacement policy.
//!
//! A capacity-`k` LRU cache keeps the `k` most recently touched keys. Both
//! `read` hits and `write`s move the key to the front; when a new key
//! overflows the cache, the entry at the back is dropped.
//!
//! ## Architecture
//!
//! ```text
//!   LruCache<K, V>
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │  list: RecencyList<K, V>                                      │
//!   │                                                               │
//!   │   front (most recent)                       back (evict here) │
//!   │   [30] ◄──► [20] ◄──► [10]                                    │
//!   └───────────────────────────────────────────────────────────────┘
//!
//!   write(40) on a full cache:   [40] ◄──► [30] ◄──► [20]    10 dropped
//!   read(20):                    [20] ◄──► [40] ◄──► [30]
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                  |
//! |-------------|------|----------------------------------------|
//! | `read`      | O(1) | Promotes on hit                        |
//! | `write`     | O(1) | Update + promote, or insert + evict    |
//! | `peek`      | O(1) | No promotion                           |
//! | `contains`  | O(1) | No promotion                           |
//!
//! ## Thread Safety
//!
//! Not thread-safe. Wrap in external synchronization (one lock per call) to
//! share across threads.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.write(10, 100);
//! cache.write(20, 200);
//! cache.write(30, 300);
//!
//! assert_eq!(cache.read(&10), None);
//! assert_eq!(cache.front_key(), Some(&30));
//! assert_eq!(cache.back_key(), Some(&20));
//! ```

use std::hash::Hash;

use crate::ds::RecencyList;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CoreOnlyMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CoreOnlyMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{CoreCache, ReadOnlyCache};

/// Least-recently-used cache.
///
/// # Example
///
/// ```
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::{CoreCache, ReadOnlyCache};
///
/// let mut cache = LruCache::new(3);
/// cache.write("a", 1);
/// cache.write("b", 2);
/// cache.write("c", 3);
///
/// // "a" becomes most recent, so "b" is the next victim.
/// assert_eq!(cache.read(&"a"), Some(1));
/// cache.write("d", 4);
/// assert!(!cache.contains(&"b"));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    list: RecencyList<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreOnlyMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 is accepted; such a cache admits nothing.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            list: RecencyList::new(capacity),
            #[cfg(feature = "metrics")]
            metrics: CoreOnlyMetrics::default(),
        }
    }

    /// Returns the value for `key` without promoting it.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.list.peek(key)
    }

    /// Most recently used key.
    pub fn front_key(&self) -> Option<&K> {
        self.list.front().map(|(key, _)| key)
    }

    /// Least recently used key (next eviction victim).
    pub fn back_key(&self) -> Option<&K> {
        self.list.back().map(|(key, _)| key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.list.keys()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
    }
}

impl<K, V> ReadOnlyCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        self.list.contains(key)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn capacity(&self) -> usize {
        self.list.capacity()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn read(&mut self, key: &K) -> Option<V> {
        match self.list.read(key) {
            Some(value) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_read_hit();
                Some(value.clone())
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_read_miss();
                None
            },
        }
    }

    fn write(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_write_call();
            if self.list.contains(&key) {
                self.metrics.record_write_update();
            } else {
                self.metrics.record_write_new();
            }
        }

        let _evicted = self.list.write(key, value);
        #[cfg(feature = "metrics")]
        if _evicted.is_some() {
            self.metrics.record_evicted_entry();
        }
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.list.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CoreOnlyMetricsSnapshot {
        self.metrics
            .snapshot(self.list.len(), self.list.capacity())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreOnlyMetricsSnapshot> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CoreOnlyMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==============================================
    // Basic Operations
    // ==============================================

    mod basic_operations {
        use super::*;

        #[test]
        fn new_cache_is_empty() {
            let cache: LruCache<u64, u64> = LruCache::new(10);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 10);
            assert_eq!(cache.front_key(), None);
        }

        #[test]
        fn write_then_read() {
            let mut cache = LruCache::new(10);
            cache.write(1, "one");
            assert_eq!(cache.read(&1), Some("one"));
            assert_eq!(cache.read(&2), None);
        }

        #[test]
        fn write_updates_existing() {
            let mut cache = LruCache::new(2);
            cache.write(1, 10);
            cache.write(1, 11);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.read(&1), Some(11));
        }

        #[test]
        fn peek_and_contains_do_not_promote() {
            let mut cache = LruCache::new(2);
            cache.write(1, 10);
            cache.write(2, 20);
            assert_eq!(cache.peek(&1), Some(&10));
            assert!(cache.contains(&1));
            cache.write(3, 30);
            assert!(!cache.contains(&1));
        }

        #[test]
        fn clear_removes_everything() {
            let mut cache = LruCache::new(3);
            cache.write(1, 1);
            cache.write(2, 2);
            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.read(&1), None);
            cache.debug_validate_invariants();
        }
    }

    // ==============================================
    // Eviction Order
    // ==============================================

    mod eviction_order {
        use super::*;

        #[test]
        fn capacity_two_evicts_first_written() {
            let mut cache = LruCache::new(2);
            cache.write(10, 100);
            cache.write(20, 200);
            cache.write(30, 300);

            assert_eq!(cache.front_key(), Some(&30));
            assert_eq!(cache.back_key(), Some(&20));
            assert_eq!(cache.read(&10), None);
            cache.debug_validate_invariants();
        }

        #[test]
        fn k_plus_one_writes_keep_last_k() {
            let k = 5;
            let mut cache = LruCache::new(k);
            for key in 0..=k as u64 {
                cache.write(key, key);
            }
            assert_eq!(cache.read(&0), None);
            for key in 1..=k as u64 {
                assert_eq!(cache.read(&key), Some(key));
            }
        }

        #[test]
        fn read_protects_from_eviction() {
            let mut cache = LruCache::new(3);
            cache.write(1, 1);
            cache.write(2, 2);
            cache.write(3, 3);
            cache.read(&1);
            cache.write(4, 4);

            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
            assert_eq!(cache.keys(), vec![4, 1, 3]);
        }

        #[test]
        fn write_update_promotes() {
            let mut cache = LruCache::new(2);
            cache.write(1, 1);
            cache.write(2, 2);
            cache.write(1, 10);
            cache.write(3, 3);
            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
        }
    }

    // ==============================================
    // Edge Cases
    // ==============================================

    mod edge_cases {
        use super::*;

        #[test]
        fn single_capacity_cache() {
            let mut cache = LruCache::new(1);
            cache.write(1, 1);
            cache.write(2, 2);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.read(&1), None);
            assert_eq!(cache.read(&2), Some(2));
        }

        #[test]
        fn zero_capacity_admits_nothing() {
            let mut cache = LruCache::new(0);
            cache.write(1, 1);
            assert!(cache.is_empty());
            assert_eq!(cache.read(&1), None);
        }

        #[test]
        fn string_keys_and_values() {
            let mut cache = LruCache::new(2);
            cache.write("alpha".to_string(), "a".to_string());
            cache.write("beta".to_string(), "b".to_string());
            assert_eq!(cache.read(&"alpha".to_string()), Some("a".to_string()));
        }
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_reads_writes_and_evictions() {
        let mut cache = LruCache::new(1);
        cache.write(1, 1);
        cache.write(1, 2);
        cache.write(2, 2);
        cache.read(&1);
        cache.read(&2);

        let snap = cache.snapshot();
        assert_eq!(snap.write_calls, 3);
        assert_eq!(snap.write_new, 2);
        assert_eq!(snap.write_updates, 1);
        assert_eq!(snap.evicted_entries, 1);
        assert_eq!(snap.read_hits, 1);
        assert_eq!(snap.read_misses, 1);
    }
}
