//! MRU (Most Recently Used) cache replacement policy.
//!
//! The inverse of LRU: when a new key arrives at a full cache, the entry at
//! the **front** (the one touched most recently) is dropped. A successful
//! `read` goes one step further and consumes the entry: the key is promoted
//! to the front and immediately evicted, so it cannot be read again until it
//! is rewritten.
//!
//! ## Architecture
//!
//! ```text
//!   MruCache<K, V>
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │  list: RecencyList<K, V>                                      │
//!   │                                                               │
//!   │   front (EVICT FROM HERE)                      back (kept)    │
//!   │   [30] ◄──► [20] ◄──► [10]                                    │
//!   └───────────────────────────────────────────────────────────────┘
//!
//!   write(40) on a full cache:   30 dropped, then [40] ◄──► [20] ◄──► [10]
//!   read(20) → Some(20):         [40] ◄──► [10]        20 consumed
//!   read(20) → None
//! ```
//!
//! ## Use Cases
//!
//! - Cyclic scans larger than the cache, where the item just used is the one
//!   least likely to be needed again soon
//!
//! ## Thread Safety
//!
//! Not thread-safe; `read` removes entries, so callers sharing a cache must
//! serialise every call.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::mru::MruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = MruCache::new(4);
//! cache.write(7, 70);
//! assert_eq!(cache.read(&7), Some(70));
//! assert_eq!(cache.read(&7), None);
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

/// Most-recently-used cache with self-consuming reads.
#[derive(Debug)]
pub struct MruCache<K, V> {
    list: RecencyList<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreOnlyMetrics,
}

impl<K, V> MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an MRU cache holding at most `capacity` entries.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            list: RecencyList::new(capacity),
            #[cfg(feature = "metrics")]
            metrics: CoreOnlyMetrics::default(),
        }
    }

    /// Returns the value for `key` without consuming it.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.list.peek(key)
    }

    /// Most recently used key (next eviction victim).
    pub fn front_key(&self) -> Option<&K> {
        self.list.front().map(|(key, _)| key)
    }

    /// Least recently used key.
    pub fn back_key(&self) -> Option<&K> {
        self.list.back().map(|(key, _)| key)
    }

    pub fn keys(&self) -> Vec<K> {
        self.list.keys()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
    }
}

impl<K, V> ReadOnlyCache<K, V> for MruCache<K, V>
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

impl<K, V> CoreCache<K, V> for MruCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Returns the value and evicts the entry.
    ///
    /// Promote-then-evict-front collapses to removing the entry wherever it
    /// sits.
    fn read(&mut self, key: &K) -> Option<V> {
        match self.list.remove(key) {
            Some(entry) => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_read_hit();
                    self.metrics.record_evicted_entry();
                }
                Some(entry.value)
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
        self.metrics.record_write_call();

        if self.list.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_write_update();
            self.list.write(key, value);
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_write_new();

        if self.list.capacity() == 0 {
            return;
        }
        if self.list.len() >= self.list.capacity() {
            let _evicted = self.list.pop_front();
            #[cfg(feature = "metrics")]
            if _evicted.is_some() {
                self.metrics.record_evicted_entry();
            }
        }
        self.list.write(key, value);
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.list.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CoreOnlyMetricsSnapshot {
        self.metrics
            .snapshot(self.list.len(), self.list.capacity())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreOnlyMetricsSnapshot> for MruCache<K, V>
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
            let cache: MruCache<u64, u64> = MruCache::new(4);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 4);
        }

        #[test]
        fn read_missing_key_is_miss() {
            let mut cache: MruCache<u64, u64> = MruCache::new(4);
            assert_eq!(cache.read(&1), None);
        }

        #[test]
        fn write_existing_updates_and_promotes() {
            let mut cache = MruCache::new(3);
            cache.write(1, 10);
            cache.write(2, 20);
            cache.write(1, 11);
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.front_key(), Some(&1));
            assert_eq!(cache.peek(&1), Some(&11));
        }

        #[test]
        fn clear_removes_everything() {
            let mut cache = MruCache::new(3);
            cache.write(1, 1);
            cache.clear();
            assert!(cache.is_empty());
            cache.debug_validate_invariants();
        }
    }

    // ==============================================
    // Self-Consuming Reads
    // ==============================================

    mod self_consuming_reads {
        use super::*;

        #[test]
        fn second_read_misses() {
            let mut cache = MruCache::new(4);
            for key in 0..4u64 {
                cache.write(key, key * 10);
            }
            for key in 0..4u64 {
                assert_eq!(cache.read(&key), Some(key * 10));
                assert_eq!(cache.read(&key), None);
            }
            assert!(cache.is_empty());
        }

        #[test]
        fn read_of_tail_relinks_list() {
            let mut cache = MruCache::new(3);
            cache.write(1, 1);
            cache.write(2, 2);
            cache.write(3, 3);
            assert_eq!(cache.read(&1), Some(1));
            assert_eq!(cache.back_key(), Some(&2));
            assert_eq!(cache.front_key(), Some(&3));
            cache.debug_validate_invariants();
        }

        #[test]
        fn read_of_middle_relinks_list() {
            let mut cache = MruCache::new(3);
            cache.write(1, 1);
            cache.write(2, 2);
            cache.write(3, 3);
            cache.read(&2);
            assert_eq!(cache.keys(), vec![3, 1]);
            cache.debug_validate_invariants();
        }

        #[test]
        fn rewrite_after_consumption_is_readable() {
            let mut cache = MruCache::new(2);
            cache.write(5, 50);
            cache.read(&5);
            cache.write(5, 51);
            assert_eq!(cache.read(&5), Some(51));
        }
    }

    // ==============================================
    // Eviction
    // ==============================================

    mod eviction {
        use super::*;

        #[test]
        fn full_cache_evicts_most_recent() {
            let mut cache = MruCache::new(3);
            cache.write(1, 1);
            cache.write(2, 2);
            cache.write(3, 3);
            cache.write(4, 4);

            assert!(!cache.contains(&3));
            assert_eq!(cache.keys(), vec![4, 2, 1]);
            cache.debug_validate_invariants();
        }

        #[test]
        fn update_then_insert_evicts_updated_key() {
            let mut cache = MruCache::new(2);
            cache.write(1, 1);
            cache.write(2, 2);
            cache.write(1, 10);
            cache.write(3, 3);
            assert!(!cache.contains(&1));
            assert!(cache.contains(&2));
        }

        #[test]
        fn single_capacity_replaces_entry() {
            let mut cache = MruCache::new(1);
            cache.write(1, 1);
            cache.write(2, 2);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.read(&2), Some(2));
        }

        #[test]
        fn zero_capacity_admits_nothing() {
            let mut cache = MruCache::new(0);
            cache.write(1, 1);
            assert!(cache.is_empty());
            assert_eq!(cache.read(&1), None);
        }
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_count_consumed_reads_as_evictions() {
        let mut cache = MruCache::new(2);
        cache.write(1, 1);
        cache.read(&1);
        cache.read(&1);
        let snap = cache.snapshot();
        assert_eq!(snap.read_hits, 1);
        assert_eq!(snap.read_misses, 1);
        assert_eq!(snap.evicted_entries, 1);
    }
}
