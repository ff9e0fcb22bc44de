//! LFU (Least Frequently Used) cache replacement policy.
//!
//! Each resident key carries an access count. `write` of a new key starts it
//! at 1; every `read` hit and every update through `write` adds one. When a
//! new key arrives at a full cache, the key with the smallest count is
//! evicted first.
//!
//! ## Architecture
//!
//! ```text
//!   LfuCache<K, V>
//!   ┌────────────────────────────────────────────────────────────┐
//!   │  heap: FrequencyHeap<K, V>   (indexed min-heap)            │
//!   │                                                            │
//!   │            [k=2 f=1]            ◄── root = next victim     │
//!   │           /         \                                      │
//!   │     [k=1 f=2]     [k=5 f=3]                                │
//!   └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tie-Breaking
//!
//! Among keys with the same count, the one touched (inserted, read or
//! updated) least recently is evicted. The rule is deterministic: the same
//! operation sequence always evicts the same key.
//!
//! ## Operations
//!
//! | Operation   | Time     | Notes                                |
//! |-------------|----------|--------------------------------------|
//! | `read`      | O(log n) | Increment + sift                     |
//! | `write`     | O(log n) | Update/increment, or evict + insert  |
//! | `frequency` | O(1)     | No side effects                      |
//!
//! ## Thread Safety
//!
//! Not thread-safe. Wrap in external synchronization to share.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.write(1, 10);
//! cache.write(2, 20);
//! cache.read(&1);        // count(1) = 2
//! cache.write(3, 30);    // evicts 2, the lowest count
//!
//! assert_eq!(cache.read(&2), None);
//! assert_eq!(cache.read(&1), Some(10));
//! ```

use std::hash::Hash;

use crate::ds::FrequencyHeap;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CoreOnlyMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CoreOnlyMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{CoreCache, ReadOnlyCache};

/// Least-frequently-used cache backed by an indexed min-heap.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    heap: FrequencyHeap<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreOnlyMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LFU cache holding at most `capacity` entries.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: FrequencyHeap::new(capacity),
            #[cfg(feature = "metrics")]
            metrics: CoreOnlyMetrics::default(),
        }
    }

    /// Returns the value for `key` without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.heap.peek(key)
    }

    /// Returns the access count of `key`.
    ///
    /// ```
    /// use evictkit::policy::lfu::LfuCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = LfuCache::new(4);
    /// cache.write("a", 1);
    /// cache.read(&"a");
    /// assert_eq!(cache.frequency(&"a"), Some(2));
    /// assert_eq!(cache.frequency(&"b"), None);
    /// ```
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.heap.frequency(key)
    }

    /// Key that the next insert into a full cache would evict.
    pub fn victim_key(&self) -> Option<&K> {
        self.heap.peek_min().map(|(key, _)| key)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.heap.debug_validate_invariants();
    }
}

impl<K, V> ReadOnlyCache<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        self.heap.contains(key)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn capacity(&self) -> usize {
        self.heap.capacity()
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn read(&mut self, key: &K) -> Option<V> {
        match self.heap.read(key) {
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
            if self.heap.contains(&key) {
                self.metrics.record_write_update();
            } else {
                self.metrics.record_write_new();
            }
        }

        let _evicted = self.heap.write(key, value);
        #[cfg(feature = "metrics")]
        if _evicted.is_some() {
            self.metrics.record_evicted_entry();
        }
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.heap.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CoreOnlyMetricsSnapshot {
        self.metrics
            .snapshot(self.heap.len(), self.heap.capacity())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreOnlyMetricsSnapshot> for LfuCache<K, V>
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

    #[test]
    fn new_cache_is_empty() {
        let cache: LfuCache<u64, u64> = LfuCache::new(2);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.victim_key(), None);
    }

    #[test]
    fn evicts_lowest_count() {
        let mut cache = LfuCache::new(2);
        cache.write(1, 10);
        cache.write(2, 20);
        assert_eq!(cache.read(&1), Some(10));
        cache.write(3, 30);

        assert_eq!(cache.read(&2), None);
        assert!(cache.contains(&1));
        assert!(cache.contains(&3));
        cache.debug_validate_invariants();
    }

    #[test]
    fn write_update_counts_as_access() {
        let mut cache = LfuCache::new(2);
        cache.write(1, 10);
        cache.write(2, 20);
        cache.write(2, 21);
        assert_eq!(cache.frequency(&2), Some(2));
        cache.write(3, 30);
        assert!(!cache.contains(&1));
        assert_eq!(cache.peek(&2), Some(&21));
    }

    #[test]
    fn equal_counts_evict_least_recently_touched() {
        let mut cache = LfuCache::new(3);
        cache.write(1, 1);
        cache.write(2, 2);
        cache.write(3, 3);
        assert_eq!(cache.victim_key(), Some(&1));

        cache.read(&1);
        cache.read(&2);
        cache.read(&3);
        cache.read(&1);
        cache.read(&3);
        // counts: 1→3, 2→2, 3→3
        cache.write(4, 4);
        assert!(!cache.contains(&2));
        assert!(cache.contains(&4));
    }

    #[test]
    fn new_entry_is_next_victim_after_hot_keys() {
        let mut cache = LfuCache::new(2);
        cache.write(1, 1);
        cache.read(&1);
        cache.read(&1);
        cache.write(2, 2);
        cache.write(3, 3);
        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn peek_does_not_count() {
        let mut cache = LfuCache::new(2);
        cache.write(1, 1);
        assert_eq!(cache.peek(&1), Some(&1));
        assert_eq!(cache.frequency(&1), Some(1));
    }

    #[test]
    fn zero_capacity_admits_nothing() {
        let mut cache = LfuCache::new(0);
        cache.write(1, 1);
        assert!(cache.is_empty());
        assert_eq!(cache.read(&1), None);
    }

    #[test]
    fn clear_resets_counts() {
        let mut cache = LfuCache::new(2);
        cache.write(1, 1);
        cache.read(&1);
        cache.clear();
        assert!(cache.is_empty());
        cache.write(1, 1);
        assert_eq!(cache.frequency(&1), Some(1));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: an evicted key always had the minimum count
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_evicts_minimum_count(
                ops in prop::collection::vec((any::<bool>(), 0u32..16), 1..200)
            ) {
                let mut cache = LfuCache::new(4);
                for (is_read, key) in ops {
                    if is_read {
                        cache.read(&key);
                    } else if cache.contains(&key) || cache.len() < 4 {
                        cache.write(key, key);
                    } else {
                        let min = (0u32..16)
                            .filter_map(|k| cache.frequency(&k))
                            .min()
                            .unwrap();
                        let victim = *cache.victim_key().unwrap();
                        prop_assert_eq!(cache.frequency(&victim), Some(min));
                        cache.write(key, key);
                        prop_assert!(!cache.contains(&victim));
                    }
                    cache.debug_validate_invariants();
                    prop_assert!(cache.len() <= 4);
                }
            }
        }
    }
}
