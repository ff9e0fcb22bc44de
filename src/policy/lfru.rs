//! LFRU (Least Frequently / Recently Used) composite cache policy.
//!
//! Same two-segment shape as SLRU, but the lower segment is frequency
//! ordered:
//!
//! - `privileged`: a recency list with ⌈n/2⌉ slots; entries that proved
//!   themselves with a read hit
//! - `unprivileged`: a frequency heap with ⌊n/2⌋ slots; every new key starts
//!   here and the least frequently used entry is dropped on overflow
//!
//! A read hit in unprivileged counts the access, then moves the entry to the
//! front of privileged. If privileged overflows, its least recent entry is
//! demoted back into unprivileged with the access count it had before it was
//! promoted, not reset to 1.
//!
//! ## Architecture
//!
//! ```text
//!   LfruCache<K, V>
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │   PRIVILEGED: RecencyList (⌈n/2⌉)     UNPRIVILEGED: FrequencyHeap  │
//!   │   ┌─────────────────────────┐         ┌──────────────────────────┐ │
//!   │   │ [4] ◄──► [1]      ──────┼─demote─►│   min ─► dropped on full │ │
//!   │   └─────────────────────────┘         │   [3 f=1] [2 f=2]        │ │
//!   │              ▲                        └────────────┬─────────────┘ │
//!   │              └─────────── read hit ────────────────┘               │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe. Wrap in external synchronization to share.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lfru::LfruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LfruCache::new(4);
//! cache.write(1, 10);
//! assert!(cache.in_unprivileged(&1));
//!
//! assert_eq!(cache.read(&1), Some(10));
//! assert!(cache.in_privileged(&1));
//! ```

use std::hash::Hash;

use crate::ds::{FrequencyHeap, RecencyList};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SegmentMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SegmentMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider, SegmentMetricsRecorder};
use crate::traits::{CoreCache, ReadOnlyCache};

/// Recency-privileged, frequency-unprivileged two-segment cache.
#[derive(Debug)]
pub struct LfruCache<K, V> {
    privileged: RecencyList<K, V>,
    unprivileged: FrequencyHeap<K, V>,
    #[cfg(feature = "metrics")]
    metrics: SegmentMetrics,
}

impl<K, V> LfruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LFRU cache with `capacity` total slots.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            privileged: RecencyList::new(capacity.div_ceil(2)),
            unprivileged: FrequencyHeap::new(capacity / 2),
            #[cfg(feature = "metrics")]
            metrics: SegmentMetrics::default(),
        }
    }

    /// Returns the value for `key` from either segment without side effects.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.privileged
            .peek(key)
            .or_else(|| self.unprivileged.peek(key))
    }

    /// Access count carried by `key`, whichever segment it is in.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.privileged
            .entry(key)
            .map(|entry| entry.frequency)
            .or_else(|| self.unprivileged.frequency(key))
    }

    pub fn in_privileged(&self, key: &K) -> bool {
        self.privileged.contains(key)
    }

    pub fn in_unprivileged(&self, key: &K) -> bool {
        self.unprivileged.contains(key)
    }

    pub fn privileged_len(&self) -> usize {
        self.privileged.len()
    }

    pub fn unprivileged_len(&self) -> usize {
        self.unprivileged.len()
    }

    /// Privileged keys, most recent first.
    pub fn privileged_keys(&self) -> Vec<K> {
        self.privileged.keys()
    }

    /// Checks that the segments are disjoint and within their capacities.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.privileged.len() > self.privileged.capacity() {
            return Err(InvariantError::new(format!(
                "privileged holds {} entries, capacity {}",
                self.privileged.len(),
                self.privileged.capacity()
            )));
        }
        if self.unprivileged.len() > self.unprivileged.capacity() {
            return Err(InvariantError::new(format!(
                "unprivileged holds {} entries, capacity {}",
                self.unprivileged.len(),
                self.unprivileged.capacity()
            )));
        }
        if self
            .privileged
            .iter()
            .any(|(key, _)| self.unprivileged.contains(key))
        {
            return Err(InvariantError::new("a key is resident in both segments"));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.privileged.debug_validate_invariants();
        self.unprivileged.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }
}

impl<K, V> ReadOnlyCache<K, V> for LfruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        self.privileged.contains(key) || self.unprivileged.contains(key)
    }

    fn len(&self) -> usize {
        self.privileged.len() + self.unprivileged.len()
    }

    fn capacity(&self) -> usize {
        self.privileged.capacity() + self.unprivileged.capacity()
    }
}

impl<K, V> CoreCache<K, V> for LfruCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn read(&mut self, key: &K) -> Option<V> {
        if let Some(value) = self.privileged.read(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_read_hit();
            return Some(value.clone());
        }

        if self.unprivileged.increment(key).is_none() {
            #[cfg(feature = "metrics")]
            self.metrics.record_read_miss();
            return None;
        }
        let entry = self.unprivileged.remove(key)?;

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_read_hit();
            self.metrics.record_promotion();
        }

        let value = entry.value.clone();
        if let Some(demoted) = self.privileged.push_entry(entry) {
            #[cfg(feature = "metrics")]
            self.metrics.record_demotion();
            let _dropped = self.unprivileged.push_entry(demoted);
            #[cfg(feature = "metrics")]
            if _dropped.is_some() {
                self.metrics.record_evicted_entry();
            }
        }
        Some(value)
    }

    fn write(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_write_call();

        if self.privileged.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_write_update();
            self.privileged.write(key, value);
            return;
        }

        #[cfg(feature = "metrics")]
        if self.unprivileged.contains(&key) {
            self.metrics.record_write_update();
        } else {
            self.metrics.record_write_new();
        }

        let _evicted = self.unprivileged.write(key, value);
        #[cfg(feature = "metrics")]
        if _evicted.is_some() {
            self.metrics.record_evicted_entry();
        }
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.privileged.clear();
        self.unprivileged.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> SegmentMetricsSnapshot {
        self.metrics.snapshot(
            self.privileged.len(),
            self.unprivileged.len(),
            self.privileged.capacity() + self.unprivileged.capacity(),
        )
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<SegmentMetricsSnapshot> for LfruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> SegmentMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_operations {
        use super::*;

        #[test]
        fn new_cache_splits_capacity() {
            let cache: LfruCache<u64, u64> = LfruCache::new(5);
            assert_eq!(cache.capacity(), 5);
            assert_eq!(cache.privileged.capacity(), 3);
            assert_eq!(cache.unprivileged.capacity(), 2);
        }

        #[test]
        fn first_writes_land_in_unprivileged() {
            let mut cache = LfruCache::new(4);
            cache.write(1, 10);
            cache.write(2, 20);
            assert_eq!(cache.privileged_len(), 0);
            assert_eq!(cache.unprivileged_len(), 2);
            assert_eq!(cache.frequency(&1), Some(1));
            assert_eq!(cache.frequency(&2), Some(1));
        }

        #[test]
        fn read_promotes_one_entry() {
            let mut cache = LfruCache::new(4);
            cache.write(1, 10);
            cache.write(2, 20);
            assert_eq!(cache.read(&2), Some(20));

            assert_eq!(cache.privileged_keys(), vec![2]);
            assert!(cache.in_unprivileged(&1));
            assert_eq!(cache.frequency(&1), Some(1));
            cache.debug_validate_invariants();
        }

        #[test]
        fn clear_empties_both_segments() {
            let mut cache = LfruCache::new(4);
            cache.write(1, 1);
            cache.read(&1);
            cache.write(2, 2);
            cache.clear();
            assert!(cache.is_empty());
            cache.debug_validate_invariants();
        }
    }

    mod segment_behavior {
        use super::*;

        #[test]
        fn write_update_in_unprivileged_counts_access() {
            let mut cache = LfruCache::new(4);
            cache.write(1, 10);
            cache.write(1, 11);
            assert!(cache.in_unprivileged(&1));
            assert_eq!(cache.frequency(&1), Some(2));
            assert_eq!(cache.peek(&1), Some(&11));
        }

        #[test]
        fn write_update_in_privileged_stays() {
            let mut cache = LfruCache::new(4);
            cache.write(1, 10);
            cache.read(&1);
            cache.write(1, 11);
            assert!(cache.in_privileged(&1));
            assert_eq!(cache.read(&1), Some(11));
        }

        #[test]
        fn demotion_keeps_prior_frequency() {
            let mut cache = LfruCache::new(2);
            cache.write(1, 10);
            cache.read(&1); // count 2, promoted
            assert!(cache.in_privileged(&1));

            cache.write(2, 20);
            cache.read(&2); // promotes 2, demotes 1
            assert!(cache.in_privileged(&2));
            assert!(cache.in_unprivileged(&1));
            assert_eq!(cache.frequency(&1), Some(2));
            cache.debug_validate_invariants();
        }

        #[test]
        fn unprivileged_drops_least_frequent() {
            let mut cache = LfruCache::new(4);
            cache.write(1, 10);
            cache.write(2, 20);
            cache.write(3, 30);
            // key 1 is the oldest of the frequency-1 entries
            assert!(!cache.contains(&1));
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
        }

        #[test]
        fn capacity_four_promotions_and_demotions() {
            let mut cache = LfruCache::new(4);
            cache.write(1, 10);
            cache.write(2, 20);
            cache.write(3, 30);
            cache.read(&1);
            cache.read(&3);
            cache.write(1, 10);
            cache.write(4, 40);
            assert_eq!(cache.read(&1), Some(10));
            assert!(cache.in_privileged(&1));
            assert!(cache.in_privileged(&3));
            cache.debug_validate_invariants();
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn single_capacity_admits_nothing() {
            let mut cache = LfruCache::new(1);
            cache.write(1, 1);
            assert!(cache.is_empty());
        }

        #[test]
        fn zero_capacity_admits_nothing() {
            let mut cache = LfruCache::new(0);
            cache.write(1, 1);
            assert_eq!(cache.read(&1), None);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: segments stay disjoint and bounded
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_segments_disjoint_and_bounded(
                capacity in 0usize..8,
                ops in prop::collection::vec((any::<bool>(), 0u32..16), 0..200)
            ) {
                let mut cache = LfruCache::new(capacity);
                for (is_read, key) in ops {
                    if is_read {
                        cache.read(&key);
                    } else {
                        cache.write(key, key);
                    }
                    prop_assert!(cache.check_invariants().is_ok());
                    prop_assert!(cache.len() <= capacity);
                }
            }
        }
    }
}
