//! Segmented LRU (SLRU) cache replacement policy.
//!
//! Two LRU segments split the capacity: `protected` gets ⌈n/2⌉ slots and
//! `probation` gets ⌊n/2⌋. New keys always enter probation. Only a `read`
//! hit while in probation earns a move into protected; when protected
//! overflows, its least recent entry is demoted back to the front of
//! probation instead of being dropped.
//!
//! ## Architecture
//!
//! ```text
//!   SlruCache<K, V>
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │   PROTECTED (⌈n/2⌉)                  PROBATION (⌊n/2⌋)            │
//!   │   ┌─────────────────────────┐        ┌─────────────────────────┐  │
//!   │   │ front            back   │ demote │ front            back   │  │
//!   │   │ [1] ◄──► [3]        ────┼───────►│ [2] ◄──► [4]   ──► out  │  │
//!   │   └─────────────────────────┘        └────────────┬────────────┘  │
//!   │              ▲                                    │               │
//!   │              └────────── read hit ────────────────┘               │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Flows
//!
//! - `read` hit in protected: promote within protected
//! - `read` hit in probation: move to protected front; protected overflow is
//!   demoted to probation front
//! - `write` of a resident key: update in place and promote within the
//!   segment it already lives in (no segment change)
//! - `write` of a new key: insert at probation front; probation overflow is
//!   dropped
//!
//! ## Thread Safety
//!
//! Not thread-safe. Wrap in external synchronization to share.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::slru::SlruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = SlruCache::new(4);
//! cache.write(1, 10);
//! assert!(cache.in_probation(&1));
//!
//! assert_eq!(cache.read(&1), Some(10));
//! assert!(cache.in_protected(&1));
//! ```

use std::hash::Hash;

use crate::ds::RecencyList;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SegmentMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SegmentMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider, SegmentMetricsRecorder};
use crate::traits::{CoreCache, ReadOnlyCache};

/// Segmented LRU cache with a protected and a probation segment.
#[derive(Debug)]
pub struct SlruCache<K, V> {
    protected: RecencyList<K, V>,
    probation: RecencyList<K, V>,
    #[cfg(feature = "metrics")]
    metrics: SegmentMetrics,
}

impl<K, V> SlruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an SLRU cache with `capacity` total slots.
    ///
    /// Protected gets the larger half. With `capacity == 1` probation has no
    /// room, so nothing is ever admitted.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            protected: RecencyList::new(capacity.div_ceil(2)),
            probation: RecencyList::new(capacity / 2),
            #[cfg(feature = "metrics")]
            metrics: SegmentMetrics::default(),
        }
    }

    /// Returns the value for `key` from either segment without moving it.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.protected
            .peek(key)
            .or_else(|| self.probation.peek(key))
    }

    pub fn in_protected(&self, key: &K) -> bool {
        self.protected.contains(key)
    }

    pub fn in_probation(&self, key: &K) -> bool {
        self.probation.contains(key)
    }

    pub fn protected_len(&self) -> usize {
        self.protected.len()
    }

    pub fn probation_len(&self) -> usize {
        self.probation.len()
    }

    /// Protected keys, most recent first.
    pub fn protected_keys(&self) -> Vec<K> {
        self.protected.keys()
    }

    /// Probation keys, most recent first.
    pub fn probation_keys(&self) -> Vec<K> {
        self.probation.keys()
    }

    /// Checks that the segments are disjoint and within their capacities.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.protected.len() > self.protected.capacity() {
            return Err(InvariantError::new(format!(
                "protected holds {} entries, capacity {}",
                self.protected.len(),
                self.protected.capacity()
            )));
        }
        if self.probation.len() > self.probation.capacity() {
            return Err(InvariantError::new(format!(
                "probation holds {} entries, capacity {}",
                self.probation.len(),
                self.probation.capacity()
            )));
        }
        if self.protected.iter().any(|(key, _)| self.probation.contains(key)) {
            return Err(InvariantError::new("a key is resident in both segments"));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.protected.debug_validate_invariants();
        self.probation.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }
}

impl<K, V> ReadOnlyCache<K, V> for SlruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        self.protected.contains(key) || self.probation.contains(key)
    }

    fn len(&self) -> usize {
        self.protected.len() + self.probation.len()
    }

    fn capacity(&self) -> usize {
        self.protected.capacity() + self.probation.capacity()
    }
}

impl<K, V> CoreCache<K, V> for SlruCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn read(&mut self, key: &K) -> Option<V> {
        if let Some(value) = self.protected.read(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_read_hit();
            return Some(value.clone());
        }

        let Some(entry) = self.probation.remove(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_read_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_read_hit();
            self.metrics.record_promotion();
        }

        let value = entry.value.clone();
        if let Some(demoted) = self.protected.push_entry(entry) {
            #[cfg(feature = "metrics")]
            self.metrics.record_demotion();
            let _dropped = self.probation.push_entry(demoted);
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

        if self.protected.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_write_update();
            self.protected.write(key, value);
            return;
        }

        #[cfg(feature = "metrics")]
        if self.probation.contains(&key) {
            self.metrics.record_write_update();
        } else {
            self.metrics.record_write_new();
        }

        let _evicted = self.probation.write(key, value);
        #[cfg(feature = "metrics")]
        if _evicted.is_some() {
            self.metrics.record_evicted_entry();
        }
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.protected.clear();
        self.probation.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> SlruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> SegmentMetricsSnapshot {
        self.metrics.snapshot(
            self.protected.len(),
            self.probation.len(),
            self.protected.capacity() + self.probation.capacity(),
        )
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<SegmentMetricsSnapshot> for SlruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> SegmentMetricsSnapshot {
        self.metrics_snapshot()
    }
}
