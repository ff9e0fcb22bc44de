//! Adaptive Replacement Cache (ARC) replacement policy.
//!
//! ARC keeps two resident lists and two ghost lists and moves a target
//! parameter `p` in response to ghost hits, shifting capacity between
//! recency and frequency without manual tuning.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                           ArcCache<K, V> Layout                             │
//! │                                                                             │
//! │   T1 (resident, seen once)  ⌊c/2⌋       T2 (resident, seen twice+)  ⌈c/2⌉   │
//! │   ┌─────────────────────────┐          ┌─────────────────────────┐          │
//! │   │ front            back   │          │ front            back   │          │
//! │   │ [6] ◄──► [5] ◄──► [3]   │          │ [4] ◄──► [1]            │          │
//! │   └────────────────────┬────┘          └────────────────────┬────┘          │
//! │                        │ replace / overflow                 │               │
//! │                        ▼                                    ▼               │
//! │   B1 (ghost of T1)  c                   B2 (ghost of T2)  c                 │
//! │   ┌─────────────────────────┐          ┌─────────────────────────┐          │
//! │   │ [2] ◄──► ...     ──► out│          │ ...              ──► out│          │
//! │   └─────────────────────────┘          └─────────────────────────┘          │
//! │                                                                             │
//! │   p ∈ [0, c]: target size of T1                                             │
//! │   • ghost hit in B1 → p += max(|B2| / |B1|, 1), capped at c                 │
//! │   • ghost hit in B2 → p -= max(|B1| / |B2|, 1), floored at 0                │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Protocol
//!
//! Cases are checked in order; exactly one applies.
//!
//! | Case           | Action                                               | Result |
//! |----------------|------------------------------------------------------|--------|
//! | hit in T2      | promote within T2                                    | hit    |
//! | hit in T1      | move to T2 front, T2 overflow → B2                   | hit    |
//! | ghost in B1    | raise `p`, `replace`, move entry to T2               | miss   |
//! | ghost in B2    | lower `p`, `replace`, move entry to T2               | miss   |
//! | cold miss      | trim ghost history and `replace` when lists are full | miss   |
//!
//! A ghost hit is a signal, not a hit: the caller still has to `write` the
//! value. Ghost lists remember the evicted entry itself, and that entry is
//! what lands in T2, so the following `write` is an in-place update.
//!
//! ## Write Protocol
//!
//! - key in T2: update and promote within T2
//! - key in T1: move to T2 with the new value, T2 overflow → B2
//! - otherwise: forget any ghost record of the key, insert at T1 front,
//!   T1 overflow → B1
//!
//! `write` never moves `p`.
//!
//! ## Replace
//!
//! ```text
//!   replace(in_b2):
//!     if |T1| ≥ 1 and ((|T1| == p and !in_b2) or |T1| > p):
//!       T1 back → B1
//!     else:
//!       T2 back → B2
//! ```
//!
//! ## Invariants
//!
//! - `0 ≤ p ≤ c`
//! - `|T1| + |T2| ≤ c`, `|B1| ≤ c`, `|B2| ≤ c`
//! - a key is in at most one of T1, T2, B1, B2
//!
//! [`ArcCache::check_invariants`] verifies all of them.
//!
//! ## Thread Safety
//!
//! Not thread-safe; reads mutate all four lists. Wrap in external
//! synchronization to share.
//!
//! ## References
//!
//! - Megiddo & Modha, "ARC: A Self-Tuning, Low Overhead Replacement Cache",
//!   FAST 2003
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::arc::ArcCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = ArcCache::new(8);
//! cache.write(1, 10);
//! cache.write(2, 20);
//!
//! assert_eq!(cache.read(&1), Some(10)); // T1 → T2
//! assert_eq!(cache.t2_len(), 1);
//! assert_eq!(cache.t1_len(), 1);
//! ```

use std::hash::Hash;

use crate::ds::{Entry, RecencyList};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::{ArcGauges, ArcMetrics};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ArcMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{CoreCache, ReadOnlyCache};

/// Which of the four ARC lists holds a key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ArcList {
    /// Resident, accessed once.
    T1,
    /// Resident, accessed more than once.
    T2,
    /// Ghost of an entry evicted from T1.
    B1,
    /// Ghost of an entry evicted from T2.
    B2,
}

/// Adaptive Replacement Cache.
///
/// # Example
///
/// ```
/// use evictkit::policy::arc::{ArcCache, ArcList};
/// use evictkit::traits::CoreCache;
///
/// let mut cache = ArcCache::new(2);
/// cache.write("a", 1);
/// cache.write("b", 2); // T1 holds one slot, "a" becomes a B1 ghost
/// assert_eq!(cache.location(&"a"), Some(ArcList::B1));
///
/// // Ghost hit: reported as a miss, but `p` grows and "a" moves to T2.
/// assert_eq!(cache.read(&"a"), None);
/// assert_eq!(cache.p_value(), 1);
/// assert_eq!(cache.location(&"a"), Some(ArcList::T2));
/// ```
#[derive(Debug)]
pub struct ArcCache<K, V> {
    t1: RecencyList<K, V>,
    t2: RecencyList<K, V>,
    b1: RecencyList<K, V>,
    b2: RecencyList<K, V>,
    p: usize,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: ArcMetrics,
}

impl<K, V> ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an ARC cache with `capacity` resident slots.
    ///
    /// T1 is bounded by ⌊c/2⌋ and T2 by ⌈c/2⌉; each ghost list holds up to
    /// `c` entries. `p` starts at 0.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            t1: RecencyList::new(capacity / 2),
            t2: RecencyList::new(capacity.div_ceil(2)),
            b1: RecencyList::new(capacity),
            b2: RecencyList::new(capacity),
            p: 0,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: ArcMetrics::default(),
        }
    }

    /// Current target size for T1.
    pub fn p_value(&self) -> usize {
        self.p
    }

    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    /// Reports which list holds `key`, ghosts included.
    pub fn location(&self, key: &K) -> Option<ArcList> {
        if self.t1.contains(key) {
            Some(ArcList::T1)
        } else if self.t2.contains(key) {
            Some(ArcList::T2)
        } else if self.b1.contains(key) {
            Some(ArcList::B1)
        } else if self.b2.contains(key) {
            Some(ArcList::B2)
        } else {
            None
        }
    }

    /// Returns a resident value without touching any list or `p`.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.t1.peek(key).or_else(|| self.t2.peek(key))
    }

    /// Keys of `list`, most recent first.
    pub fn keys(&self, list: ArcList) -> Vec<K> {
        match list {
            ArcList::T1 => self.t1.keys(),
            ArcList::T2 => self.t2.keys(),
            ArcList::B1 => self.b1.keys(),
            ArcList::B2 => self.b2.keys(),
        }
    }

    /// Verifies the size bounds on `p` and every list, and that the four lists
    /// are pairwise disjoint.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let c = self.capacity;
        if self.p > c {
            return Err(InvariantError::new(format!("p = {} exceeds capacity {c}", self.p)));
        }
        if self.t1.len() + self.t2.len() > c {
            return Err(InvariantError::new(format!(
                "|T1| + |T2| = {} exceeds capacity {c}",
                self.t1.len() + self.t2.len()
            )));
        }
        if self.b1.len() > c {
            return Err(InvariantError::new(format!("|B1| = {} exceeds capacity {c}", self.b1.len())));
        }
        if self.b2.len() > c {
            return Err(InvariantError::new(format!("|B2| = {} exceeds capacity {c}", self.b2.len())));
        }

        let lists = [
            (ArcList::T1, &self.t1),
            (ArcList::T2, &self.t2),
            (ArcList::B1, &self.b1),
            (ArcList::B2, &self.b2),
        ];
        for (i, (name, list)) in lists.iter().enumerate() {
            for (other_name, other) in &lists[i + 1..] {
                if list.iter().any(|(key, _)| other.contains(key)) {
                    return Err(InvariantError::new(format!(
                        "{name:?} and {other_name:?} share a key"
                    )));
                }
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.t1.debug_validate_invariants();
        self.t2.debug_validate_invariants();
        self.b1.debug_validate_invariants();
        self.b2.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }

    /// Evicts the back of T1 into B1 or the back of T2 into B2, steered by `p`.
    fn replace(&mut self, in_b2: bool) {
        let t1_len = self.t1.len();
        if t1_len >= 1 && ((t1_len == self.p && !in_b2) || t1_len > self.p) {
            if let Some(entry) = self.t1.pop_back() {
                #[cfg(feature = "metrics")]
                self.metrics.record_t1_eviction();
                self.demote_to_b1(entry);
            }
        } else if let Some(entry) = self.t2.pop_back() {
            #[cfg(feature = "metrics")]
            self.metrics.record_t2_eviction();
            self.demote_to_b2(entry);
        }
    }

    /// Inserts at the T2 front; T2 overflow goes to B2.
    fn promote_to_t2(&mut self, entry: Entry<K, V>) {
        if let Some(overflow) = self.t2.push_entry(entry) {
            #[cfg(feature = "metrics")]
            self.metrics.record_t2_eviction();
            self.demote_to_b2(overflow);
        }
    }

    fn demote_to_b1(&mut self, entry: Entry<K, V>) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        // B1 overflow is forgotten outright.
        let _ = self.b1.push_entry(entry);
    }

    fn demote_to_b2(&mut self, entry: Entry<K, V>) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        let _ = self.b2.push_entry(entry);
    }

    /// Ghost hit in B1: grow `p`, make room, move the ghost into T2.
    fn on_b1_hit(&mut self, key: &K) {
        let step = (self.b2.len() / self.b1.len().max(1)).max(1);
        self.p = (self.p + step).min(self.capacity);
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_b1_ghost_hit();
            self.metrics.record_p_increase();
        }

        let ghost = self.b1.remove(key);
        self.replace(false);
        if let Some(entry) = ghost {
            self.promote_to_t2(entry);
        }
    }

    /// Ghost hit in B2: shrink `p`, make room, move the ghost into T2.
    fn on_b2_hit(&mut self, key: &K) {
        let step = (self.b1.len() / self.b2.len().max(1)).max(1);
        self.p = self.p.saturating_sub(step);
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_b2_ghost_hit();
            self.metrics.record_p_decrease();
        }

        let ghost = self.b2.remove(key);
        self.replace(true);
        if let Some(entry) = ghost {
            self.promote_to_t2(entry);
        }
    }

    /// Cold miss: trim history so the upcoming write has room.
    fn on_cold_miss(&mut self) {
        let c = self.capacity;
        let l1 = self.t1.len() + self.b1.len();
        let total = l1 + self.t2.len() + self.b2.len();

        if l1 == c {
            if self.t1.len() < c {
                self.b1.pop_back();
                self.replace(false);
            } else if let Some(entry) = self.t1.pop_back() {
                #[cfg(feature = "metrics")]
                self.metrics.record_t1_eviction();
                self.demote_to_b1(entry);
            }
        } else if l1 < c && total >= c {
            if total == 2 * c {
                self.b2.pop_back();
            }
            self.replace(false);
        }
    }
}

impl<K, V> ReadOnlyCache<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Ghost entries do not count as resident.
    fn contains(&self, key: &K) -> bool {
        self.t1.contains(key) || self.t2.contains(key)
    }

    fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn read(&mut self, key: &K) -> Option<V> {
        if let Some(value) = self.t2.read(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_read_hit();
            return Some(value.clone());
        }

        if let Some(entry) = self.t1.remove(key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_read_hit();
                self.metrics.record_t1_to_t2_promotion();
            }
            let value = entry.value.clone();
            self.promote_to_t2(entry);
            return Some(value);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_read_miss();

        if self.b1.contains(key) {
            self.on_b1_hit(key);
        } else if self.b2.contains(key) {
            self.on_b2_hit(key);
        } else {
            self.on_cold_miss();
        }
        None
    }

    fn write(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_write_call();

        if self.t2.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_write_update();
            self.t2.write(key, value);
            return;
        }

        if let Some(mut entry) = self.t1.remove(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_write_update();
                self.metrics.record_t1_to_t2_promotion();
            }
            entry.value = value;
            self.promote_to_t2(entry);
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_write_new();

        self.b1.remove(&key);
        self.b2.remove(&key);
        if self.capacity == 0 {
            return;
        }
        if let Some(overflow) = self.t1.write(key, value) {
            #[cfg(feature = "metrics")]
            self.metrics.record_t1_eviction();
            self.demote_to_b1(overflow);
        }
    }

    /// Drops resident entries and ghost history, and resets `p` to 0.
    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        self.p = 0;
    }
}

#[cfg(feature = "metrics")]
impl<K, V> ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> ArcMetricsSnapshot {
        self.metrics.snapshot(ArcGauges {
            t1_len: self.t1.len(),
            t2_len: self.t2.len(),
            b1_len: self.b1.len(),
            b2_len: self.b2.len(),
            p: self.p,
            capacity: self.capacity,
        })
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<ArcMetricsSnapshot> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> ArcMetricsSnapshot {
        self.metrics_snapshot()
    }
}
