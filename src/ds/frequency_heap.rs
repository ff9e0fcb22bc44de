//! Indexed binary heap ordered by access frequency.
//!
//! Backs LFU directly and the unprivileged segment of LFRU. Entries live in a
//! `Vec` laid out as a binary heap; a key→slot map tracks every entry's array
//! position so arbitrary removal and in-place re-prioritisation stay
//! O(log n).
//!
//! ## Architecture
//!
//! ```text
//!   nodes (heap order, root = eviction candidate)
//!   ┌──────────────┬──────────────┬──────────────┬──────────────┐
//!   │ [0] k=7 f=1  │ [1] k=3 f=2  │ [2] k=9 f=1  │ [3] k=5 f=4  │
//!   │     tick=2   │     tick=6   │     tick=4   │     tick=5   │
//!   └──────────────┴──────────────┴──────────────┴──────────────┘
//!   slots: { 7 → 0, 3 → 1, 9 → 2, 5 → 3 }
//! ```
//!
//! ## Ordering
//!
//! Entries compare by `(frequency, tick)`, where `tick` is a monotonically
//! increasing stamp assigned on every insert or touch. The root is therefore
//! the entry with the lowest frequency, and among equal frequencies the one
//! touched least recently. The order is total, so eviction is deterministic.
//!
//! Every swap rewrites the slot of both swapped entries;
//! `debug_validate_invariants()` checks slot/position agreement and the heap
//! property in debug/test builds.
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::entry::Entry;

#[derive(Debug)]
struct HeapNode<K, V> {
    entry: Entry<K, V>,
    tick: u64,
}

impl<K, V> HeapNode<K, V> {
    #[inline]
    fn rank(&self) -> (u64, u64) {
        (self.entry.frequency, self.tick)
    }
}

/// Capacity-bounded indexed min-heap keyed by access frequency.
#[derive(Debug)]
pub struct FrequencyHeap<K, V> {
    nodes: Vec<HeapNode<K, V>>,
    slots: FxHashMap<K, usize>,
    capacity: usize,
    tick: u64,
}

impl<K, V> FrequencyHeap<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty heap holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            tick: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Returns the value for `key` without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entry(key).map(|entry| &entry.value)
    }

    /// Returns the entry for `key` without counting an access.
    pub fn entry(&self, key: &K) -> Option<&Entry<K, V>> {
        let idx = *self.slots.get(key)?;
        self.nodes.get(idx).map(|node| &node.entry)
    }

    /// Returns the access count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.entry(key).map(|entry| entry.frequency)
    }

    /// Counts an access to `key` and returns its value.
    pub fn read(&mut self, key: &K) -> Option<&V> {
        let idx = *self.slots.get(key)?;
        let idx = self.increment_at(idx);
        self.nodes.get(idx).map(|node| &node.entry.value)
    }

    /// Counts an access to `key`; returns the new frequency.
    pub fn increment(&mut self, key: &K) -> Option<u64> {
        let idx = *self.slots.get(key)?;
        let idx = self.increment_at(idx);
        self.nodes.get(idx).map(|node| node.entry.frequency)
    }

    /// Updates `key` and counts the access, or inserts it with frequency 1.
    ///
    /// When a new key arrives at a full heap, the minimum entry is evicted
    /// first and returned.
    pub fn write(&mut self, key: K, value: V) -> Option<Entry<K, V>> {
        if let Some(&idx) = self.slots.get(&key) {
            self.nodes[idx].entry.value = value;
            self.increment_at(idx);
            return None;
        }
        self.push_entry(Entry::new(key, value))
    }

    /// Inserts `entry` with the frequency it carries.
    ///
    /// An existing entry with the same key is replaced. A new key at a full
    /// heap evicts the minimum first; with capacity 0 the rejected `entry` is
    /// returned.
    pub fn push_entry(&mut self, entry: Entry<K, V>) -> Option<Entry<K, V>> {
        let tick = self.next_tick();
        if let Some(&idx) = self.slots.get(&entry.key) {
            self.nodes[idx] = HeapNode { entry, tick };
            self.sift(idx);
            return None;
        }
        if self.capacity == 0 {
            return Some(entry);
        }

        let evicted = if self.nodes.len() >= self.capacity {
            self.pop_min()
        } else {
            None
        };

        let idx = self.nodes.len();
        self.slots.insert(entry.key.clone(), idx);
        self.nodes.push(HeapNode { entry, tick });
        self.sift_up(idx);
        evicted
    }

    /// Removes `key` from any position and returns its entry.
    pub fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        let idx = *self.slots.get(key)?;
        self.remove_at(idx)
    }

    /// Removes and returns the entry with the lowest rank.
    pub fn pop_min(&mut self) -> Option<Entry<K, V>> {
        self.remove_at(0)
    }

    /// Returns the next eviction candidate.
    pub fn peek_min(&self) -> Option<(&K, &V)> {
        self.nodes
            .first()
            .map(|node| (&node.entry.key, &node.entry.value))
    }

    /// Iterates entries in heap-array order (unspecified, not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.nodes
            .iter()
            .map(|node| (&node.entry.key, &node.entry.value))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.slots.clear();
        self.tick = 0;
    }

    fn next_tick(&mut self) -> u64 {
        self.tick = self.tick.wrapping_add(1);
        self.tick
    }

    fn increment_at(&mut self, idx: usize) -> usize {
        let tick = self.next_tick();
        let node = &mut self.nodes[idx];
        node.entry.frequency = node.entry.frequency.saturating_add(1);
        node.tick = tick;
        // Rank only grew.
        self.sift_down(idx)
    }

    fn remove_at(&mut self, idx: usize) -> Option<Entry<K, V>> {
        if idx >= self.nodes.len() {
            return None;
        }
        let node = self.nodes.swap_remove(idx);
        self.slots.remove(&node.entry.key);
        if idx < self.nodes.len() {
            if let Some(slot) = self.slots.get_mut(&self.nodes[idx].entry.key) {
                *slot = idx;
            }
            self.sift(idx);
        }
        Some(node.entry)
    }

    fn sift(&mut self, idx: usize) -> usize {
        let moved = self.sift_up(idx);
        if moved != idx {
            return moved;
        }
        self.sift_down(idx)
    }

    fn sift_up(&mut self, mut idx: usize) -> usize {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.nodes[parent].rank() <= self.nodes[idx].rank() {
                break;
            }
            self.swap(parent, idx);
            idx = parent;
        }
        idx
    }

    fn sift_down(&mut self, mut idx: usize) -> usize {
        let len = self.nodes.len();
        loop {
            let left = idx * 2 + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < len && self.nodes[left].rank() < self.nodes[smallest].rank() {
                smallest = left;
            }
            if right < len && self.nodes[right].rank() < self.nodes[smallest].rank() {
                smallest = right;
            }
            if smallest == idx {
                return idx;
            }
            self.swap(idx, smallest);
            idx = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        if let Some(slot) = self.slots.get_mut(&self.nodes[a].entry.key) {
            *slot = a;
        }
        if let Some(slot) = self.slots.get_mut(&self.nodes[b].entry.key) {
            *slot = b;
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.nodes.len(), self.slots.len());
        assert!(self.nodes.len() <= self.capacity);
        for (idx, node) in self.nodes.iter().enumerate() {
            assert_eq!(
                self.slots.get(&node.entry.key),
                Some(&idx),
                "slot map disagrees with array position"
            );
            if idx > 0 {
                let parent = (idx - 1) / 2;
                assert!(
                    self.nodes[parent].rank() <= node.rank(),
                    "heap order violated at {idx}"
                );
            }
        }
    }
}
