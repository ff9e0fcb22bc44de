//! Bounded, keyed recency list backed by `SlotArena`.
//!
//! The building block for LRU, MRU and every recency-ordered segment inside
//! SLRU, LFRU and ARC. Nodes live in a generation-checked [`SlotArena`] and
//! link to each other by [`SlotId`]; a key→handle index gives O(1) lookup.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>        arena: SlotArena<Node<K, V>>
//!   ┌─────────┬─────────┐              head ─► [C] ◄──► [B] ◄──► [A] ◄── tail
//!   │  key A  │  id_0   │                 most recent          least recent
//!   │  key B  │  id_1   │
//!   │  key C  │  id_2   │
//!   └─────────┴─────────┘
//! ```
//!
//! ## Operations
//! - `read(k)`: move to front, return value
//! - `write(k, v)`: update + move to front, or insert at front; if the insert
//!   overflows `capacity`, the tail is evicted and handed back
//! - `push_entry(e)`: like `write` but keeps the entry's metadata
//! - `remove(k)`: detach from any position and hand the entry back
//! - `pop_front` / `pop_back`: detach an end node
//!
//! All operations are O(1) average. `debug_validate_invariants()` is
//! available in debug/test builds.
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::entry::Entry;
use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<K, V> {
    entry: Entry<K, V>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Capacity-bounded doubly linked list of entries, ordered most recent first.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    arena: SlotArena<Node<K, V>>,
    index: FxHashMap<K, SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    capacity: usize,
}

impl<K, V> RecencyList<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty list holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
            capacity,
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of entries in the list.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is present. Does not change the order.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the value for `key` without promoting it.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entry(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value for `key` without promoting it.
    pub fn peek_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.arena.get_mut(id).map(|node| &mut node.entry.value)
    }

    /// Returns the full entry for `key` without promoting it.
    pub fn entry(&self, key: &K) -> Option<&Entry<K, V>> {
        let id = *self.index.get(key)?;
        self.arena.get(id).map(|node| &node.entry)
    }

    /// Moves `key` to the front and returns its value.
    pub fn read(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.move_to_front(id);
        self.arena.get(id).map(|node| &node.entry.value)
    }

    /// Moves `key` to the front; returns `false` if it is absent.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => {
                self.move_to_front(id);
                true
            },
            None => false,
        }
    }

    /// Updates `key` in place and moves it to the front, or inserts it at the
    /// front. Returns the tail entry if the insert pushed the list over
    /// capacity.
    pub fn write(&mut self, key: K, value: V) -> Option<Entry<K, V>> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(node) = self.arena.get_mut(id) {
                node.entry.value = value;
            }
            self.move_to_front(id);
            return None;
        }
        self.push_entry(Entry::new(key, value))
    }

    /// Inserts `entry` at the front, keeping its metadata.
    ///
    /// An existing entry with the same key is replaced. Returns the evicted
    /// tail when the list overflows; with capacity 0 that is `entry` itself.
    pub fn push_entry(&mut self, entry: Entry<K, V>) -> Option<Entry<K, V>> {
        if let Some(&id) = self.index.get(&entry.key) {
            if let Some(node) = self.arena.get_mut(id) {
                node.entry = entry;
            }
            self.move_to_front(id);
            return None;
        }

        let key = entry.key.clone();
        let id = self.arena.insert(Node {
            entry,
            prev: None,
            next: None,
        });
        self.index.insert(key, id);
        self.attach_front(id);

        if self.len() > self.capacity {
            return self.pop_back();
        }
        None
    }

    /// Detaches `key` from wherever it sits and returns its entry.
    pub fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        let id = self.index.remove(key)?;
        self.detach(id);
        self.arena.remove(id).map(|node| node.entry)
    }

    /// Removes and returns the most recent entry.
    pub fn pop_front(&mut self) -> Option<Entry<K, V>> {
        let id = self.head?;
        self.unlink(id)
    }

    /// Removes and returns the least recent entry.
    pub fn pop_back(&mut self) -> Option<Entry<K, V>> {
        let id = self.tail?;
        self.unlink(id)
    }

    /// Returns the most recent key/value pair.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.head
            .and_then(|id| self.arena.get(id))
            .map(|node| (&node.entry.key, &node.entry.value))
    }

    /// Returns the least recent key/value pair.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.tail
            .and_then(|id| self.arena.get(id))
            .map(|node| (&node.entry.key, &node.entry.value))
    }

    /// Iterates from most recent to least recent.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Collects the keys from most recent to least recent.
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    fn unlink(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        self.detach(id);
        let node = self.arena.remove(id)?;
        self.index.remove(&node.entry.key);
        Some(node.entry)
    }

    fn move_to_front(&mut self, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.detach(id);
        self.attach_front(id);
    }

    fn detach(&mut self, id: SlotId) {
        let (prev, next) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        match self.arena.get_mut(id) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            },
            None => return,
        }

        match old_head {
            Some(head_id) => {
                if let Some(head_node) = self.arena.get_mut(head_id) {
                    head_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.arena.len(), self.index.len());
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert!(self.index.is_empty());
            return;
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev, "back link disagrees with forward walk");
            assert_eq!(
                self.index.get(&node.entry.key),
                Some(&id),
                "index does not point at the linked node"
            );
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.index.len(), "cycle in recency list");
        }

        assert_eq!(self.tail, prev);
        assert_eq!(count, self.index.len());
        assert!(self.index.len() <= self.capacity);
    }
}

/// Iterator over `(&K, &V)` from most recent to least recent.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    current: Option<SlotId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some((&node.entry.key, &node.entry.value))
    }
}
