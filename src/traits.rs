//! # Cache Trait Hierarchy
//!
//! Every eviction policy in this crate implements the same two traits, so
//! callers (the builder's [`Cache`](crate::builder::Cache) wrapper, the
//! hit-rate simulator, benches) can swap strategies without touching their
//! own code.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │          ReadOnlyCache<K, V>            │
//!   │                                         │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  read(&mut, &K) → Option<V>             │
//!   │  write(&mut, K, V)                      │
//!   │  clear(&mut)                            │
//!   └─────────────────────────────────────────┘
//!                      │
//!     ┌──────┬──────┬──┴───┬──────┬──────┐
//!     ▼      ▼      ▼      ▼      ▼      ▼
//!    LRU    MRU    LFU   SLRU   LFRU    ARC
//! ```
//!
//! ## Read/Write Contract
//!
//! | Call          | Result                 | Side effects                            |
//! |---------------|------------------------|-----------------------------------------|
//! | `read(k)`     | `Some(v)` on hit       | policy-specific promotion/frequency/`p` |
//! | `read(k)`     | `None` on miss         | ARC may still run ghost bookkeeping     |
//! | `write(k, v)` | nothing                | insert or update; may evict internally  |
//!
//! A miss is not an error. `write` never reports which entry it evicted; the
//! eviction is internal to the policy.
//!
//! ## Thread Safety
//!
//! - Policies are **NOT thread-safe**: `read` mutates ordering state, so every
//!   call needs exclusive access
//! - Share a cache across threads by guarding it with one lock per call, e.g.
//!   `ConcurrentCache` (feature `concurrency`)

/// Non-mutating inspection shared by every policy.
///
/// # Example
///
/// ```
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::{CoreCache, ReadOnlyCache};
///
/// let mut cache = LruCache::new(2);
/// cache.write(1, "one");
///
/// assert!(cache.contains(&1));
/// assert_eq!(cache.len(), 1);
/// assert_eq!(cache.capacity(), 2);
/// ```
pub trait ReadOnlyCache<K, V> {
    /// Checks if a key is resident without updating access state.
    ///
    /// ARC ghost entries are not resident.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if no entry is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured maximum number of resident entries.
    fn capacity(&self) -> usize;
}

/// The uniform read/write contract.
///
/// # Example
///
/// ```
/// use evictkit::policy::lfu::LfuCache;
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, u64>>(cache: &mut C, keys: &[u64]) {
///     for &key in keys {
///         if cache.read(&key).is_none() {
///             cache.write(key, key * 10);
///         }
///     }
/// }
///
/// let mut lru = LruCache::new(8);
/// let mut lfu = LfuCache::new(8);
/// warm(&mut lru, &[1, 2, 3]);
/// warm(&mut lfu, &[1, 2, 3]);
/// assert_eq!(lru.read(&2), Some(20));
/// assert_eq!(lfu.read(&2), Some(20));
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Looks up `key`, returning a copy of the stored value on a hit.
    ///
    /// `None` means a miss. A hit updates the policy's ordering state; for
    /// MRU it also consumes the entry.
    fn read(&mut self, key: &K) -> Option<V>;

    /// Inserts or updates `key`.
    ///
    /// If the cache is full, the policy evicts an entry of its choosing.
    fn write(&mut self, key: K, value: V);

    /// Removes every entry, including any history the policy keeps.
    fn clear(&mut self);
}
