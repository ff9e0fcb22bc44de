//! evictkit: interchangeable cache eviction policies behind one read/write
//! contract.
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`traits`]   | `ReadOnlyCache`, `CoreCache`                            |
//! | [`policy`]   | LRU, MRU, LFU, SLRU, LFRU, ARC                          |
//! | [`ds`]       | recency list, frequency heap, slot arena, entry         |
//! | [`builder`]  | `CachePolicy`, `CacheBuilder`, `Cache`                  |
//! | [`error`]    | `ConfigError`, `InvariantError`                         |
//! | `metrics`    | counters and snapshots (feature `metrics`)              |
//! | `concurrent` | mutex-guarded shared cache (feature `concurrency`)      |
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = CacheBuilder::new(2).build::<u64, u64>(CachePolicy::Lfu);
//! cache.write(1, 10);
//! cache.write(2, 20);
//! cache.read(&1);
//! cache.write(3, 30);
//! assert_eq!(cache.read(&2), None);
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "concurrency")]
pub mod concurrent;
#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
