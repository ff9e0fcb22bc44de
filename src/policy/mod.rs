//! Eviction policies.
//!
//! | Policy | Structure                                   | Evicts                          |
//! |--------|---------------------------------------------|---------------------------------|
//! | LRU    | one recency list                            | least recently used             |
//! | MRU    | one recency list                            | most recently used              |
//! | LFU    | frequency heap                              | lowest access count             |
//! | SLRU   | protected + probation recency lists         | probation tail                  |
//! | LFRU   | privileged recency list + frequency heap    | lowest count in unprivileged    |
//! | ARC    | T1/T2 resident + B1/B2 ghost recency lists  | adaptive, steered by `p`        |
//!
//! All policies implement [`CoreCache`](crate::traits::CoreCache).

pub mod arc;
pub mod lfru;
pub mod lfu;
pub mod lru;
pub mod mru;
pub mod slru;
