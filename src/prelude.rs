pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentCache;
pub use crate::ds::{Entry, FrequencyHeap, RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{
    ArcMetricsSnapshot, CoreOnlyMetricsSnapshot, SegmentMetricsSnapshot,
};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::policy::arc::{ArcCache, ArcList};
pub use crate::policy::lfru::LfruCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::mru::MruCache;
pub use crate::policy::slru::SlruCache;
pub use crate::traits::{CoreCache, ReadOnlyCache};
