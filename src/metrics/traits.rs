//! # Metrics Trait Hierarchy
//!
//! Recording and snapshotting are split into small traits so policy code only
//! ever bumps counters, while benches, tests and the simulator read them back
//! through [`MetricsSnapshotProvider`].
//!
//! ## Architecture
//!
//! ```text
//!                        ┌─────────────────────────────┐
//!                        │     CoreMetricsRecorder     │
//!                        │  read_hit/read_miss/write   │
//!                        │  eviction/clear             │
//!                        └──────────────┬──────────────┘
//!                                       │
//!                     ┌─────────────────┴─────────────────┐
//!                     ▼                                   ▼
//!        ┌─────────────────────────┐        ┌─────────────────────────┐
//!        │ SegmentMetricsRecorder  │        │   ArcMetricsRecorder    │
//!        │ promotion / demotion    │        │ ghost hits, p moves,    │
//!        │ (SLRU, LFRU)            │        │ T1→T2, T1/T2 evictions  │
//!        └─────────────────────────┘        └─────────────────────────┘
//!
//!   Consumption:
//!   ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │  LRU/MRU/LFU → CoreOnlyMetricsSnapshot
//!   │ fn snapshot(&self) -> S      │  SLRU/LFRU   → SegmentMetricsSnapshot
//!   └──────────────────────────────┘  ARC         → ArcMetricsSnapshot
//! ```

/// Counters every policy records.
pub trait CoreMetricsRecorder {
    fn record_read_hit(&mut self);
    fn record_read_miss(&mut self);
    fn record_write_call(&mut self);
    fn record_write_new(&mut self);
    fn record_write_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Movement between the two resident segments of SLRU and LFRU.
pub trait SegmentMetricsRecorder: CoreMetricsRecorder {
    /// Entry moved from probation/unprivileged into protected/privileged.
    fn record_promotion(&mut self);
    /// Entry pushed out of protected/privileged back into the lower segment.
    fn record_demotion(&mut self);
}

/// ARC adaptation signals.
pub trait ArcMetricsRecorder: CoreMetricsRecorder {
    fn record_t1_to_t2_promotion(&mut self);
    fn record_b1_ghost_hit(&mut self);
    fn record_b2_ghost_hit(&mut self);
    fn record_p_increase(&mut self);
    fn record_p_decrease(&mut self);
    fn record_t1_eviction(&mut self);
    fn record_t2_eviction(&mut self);
}

/// Snapshot provider for benches, tests and the simulator.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
