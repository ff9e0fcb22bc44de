/// Counters shared by every policy, plus gauges captured at snapshot time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CoreOnlyMetricsSnapshot {
    pub read_calls: u64,
    pub read_hits: u64,
    pub read_misses: u64,

    pub write_calls: u64,
    pub write_updates: u64,
    pub write_new: u64,

    pub evicted_entries: u64,
    pub clears: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

impl CoreOnlyMetricsSnapshot {
    /// Fraction of reads that hit, or 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        if self.read_calls == 0 {
            return 0.0;
        }
        self.read_hits as f64 / self.read_calls as f64
    }

    /// Fraction of reads that missed, or 0.0 before the first read.
    pub fn miss_rate(&self) -> f64 {
        if self.read_calls == 0 {
            return 0.0;
        }
        self.read_misses as f64 / self.read_calls as f64
    }
}

/// SLRU/LFRU snapshot: core counters plus segment movement.
///
/// `upper_len` is the protected/privileged segment, `lower_len` the
/// probation/unprivileged one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SegmentMetricsSnapshot {
    pub core: CoreOnlyMetricsSnapshot,
    pub promotions: u64,
    pub demotions: u64,
    pub upper_len: usize,
    pub lower_len: usize,
}

impl SegmentMetricsSnapshot {
    pub fn hit_rate(&self) -> f64 {
        self.core.hit_rate()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArcMetricsSnapshot {
    pub core: CoreOnlyMetricsSnapshot,

    pub t1_to_t2_promotions: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub p_increases: u64,
    pub p_decreases: u64,
    pub t1_evictions: u64,
    pub t2_evictions: u64,

    // gauges captured at snapshot time
    pub t1_len: usize,
    pub t2_len: usize,
    pub b1_len: usize,
    pub b2_len: usize,
    pub p: usize,
}

impl ArcMetricsSnapshot {
    pub fn hit_rate(&self) -> f64 {
        self.core.hit_rate()
    }

    /// Ghost hits as a fraction of all reads.
    pub fn ghost_hit_rate(&self) -> f64 {
        if self.core.read_calls == 0 {
            return 0.0;
        }
        (self.b1_ghost_hits + self.b2_ghost_hits) as f64 / self.core.read_calls as f64
    }
}
