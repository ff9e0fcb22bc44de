use crate::metrics::snapshot::{ArcMetricsSnapshot, CoreOnlyMetricsSnapshot, SegmentMetricsSnapshot};
use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder, SegmentMetricsRecorder};

// ---------------------------------------------------------------------------
// CoreOnlyMetrics (LRU, MRU, LFU)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct CoreOnlyMetrics {
    pub read_calls: u64,
    pub read_hits: u64,
    pub read_misses: u64,
    pub write_calls: u64,
    pub write_updates: u64,
    pub write_new: u64,
    pub evicted_entries: u64,
    pub clears: u64,
}

impl CoreOnlyMetrics {
    /// Captures the counters together with the cache's current gauges.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CoreOnlyMetricsSnapshot {
        CoreOnlyMetricsSnapshot {
            read_calls: self.read_calls,
            read_hits: self.read_hits,
            read_misses: self.read_misses,
            write_calls: self.write_calls,
            write_updates: self.write_updates,
            write_new: self.write_new,
            evicted_entries: self.evicted_entries,
            clears: self.clears,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for CoreOnlyMetrics {
    fn record_read_hit(&mut self) {
        self.read_calls += 1;
        self.read_hits += 1;
    }
    fn record_read_miss(&mut self) {
        self.read_calls += 1;
        self.read_misses += 1;
    }
    fn record_write_call(&mut self) {
        self.write_calls += 1;
    }
    fn record_write_new(&mut self) {
        self.write_new += 1;
    }
    fn record_write_update(&mut self) {
        self.write_updates += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

// ---------------------------------------------------------------------------
// SegmentMetrics (SLRU, LFRU)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct SegmentMetrics {
    pub core: CoreOnlyMetrics,
    pub promotions: u64,
    pub demotions: u64,
}

impl SegmentMetrics {
    pub fn snapshot(
        &self,
        upper_len: usize,
        lower_len: usize,
        capacity: usize,
    ) -> SegmentMetricsSnapshot {
        SegmentMetricsSnapshot {
            core: self.core.snapshot(upper_len + lower_len, capacity),
            promotions: self.promotions,
            demotions: self.demotions,
            upper_len,
            lower_len,
        }
    }
}

impl CoreMetricsRecorder for SegmentMetrics {
    fn record_read_hit(&mut self) {
        self.core.record_read_hit();
    }
    fn record_read_miss(&mut self) {
        self.core.record_read_miss();
    }
    fn record_write_call(&mut self) {
        self.core.record_write_call();
    }
    fn record_write_new(&mut self) {
        self.core.record_write_new();
    }
    fn record_write_update(&mut self) {
        self.core.record_write_update();
    }
    fn record_evicted_entry(&mut self) {
        self.core.record_evicted_entry();
    }
    fn record_clear(&mut self) {
        self.core.record_clear();
    }
}

impl SegmentMetricsRecorder for SegmentMetrics {
    fn record_promotion(&mut self) {
        self.promotions += 1;
    }
    fn record_demotion(&mut self) {
        self.demotions += 1;
    }
}

// ---------------------------------------------------------------------------
// ArcMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct ArcMetrics {
    pub core: CoreOnlyMetrics,
    pub t1_to_t2_promotions: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub p_increases: u64,
    pub p_decreases: u64,
    pub t1_evictions: u64,
    pub t2_evictions: u64,
}

impl CoreMetricsRecorder for ArcMetrics {
    fn record_read_hit(&mut self) {
        self.core.record_read_hit();
    }
    fn record_read_miss(&mut self) {
        self.core.record_read_miss();
    }
    fn record_write_call(&mut self) {
        self.core.record_write_call();
    }
    fn record_write_new(&mut self) {
        self.core.record_write_new();
    }
    fn record_write_update(&mut self) {
        self.core.record_write_update();
    }
    fn record_evicted_entry(&mut self) {
        self.core.record_evicted_entry();
    }
    fn record_clear(&mut self) {
        self.core.record_clear();
    }
}

impl ArcMetricsRecorder for ArcMetrics {
    fn record_t1_to_t2_promotion(&mut self) {
        self.t1_to_t2_promotions += 1;
    }
    fn record_b1_ghost_hit(&mut self) {
        self.b1_ghost_hits += 1;
    }
    fn record_b2_ghost_hit(&mut self) {
        self.b2_ghost_hits += 1;
    }
    fn record_p_increase(&mut self) {
        self.p_increases += 1;
    }
    fn record_p_decrease(&mut self) {
        self.p_decreases += 1;
    }
    fn record_t1_eviction(&mut self) {
        self.t1_evictions += 1;
    }
    fn record_t2_eviction(&mut self) {
        self.t2_evictions += 1;
    }
}

/// Gauges an ARC cache reports alongside its counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArcGauges {
    pub t1_len: usize,
    pub t2_len: usize,
    pub b1_len: usize,
    pub b2_len: usize,
    pub p: usize,
    pub capacity: usize,
}

impl ArcMetrics {
    pub fn snapshot(&self, gauges: ArcGauges) -> ArcMetricsSnapshot {
        ArcMetricsSnapshot {
            core: self
                .core
                .snapshot(gauges.t1_len + gauges.t2_len, gauges.capacity),
            t1_to_t2_promotions: self.t1_to_t2_promotions,
            b1_ghost_hits: self.b1_ghost_hits,
            b2_ghost_hits: self.b2_ghost_hits,
            p_increases: self.p_increases,
            p_decreases: self.p_decreases,
            t1_evictions: self.t1_evictions,
            t2_evictions: self.t2_evictions,
            t1_len: gauges.t1_len,
            t2_len: gauges.t2_len,
            b1_len: gauges.b1_len,
            b2_len: gauges.b2_len,
            p: gauges.p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_counters_accumulate() {
        let mut metrics = CoreOnlyMetrics::default();
        metrics.record_read_hit();
        metrics.record_read_miss();
        metrics.record_read_miss();
        metrics.record_write_call();
        metrics.record_write_new();
        metrics.record_evicted_entry();

        let snap = metrics.snapshot(3, 10);
        assert_eq!(snap.read_calls, 3);
        assert_eq!(snap.read_hits, 1);
        assert_eq!(snap.read_misses, 2);
        assert_eq!(snap.write_new, 1);
        assert_eq!(snap.evicted_entries, 1);
        assert_eq!(snap.cache_len, 3);
        assert_eq!(snap.capacity, 10);
    }

    #[test]
    fn segment_metrics_delegate_core_counters() {
        let mut metrics = SegmentMetrics::default();
        metrics.record_read_hit();
        metrics.record_promotion();
        metrics.record_demotion();
        metrics.record_clear();

        let snap = metrics.snapshot(2, 1, 4);
        assert_eq!(snap.core.read_hits, 1);
        assert_eq!(snap.core.clears, 1);
        assert_eq!(snap.core.cache_len, 3);
        assert_eq!(snap.promotions, 1);
        assert_eq!(snap.demotions, 1);
    }

    #[test]
    fn arc_metrics_carry_gauges() {
        let mut metrics = ArcMetrics::default();
        metrics.record_b1_ghost_hit();
        metrics.record_p_increase();
        metrics.record_t1_eviction();

        let snap = metrics.snapshot(ArcGauges {
            t1_len: 1,
            t2_len: 2,
            b1_len: 3,
            b2_len: 0,
            p: 1,
            capacity: 4,
        });
        assert_eq!(snap.b1_ghost_hits, 1);
        assert_eq!(snap.p_increases, 1);
        assert_eq!(snap.t1_evictions, 1);
        assert_eq!(snap.core.cache_len, 3);
        assert_eq!(snap.b1_len, 3);
        assert_eq!(snap.p, 1);
    }
}
