use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::CoreMetricsRecorder;

/// Plain counters owned by a single cache instance.
#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,
    pub evicted_entries: u64,
}

impl CacheMetrics {
    /// Copies the counters and adds the gauges sampled by the caller.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            put_calls: self.put_calls,
            put_updates: self.put_updates,
            put_new: self.put_new,
            evicted_entries: self.evicted_entries,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for CacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_put_call(&mut self) {
        self.put_calls += 1;
    }

    fn record_put_new(&mut self) {
        self.put_new += 1;
    }

    fn record_put_update(&mut self) {
        self.put_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_updates_counters() {
        let mut metrics = CacheMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_get_miss();
        metrics.record_put_call();
        metrics.record_put_new();
        metrics.record_evicted_entry();

        let snap = metrics.snapshot(1, 4);
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 2);
        assert_eq!(snap.put_calls, 1);
        assert_eq!(snap.put_new, 1);
        assert_eq!(snap.put_updates, 0);
        assert_eq!(snap.evicted_entries, 1);
        assert_eq!((snap.cache_len, snap.capacity), (1, 4));
    }
}
