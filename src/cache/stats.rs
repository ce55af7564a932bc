//! Cache Statistics Module
//!
//! Counters for the read-through list cache and the invalidator.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == List Cache Stats ==
/// Point-in-time snapshot of the list cache counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListCacheStats {
    /// List reads answered from the cache
    pub hits: u64,
    /// List reads that queried the store
    pub misses: u64,
    /// Pages written back after a miss
    pub write_backs: u64,
    /// Per-kind invalidations performed
    pub invalidations: u64,
    /// Cache store failures absorbed
    pub cache_errors: u64,
}

impl ListCacheStats {
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Counters ==
/// Lock-free counters shared by the list cache and its invalidator.
#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    write_backs: AtomicU64,
    invalidations: AtomicU64,
    cache_errors: AtomicU64,
}

impl CacheCounters {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_back(&self) {
        self.write_backs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_error(&self) {
        self.cache_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ListCacheStats {
        ListCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            write_backs: self.write_backs.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            cache_errors: self.cache_errors.load(Ordering::Relaxed),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let stats = ListCacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(ListCacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_counters_snapshot() {
        let counters = CacheCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        counters.record_write_back();
        counters.record_invalidation();
        counters.record_cache_error();

        let stats = counters.snapshot();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.write_backs, 1);
        assert_eq!(stats.invalidations, 1);
        assert_eq!(stats.cache_errors, 1);
    }
}
