//! Expiring map statistics and metrics tracking
//!
//! Counters cover lookups (hits and misses), inserts, and the work done by
//! purge passes: records removed because they expired, and frontier
//! references thrown away because their record was already gone.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Statistics snapshot for an expiring map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ExpiringMapStats {
    /// Records currently held by the primary index, including expired ones
    /// that no purge pass has reached yet
    pub indexed: usize,

    /// References currently held by the expiration frontier, including stale
    /// ones
    pub pending: usize,

    /// Lookups that found a live record
    pub hits: u64,

    /// Lookups that found nothing, or only an expired record
    pub misses: u64,

    /// Total number of put operations
    pub inserts: u64,

    /// Records removed from the index by purge passes
    pub expirations: u64,

    /// Frontier references discarded because their record was erased or
    /// overwritten
    pub stale_discards: u64,
}

impl ExpiringMapStats {
    /// Calculate hit rate (hits / total accesses)
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate miss rate (misses / total accesses)
    pub fn miss_rate(&self) -> f64 {
        1.0 - self.hit_rate()
    }

    /// Total number of lookups (hits + misses)
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of frontier references that do not back an indexed record
    ///
    /// Each indexed record has exactly one live frontier reference, so
    /// anything beyond `indexed` is stale.
    pub fn stale_ratio(&self) -> f64 {
        if self.pending == 0 {
            0.0
        } else {
            self.pending.saturating_sub(self.indexed) as f64 / self.pending as f64
        }
    }
}

/// Metrics collector for expiring map operations
///
/// Atomic counters let read-only lookups record hits and misses through
/// `&self`.
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricsCollector {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    inserts: Arc<AtomicU64>,
    expirations: Arc<AtomicU64>,
    stale_discards: Arc<AtomicU64>,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expirations(&self, count: u64) {
        self.expirations.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_stale_discards(&self, count: u64) {
        self.stale_discards.fetch_add(count, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub(crate) fn snapshot(&self, indexed: usize, pending: usize) -> ExpiringMapStats {
        ExpiringMapStats {
            indexed,
            pending,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            stale_discards: self.stale_discards.load(Ordering::Relaxed),
        }
    }

    /// Reset all metrics to zero
    pub(crate) fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.expirations.store(0, Ordering::Relaxed);
        self.stale_discards.store(0, Ordering::Relaxed);
    }
}
