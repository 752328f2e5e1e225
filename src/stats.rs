//! Statistics tracking for the interception pipeline.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters for lookup dispositions.
pub struct Stats {
    pub requests: AtomicU64,
    pub forwarded: AtomicU64,
    pub forced: AtomicU64,
    pub suppressed: AtomicU64,
    pub denied: AtomicU64,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            requests: AtomicU64::new(0),
            forwarded: AtomicU64::new(0),
            forced: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            denied: AtomicU64::new(0),
        }
    }

    pub fn record_forwarded(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.forwarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_forced(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.forced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_suppressed(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_denied(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.denied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot_and_reset(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests: self.requests.swap(0, Ordering::Relaxed),
            forwarded: self.forwarded.swap(0, Ordering::Relaxed),
            forced: self.forced.swap(0, Ordering::Relaxed),
            suppressed: self.suppressed.swap(0, Ordering::Relaxed),
            denied: self.denied.swap(0, Ordering::Relaxed),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

pub struct StatsSnapshot {
    pub requests: u64,
    pub forwarded: u64,
    pub forced: u64,
    pub suppressed: u64,
    pub denied: u64,
}
