/*!
 * Lock-Free Driver Statistics
 * Atomic counters updated by the tick loop and read from anywhere
 */

use super::types::DriverStatsSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic driver statistics for lock-free updates
///
/// All operations use relaxed ordering; a snapshot may mix values from
/// adjacent ticks, which is fine for monitoring.
#[derive(Debug, Default)]
pub struct DriverStats {
    ticks: AtomicU64,
    promotions: AtomicU64,
    splits: AtomicU64,
    threshold_updates: AtomicU64,
    threshold_errors: AtomicU64,
    commands_executed: AtomicU64,
}

impl DriverStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment ticks, returning the new count
    #[inline]
    pub fn inc_ticks(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[inline]
    pub fn inc_promotions(&self) {
        self.promotions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn add_splits(&self, count: usize) {
        self.splits.fetch_add(count as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_threshold_updates(&self) {
        self.threshold_updates.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_threshold_errors(&self) {
        self.threshold_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_commands(&self) {
        self.commands_executed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> DriverStatsSnapshot {
        DriverStatsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            promotions: self.promotions.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            threshold_updates: self.threshold_updates.load(Ordering::Relaxed),
            threshold_errors: self.threshold_errors.load(Ordering::Relaxed),
            commands_executed: self.commands_executed.load(Ordering::Relaxed),
        }
    }
}
