/*!
 * Threshold Policy
 * Alarm clock holding the split-and-merge trigger value
 */

use crate::core::errors::ThresholdError;
use log::debug;
use serde::{Deserialize, Serialize};

/// Rebalancing threshold derived from population and level count
///
/// `threshold = total_processes / level_count`. The queue never refreshes it;
/// the driver calls [`ThresholdPolicy::recompute`] every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    total_processes: usize,
    level_count: usize,
    threshold: usize,
}

/// The scheduler's alarm clock is the threshold policy
pub type AlarmClock = ThresholdPolicy;

impl ThresholdPolicy {
    pub fn new(total_processes: usize, level_count: usize) -> Result<Self, ThresholdError> {
        let threshold = compute(total_processes, level_count)?;
        Ok(Self {
            total_processes,
            level_count,
            threshold,
        })
    }

    /// Overwrite the threshold without touching the inputs
    #[inline]
    pub fn set_threshold(&mut self, threshold: usize) {
        self.threshold = threshold;
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    #[inline]
    pub fn total_processes(&self) -> usize {
        self.total_processes
    }

    #[inline]
    pub fn level_count(&self) -> usize {
        self.level_count
    }

    /// Refresh inputs and threshold together
    ///
    /// On error nothing changes.
    pub fn recompute(
        &mut self,
        total_processes: usize,
        level_count: usize,
    ) -> Result<usize, ThresholdError> {
        let threshold = compute(total_processes, level_count)?;
        if threshold != self.threshold {
            debug!(
                "Threshold {} -> {} ({} processes / {} levels)",
                self.threshold, threshold, total_processes, level_count
            );
        }
        self.total_processes = total_processes;
        self.level_count = level_count;
        self.threshold = threshold;
        Ok(threshold)
    }
}

fn compute(total_processes: usize, level_count: usize) -> Result<usize, ThresholdError> {
    total_processes
        .checked_div(level_count)
        .ok_or(ThresholdError::DivisionByZero { total_processes })
}
