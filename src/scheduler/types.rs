/*!
 * Scheduler Types
 * Snapshots, outcomes and reports exchanged with collaborators
 */

use crate::core::limits::STATUS_LABEL;
use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only view of the queue: levels top to bottom, pids in stored order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub levels: Vec<Vec<Pid>>,
}

impl QueueSnapshot {
    /// Every pid, top level first, head to tail within a level
    pub fn pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.levels.iter().flatten().copied()
    }

    pub fn process_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// `DQ: 3 4 0 1 2`
    pub fn status_line(&self) -> String {
        if self.levels.iter().all(Vec::is_empty) {
            return STATUS_LABEL.to_string();
        }
        format!("{} {}", STATUS_LABEL, self)
    }
}

impl fmt::Display for QueueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pid) in self.pids().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", pid)?;
        }
        Ok(())
    }
}

/// What a call to `split_n_merge` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SplitOutcome {
    /// Level count did not exceed the threshold
    BelowThreshold,
    /// Triggered, but the top level had fewer than two processes
    Skipped,
    /// A new top level was created holding `moved` processes
    Split { moved: usize },
}

impl SplitOutcome {
    #[inline]
    pub const fn is_split(&self) -> bool {
        matches!(self, Self::Split { .. })
    }
}

/// Summary of one driver tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub promoted: Option<Pid>,
    pub threshold: usize,
    pub splits: usize,
    pub population: usize,
    pub level_count: usize,
}

/// Point-in-time copy of the driver counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStatsSnapshot {
    pub ticks: u64,
    pub promotions: u64,
    pub splits: u64,
    pub threshold_updates: u64,
    pub threshold_errors: u64,
    pub commands_executed: u64,
}
