/*!
 * Queue Status
 * Read-only traversal of the level stack
 */

use super::traits::StatusDisplay;
use super::types::QueueSnapshot;
use super::DynamicQueue;

impl DynamicQueue {
    /// Copy of every level's pids, top to bottom
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            levels: self.levels().map(|level| level.pids().collect()).collect(),
        }
    }

    /// Process count per level, top to bottom
    pub fn level_sizes(&self) -> Vec<usize> {
        self.levels().map(|level| level.len()).collect()
    }

    /// Hand the current snapshot to a display collaborator
    pub fn print_status(&self, display: &dyn StatusDisplay) {
        display.render(&self.snapshot());
    }
}
