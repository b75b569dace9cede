/*!
 * Dynamic Multi-Level Queue
 * Stack of priority levels with promotion and split-and-merge rebalancing
 *
 * Levels form an owned singly linked chain: the top level (highest priority)
 * owns the level below it, and so on down to the bottom. A level that runs out
 * of processes is unlinked and dropped right away, so every level reachable
 * from `top` holds at least one process between operations.
 */

use crate::core::errors::QueueError;
use crate::core::types::Pid;
use ahash::AHashSet;
use log::info;

mod atomic_stats;
pub mod driver;
mod level;
mod operations;
mod status;
pub mod task;
pub mod threshold;
pub mod timer;
pub mod traits;
pub mod types;

use level::{Level, Levels};

// Re-export public API
pub use atomic_stats::DriverStats;
pub use driver::{DriverCommand, DriverConfig, SchedulerDriver};
pub use task::DriverTask;
pub use threshold::{AlarmClock, ThresholdPolicy};
pub use timer::{ImmediateTimer, TokioTimer};
pub use traits::{CommandExecutor, StatusDisplay, Timer};
pub use types::{DriverStatsSnapshot, QueueSnapshot, SplitOutcome, TickReport};

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// The stack of levels
///
/// Sole owner of every enqueued [`Process`](crate::process::Process). All
/// mutators take `&mut self`; share it behind a lock when more than one task
/// needs to touch it.
#[derive(Debug, Default)]
pub struct DynamicQueue {
    top: Option<Box<Level>>,
    level_count: usize,
    // Pids currently held by some level
    members: AHashSet<Pid>,
}

impl DynamicQueue {
    pub fn new() -> Self {
        info!("Dynamic queue initialized");
        Self::default()
    }

    /// Number of processes across all levels
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Number of levels in the stack
    #[inline]
    pub fn level_count(&self) -> usize {
        self.level_count
    }

    #[inline]
    pub fn contains(&self, pid: Pid) -> bool {
        self.members.contains(&pid)
    }

    fn levels(&self) -> Levels<'_> {
        Levels::new(self.top.as_deref())
    }
}

impl Drop for DynamicQueue {
    fn drop(&mut self) {
        // Unlink iteratively; the default recursive drop can overflow on deep stacks
        let mut next = self.top.take();
        while let Some(mut level) = next {
            next = level.lower.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;

    #[test]
    fn test_new_queue_is_empty() {
        let queue = DynamicQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.level_count(), 0);
        assert_eq!(queue.levels().count(), 0);
    }

    #[test]
    fn test_contains_tracks_membership() {
        let mut queue = DynamicQueue::new();
        queue.enqueue(Process::foreground(3)).unwrap();
        assert!(queue.contains(3));
        assert!(!queue.contains(4));

        queue.dequeue().unwrap();
        assert!(!queue.contains(3));
    }

    #[test]
    fn test_deep_stack_drops_without_recursion() {
        let mut queue = DynamicQueue::new();
        queue.enqueue(Process::foreground(0)).unwrap();
        // Each round grows the top level to two processes and splits one off
        for pid in 1..100_000 {
            queue.enqueue(Process::foreground(pid)).unwrap();
            queue.split_n_merge(0);
        }
        assert_eq!(queue.level_count(), 100_000);
        drop(queue);
    }
}
