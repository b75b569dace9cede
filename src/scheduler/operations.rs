/*!
 * Dynamic Queue Core Operations
 * Enqueue, dequeue, promotion and split-and-merge
 */

use super::level::Level;
use super::types::SplitOutcome;
use super::{DynamicQueue, QueueResult};
use crate::core::errors::QueueError;
use crate::core::types::Pid;
use crate::process::{Process, ProcessClass};
use log::{debug, trace, warn};

impl DynamicQueue {
    /// Add a process to the top level
    ///
    /// Foreground processes go to the tail, background processes to the head.
    /// A pid the queue already holds is rejected with `InvalidProcess`.
    pub fn enqueue(&mut self, process: Process) -> QueueResult<()> {
        let pid = process.pid();
        if self.members.contains(&pid) {
            warn!("Rejected enqueue of process {}: already queued", pid);
            return Err(QueueError::InvalidProcess(pid));
        }

        let class = process.class();
        let top = self.top_or_create();
        match class {
            ProcessClass::Foreground => top.processes.push_back(process),
            ProcessClass::Background => top.processes.push_front(process),
        }
        self.members.insert(pid);

        trace!("Process {} enqueued ({})", pid, class.as_str());
        Ok(())
    }

    /// Remove the process at the tail of the top level
    ///
    /// Drops the top level if this empties it.
    pub fn dequeue(&mut self) -> QueueResult<Process> {
        let top = self.top.as_mut().ok_or(QueueError::EmptyStructure)?;
        let process = top
            .processes
            .pop_back()
            .ok_or(QueueError::EmptyStructure)?;

        if top.is_empty() {
            self.pop_top_level();
        }
        self.members.remove(&process.pid());

        trace!("Process {} dequeued", process.pid());
        Ok(process)
    }

    /// Dequeue one process and append it to the tail of the top level
    ///
    /// When the dequeue drops the top level, the process lands on the tail of
    /// the level that was beneath it.
    pub fn promote(&mut self) -> QueueResult<Pid> {
        let process = self.dequeue()?;
        let pid = process.pid();
        self.members.insert(pid);
        self.top_or_create().processes.push_back(process);

        trace!("Process {} promoted within top level", pid);
        Ok(pid)
    }

    /// Move the tail process of the bottom level to the tail of the top level
    pub fn promote_lowest(&mut self) -> QueueResult<Pid> {
        if self.level_count <= 1 {
            return self.promote();
        }

        // Walk to the level directly above the bottom one
        let depth = self.level_count - 2;
        let mut parent = self.top.as_deref_mut().ok_or(QueueError::EmptyStructure)?;
        for _ in 0..depth {
            parent = parent
                .lower
                .as_deref_mut()
                .ok_or(QueueError::EmptyStructure)?;
        }

        let bottom = parent
            .lower
            .as_deref_mut()
            .ok_or(QueueError::EmptyStructure)?;
        let process = bottom
            .processes
            .pop_back()
            .ok_or(QueueError::EmptyStructure)?;
        if bottom.is_empty() {
            parent.lower = None;
            self.level_count -= 1;
        }

        let pid = process.pid();
        self.top_or_create().processes.push_back(process);

        debug!(
            "Process {} promoted from bottom level (levels: {})",
            pid, self.level_count
        );
        Ok(pid)
    }

    /// Split the top level when the stack holds more than `threshold` levels
    ///
    /// The tail half of the top level's processes moves into a new level,
    /// keeping their relative order. The new level becomes the top. The old
    /// top keeps at least half of its processes, so a split always adds
    /// exactly one level and moves no process out of the queue.
    pub fn split_n_merge(&mut self, threshold: usize) -> SplitOutcome {
        if self.level_count <= threshold {
            return SplitOutcome::BelowThreshold;
        }
        self.split_top()
    }

    /// Split the top level until it holds no more than `max(threshold, 1)` processes
    ///
    /// Returns the number of splits performed.
    pub fn rebalance(&mut self, threshold: usize) -> usize {
        let capacity = threshold.max(1);
        let mut splits = 0;

        while self.top.as_ref().map_or(false, |top| top.len() > capacity) {
            if !self.split_top().is_split() {
                break;
            }
            splits += 1;
        }

        if splits > 0 {
            debug!(
                "Rebalanced with {} splits (threshold: {}, levels: {})",
                splits, threshold, self.level_count
            );
        }
        splits
    }

    fn split_top(&mut self) -> SplitOutcome {
        let Some(top) = self.top.as_mut() else {
            return SplitOutcome::Skipped;
        };
        let half = top.len() / 2;
        if half == 0 {
            return SplitOutcome::Skipped;
        }

        // The tail half moves as one block; the old top keeps len - half >= 1
        let tail = top.processes.split_off(top.len() - half);
        let mut level = Level::new();
        level.processes = tail;

        let moved = level.len();
        level.lower = self.top.take();
        self.top = Some(Box::new(level));
        self.level_count += 1;

        debug!(
            "Split {} processes into a new top level (levels: {})",
            moved, self.level_count
        );
        SplitOutcome::Split { moved }
    }

    fn top_or_create(&mut self) -> &mut Level {
        if self.top.is_none() {
            self.level_count += 1;
        }
        self.top.get_or_insert_with(|| Box::new(Level::new()))
    }

    fn pop_top_level(&mut self) {
        if let Some(mut level) = self.top.take() {
            self.top = level.lower.take();
            self.level_count -= 1;
        }
    }
}
