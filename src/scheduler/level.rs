/*!
 * Queue Levels
 * One priority tier of the dynamic queue and the link to the tier below it
 */

use crate::core::types::Pid;
use crate::process::Process;
use std::collections::VecDeque;

/// A single level in the stack
///
/// Head of `processes` is index 0; dequeues take from the tail.
#[derive(Debug, Default)]
pub(super) struct Level {
    pub processes: VecDeque<Process>,
    pub lower: Option<Box<Level>>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Pids in stored order, head to tail
    pub fn pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.processes.iter().map(Process::pid)
    }
}

/// Borrowing iterator over the chain, top level first
pub(super) struct Levels<'a> {
    next: Option<&'a Level>,
}

impl<'a> Levels<'a> {
    pub fn new(top: Option<&'a Level>) -> Self {
        Self { next: top }
    }
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a Level;

    fn next(&mut self) -> Option<Self::Item> {
        let level = self.next?;
        self.next = level.lower.as_deref();
        Some(level)
    }
}
