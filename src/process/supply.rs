/*!
 * Process Supply
 * Bulk creation of process records with pluggable classification
 */

use super::types::{Process, ProcessClass};
use crate::core::types::Pid;
use log::debug;

/// Decides whether a freshly created process is foreground or background
pub trait ClassPolicy: Send + Sync {
    fn classify(&self, pid: Pid) -> ProcessClass;
}

/// Even pids are foreground, odd pids are background
#[derive(Debug, Clone, Copy, Default)]
pub struct ParityPolicy;

impl ClassPolicy for ParityPolicy {
    #[inline]
    fn classify(&self, pid: Pid) -> ProcessClass {
        if pid % 2 == 0 {
            ProcessClass::Foreground
        } else {
            ProcessClass::Background
        }
    }
}

impl<F> ClassPolicy for F
where
    F: Fn(Pid) -> ProcessClass + Send + Sync,
{
    fn classify(&self, pid: Pid) -> ProcessClass {
        self(pid)
    }
}

/// Sequential pid allocator paired with a classification policy
pub struct ProcessSupply<P: ClassPolicy = ParityPolicy> {
    next_pid: Pid,
    policy: P,
}

impl ProcessSupply<ParityPolicy> {
    pub fn new() -> Self {
        Self::with_policy(ParityPolicy)
    }
}

impl Default for ProcessSupply<ParityPolicy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ClassPolicy> ProcessSupply<P> {
    /// Pids start at 0
    pub fn with_policy(policy: P) -> Self {
        Self { next_pid: 0, policy }
    }

    /// Next pid that `spawn` will hand out
    pub fn next_pid(&self) -> Pid {
        self.next_pid
    }

    pub fn spawn(&mut self) -> Process {
        let pid = self.next_pid;
        self.next_pid += 1;
        Process::new(pid, self.policy.classify(pid))
    }

    /// Create `count` processes with consecutive pids
    pub fn spawn_batch(&mut self, count: usize) -> Vec<Process> {
        let batch: Vec<Process> = (0..count).map(|_| self.spawn()).collect();
        debug!(
            "Spawned {} processes (next pid: {})",
            batch.len(),
            self.next_pid
        );
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_policy_alternates() {
        let mut supply = ProcessSupply::new();
        let batch = supply.spawn_batch(4);

        let classes: Vec<ProcessClass> = batch.iter().map(Process::class).collect();
        assert_eq!(
            classes,
            vec![
                ProcessClass::Foreground,
                ProcessClass::Background,
                ProcessClass::Foreground,
                ProcessClass::Background,
            ]
        );
        assert_eq!(supply.next_pid(), 4);
    }

    #[test]
    fn test_closure_policy() {
        let mut supply = ProcessSupply::with_policy(|_pid: Pid| ProcessClass::Background);
        assert!(supply.spawn_batch(3).iter().all(|p| !p.is_foreground()));
    }

    #[test]
    fn test_pids_are_sequential_across_batches() {
        let mut supply = ProcessSupply::new();
        supply.spawn_batch(2);
        let second = supply.spawn_batch(2);
        let pids: Vec<Pid> = second.iter().map(Process::pid).collect();
        assert_eq!(pids, vec![2, 3]);
    }
}
