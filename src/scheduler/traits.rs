/*!
 * Scheduler Collaborator Traits
 * Interfaces the driver calls out to for display, execution and timing
 */

use super::types::QueueSnapshot;
use crate::process::ExitStatus;
use futures::future::BoxFuture;
use std::time::Duration;

/// Renders queue snapshots; fire-and-forget
pub trait StatusDisplay: Send + Sync {
    fn render(&self, snapshot: &QueueSnapshot);
}

/// Accepts command strings on behalf of the scheduler
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, command: &str) -> ExitStatus;
}

/// Suspends the driver between ticks
pub trait Timer: Send + Sync {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}
