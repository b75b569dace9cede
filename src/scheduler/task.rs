/*!
 * Driver Task - Background Scheduling Loop
 *
 * Spawns a [`SchedulerDriver`] on the tokio runtime and hands back a control
 * handle.
 *
 * # Shutdown
 *
 * 1. **Preferred:** `shutdown().await` sends `Shutdown`, awaits the loop and
 *    returns the final counters. It consumes the handle.
 * 2. **Natural end:** `wait().await` resolves once a driver configured with
 *    `max_ticks` finishes on its own. It is cancel-safe, so it can race a
 *    Ctrl+C in `select!`.
 * 3. **Fallback:** dropping the handle while the loop still runs aborts it and
 *    logs a warning.
 */

use super::driver::{DriverCommand, SchedulerDriver};
use super::types::DriverStatsSnapshot;
use super::DriverStats;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle to the driver background task
pub struct DriverTask {
    command_tx: mpsc::UnboundedSender<DriverCommand>,
    handle: Option<JoinHandle<DriverStatsSnapshot>>,
    stats: Arc<DriverStats>,
}

impl DriverTask {
    /// Spawn the driver loop; must be called inside a tokio runtime
    pub fn spawn(driver: SchedulerDriver) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let stats = driver.stats();

        let handle = tokio::spawn(driver.run(command_rx));
        info!("Driver task spawned");

        Self {
            command_tx,
            handle: Some(handle),
            stats,
        }
    }

    /// Live counters shared with the running loop
    pub fn stats(&self) -> Arc<DriverStats> {
        Arc::clone(&self.stats)
    }

    pub fn set_interval(&self, interval: Duration) {
        self.send(DriverCommand::SetInterval(interval));
    }

    pub fn pause(&self) {
        self.send(DriverCommand::Pause);
    }

    pub fn resume(&self) {
        self.send(DriverCommand::Resume);
    }

    /// Run one tick as soon as the loop sees the command
    pub fn trigger(&self) {
        self.send(DriverCommand::Trigger);
    }

    pub fn execute(&self, command: impl Into<String>) {
        self.send(DriverCommand::Execute(command.into()));
    }

    /// Whether the loop has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the loop to end on its own
    ///
    /// Returns `None` if the loop was already collected or panicked.
    pub async fn wait(&mut self) -> Option<DriverStatsSnapshot> {
        let handle = self.handle.as_mut()?;
        let result = handle.await;
        self.handle = None;

        match result {
            Ok(stats) => {
                info!("Driver task finished after {} ticks", stats.ticks);
                Some(stats)
            }
            Err(e) => {
                warn!("Driver task ended abnormally: {}", e);
                None
            }
        }
    }

    /// Stop the loop gracefully and collect its final counters
    pub async fn shutdown(mut self) -> Option<DriverStatsSnapshot> {
        self.send(DriverCommand::Shutdown);
        let stats = self.wait().await;
        if stats.is_some() {
            info!("Driver task shutdown complete");
        }
        stats
    }

    fn send(&self, cmd: DriverCommand) {
        // The loop may already be gone after max_ticks; nothing to deliver then
        let _ = self.command_tx.send(cmd);
    }
}

impl Drop for DriverTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                warn!(
                    "DriverTask dropped without calling shutdown() - aborting task immediately. \
                     Use `task.shutdown().await` for graceful cleanup."
                );
            }
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::MemoryDisplay;
    use crate::process::{ProcessSupply, ShellExecutor};
    use crate::scheduler::timer::{ImmediateTimer, TokioTimer};
    use crate::scheduler::{DriverConfig, DynamicQueue, Timer};
    use parking_lot::RwLock;

    fn driver(
        timer: Arc<dyn Timer>,
        display: Arc<MemoryDisplay>,
        config: DriverConfig,
    ) -> SchedulerDriver {
        let mut queue = DynamicQueue::new();
        for process in ProcessSupply::new().spawn_batch(6) {
            queue.enqueue(process).unwrap();
        }
        SchedulerDriver::new(
            Arc::new(RwLock::new(queue)),
            display,
            Arc::new(ShellExecutor::new()),
            timer,
            config,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_driver_task_lifecycle() {
        let display = Arc::new(MemoryDisplay::new());
        let config = DriverConfig {
            tick_interval: Duration::from_millis(5),
            ..DriverConfig::default()
        };
        let task = DriverTask::spawn(driver(Arc::new(TokioTimer), display.clone(), config));

        tokio::time::sleep(Duration::from_millis(20)).await;
        task.pause();
        task.set_interval(Duration::from_millis(1));
        task.trigger();
        task.resume();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let stats = task.shutdown().await.unwrap();
        assert!(stats.ticks >= 1);
        assert_eq!(display.lines().len() as u64, stats.ticks);
    }

    #[tokio::test]
    async fn test_wait_returns_after_max_ticks() {
        let display = Arc::new(MemoryDisplay::new());
        let config = DriverConfig {
            max_ticks: Some(5),
            ..DriverConfig::default()
        };
        let timer = Arc::new(ImmediateTimer::new());
        let mut task = DriverTask::spawn(driver(timer, display.clone(), config));

        let stats = task.wait().await.unwrap();
        assert_eq!(stats.ticks, 5);
        assert!(task.is_finished());

        // Loop is gone; shutdown has nothing left to collect
        assert_eq!(task.shutdown().await, None);
    }

    #[tokio::test]
    async fn test_drop_without_shutdown_aborts() {
        let display = Arc::new(MemoryDisplay::new());
        let config = DriverConfig {
            tick_interval: Duration::from_millis(5),
            ..DriverConfig::default()
        };
        let task = DriverTask::spawn(driver(Arc::new(TokioTimer), display.clone(), config));
        let stats = task.stats();

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(task);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let ticks_after_abort = stats.ticks();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(stats.ticks(), ticks_after_abort);
    }
}
