/*!
 * Scheduler Driver
 *
 * Runs the dynamic queue on a fixed cadence. Every tick performs, in order:
 * status report, bottom-level promotion, threshold refresh and rebalancing.
 * The loop then suspends through the injected timer until the next tick or
 * until a control command arrives.
 */

use super::atomic_stats::DriverStats;
use super::threshold::ThresholdPolicy;
use super::traits::{CommandExecutor, StatusDisplay, Timer};
use super::types::{DriverStatsSnapshot, TickReport};
use super::DynamicQueue;
use crate::core::limits::{DEFAULT_TARGET_LEVELS, DEFAULT_TICK_INTERVAL, MIN_TICK_INTERVAL};
use crate::core::types::KernelResult;
use crate::process::ExitStatus;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Driver tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub tick_interval: Duration,
    /// Level count the threshold divides the population by
    pub target_levels: usize,
    /// Stop after this many ticks; `None` runs until shutdown
    pub max_ticks: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            target_levels: DEFAULT_TARGET_LEVELS,
            max_ticks: None,
        }
    }
}

/// Control messages for the driver loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCommand {
    /// Change the pause between ticks
    SetInterval(Duration),
    /// Stop ticking until resumed
    Pause,
    Resume,
    /// Run one tick immediately, even while paused
    Trigger,
    /// Forward a command string to the execution collaborator
    Execute(String),
    /// Leave the loop
    Shutdown,
}

/// Ties the queue, the threshold policy and the collaborators together
pub struct SchedulerDriver {
    queue: Arc<RwLock<DynamicQueue>>,
    policy: ThresholdPolicy,
    display: Arc<dyn StatusDisplay>,
    executor: Arc<dyn CommandExecutor>,
    timer: Arc<dyn Timer>,
    config: DriverConfig,
    stats: Arc<DriverStats>,
    active: bool,
}

impl SchedulerDriver {
    /// Build a driver; fails when `config.target_levels` is zero
    pub fn new(
        queue: Arc<RwLock<DynamicQueue>>,
        display: Arc<dyn StatusDisplay>,
        executor: Arc<dyn CommandExecutor>,
        timer: Arc<dyn Timer>,
        config: DriverConfig,
    ) -> KernelResult<Self> {
        let population = queue.read().len();
        let policy = ThresholdPolicy::new(population, config.target_levels)?;

        info!(
            population,
            target_levels = config.target_levels,
            threshold = policy.threshold(),
            interval_ms = config.tick_interval.as_millis() as u64,
            "Scheduler driver initialized"
        );

        Ok(Self {
            queue,
            policy,
            display,
            executor,
            timer,
            config,
            stats: Arc::new(DriverStats::new()),
            active: true,
        })
    }

    pub fn queue(&self) -> Arc<RwLock<DynamicQueue>> {
        Arc::clone(&self.queue)
    }

    pub fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn stats(&self) -> Arc<DriverStats> {
        Arc::clone(&self.stats)
    }

    /// Run one scheduling step
    pub fn tick(&mut self) -> TickReport {
        let tick = self.stats.inc_ticks();

        // One guard for the whole tick so the report matches what is mutated
        let mut queue = self.queue.write();
        queue.print_status(self.display.as_ref());

        let promoted = queue.promote_lowest().ok();
        if promoted.is_some() {
            self.stats.inc_promotions();
        }

        let population = queue.len();
        match self.policy.recompute(population, self.config.target_levels) {
            Ok(_) => self.stats.inc_threshold_updates(),
            Err(e) => {
                warn!(error = %e, tick, "Threshold refresh failed; keeping previous value");
                self.stats.inc_threshold_errors();
            }
        }

        let threshold = self.policy.threshold();
        let splits = queue.rebalance(threshold);
        self.stats.add_splits(splits);

        let report = TickReport {
            tick,
            promoted,
            threshold,
            splits,
            population,
            level_count: queue.level_count(),
        };
        debug!(?report, "Scheduler tick");
        report
    }

    /// Forward a command to the execution collaborator
    pub fn execute(&self, command: &str) -> ExitStatus {
        self.stats.inc_commands();
        let status = self.executor.execute(command);
        debug!(command, ?status, "Command forwarded");
        status
    }

    /// Drive ticks until shutdown, `max_ticks`, or a closed runtime
    ///
    /// The first tick runs without waiting. One pending sleep lives across
    /// loop iterations, so commands arriving between ticks do not push the
    /// next tick back. It is re-armed after it fires or when the interval
    /// changes.
    #[instrument(name = "scheduler_driver", skip_all, fields(run_id = %Uuid::new_v4()))]
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<DriverCommand>,
    ) -> DriverStatsSnapshot {
        let mut sleep = self.timer.sleep(Duration::ZERO);
        info!(
            interval_ms = self.config.tick_interval.as_millis() as u64,
            max_ticks = ?self.config.max_ticks,
            "Scheduler loop started"
        );

        loop {
            if self.reached_max_ticks() {
                info!(ticks = self.stats.ticks(), "Tick limit reached");
                break;
            }

            tokio::select! {
                biased;

                Some(cmd) = commands.recv() => {
                    let interval = self.config.tick_interval;
                    if !self.handle_command(cmd) {
                        info!("Scheduler loop shutting down");
                        break;
                    }
                    if self.config.tick_interval != interval {
                        sleep = self.timer.sleep(self.config.tick_interval);
                    }
                }

                _ = &mut sleep => {
                    sleep = self.timer.sleep(self.config.tick_interval);
                    if self.active {
                        self.tick();
                    }
                }
            }
        }

        self.stats.snapshot()
    }

    fn handle_command(&mut self, cmd: DriverCommand) -> bool {
        match cmd {
            DriverCommand::SetInterval(interval) => {
                self.config.tick_interval = interval.max(MIN_TICK_INTERVAL);
                info!(
                    interval_ms = self.config.tick_interval.as_millis() as u64,
                    "Tick interval updated"
                );
            }
            DriverCommand::Pause => {
                info!("Scheduler loop paused");
                self.active = false;
            }
            DriverCommand::Resume => {
                info!("Scheduler loop resumed");
                self.active = true;
            }
            DriverCommand::Trigger => {
                self.tick();
            }
            DriverCommand::Execute(command) => {
                self.execute(&command);
            }
            DriverCommand::Shutdown => return false,
        }
        true
    }

    fn reached_max_ticks(&self) -> bool {
        self.config
            .max_ticks
            .map_or(false, |max| self.stats.ticks() >= max)
    }
}
