/*!
 * Dynamic Queue Kernel - Main Entry Point
 *
 * Creates the process population, loads it into the dynamic queue and runs
 * the scheduler driver until Ctrl+C or the configured tick limit.
 */

use dynqueue_kernel::{
    init_tracing, DriverTask, DynamicQueue, ProcessSupply, SchedulerDriver, ShellExecutor,
    SimulationConfig, TokioTimer,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize structured tracing
    init_tracing();

    info!("Dynamic queue kernel starting...");

    let config = SimulationConfig::from_env()?;
    info!(
        total_processes = config.total_processes,
        target_levels = config.target_levels,
        tick_interval_ms = config.tick_interval_ms,
        max_ticks = ?config.max_ticks,
        display = config.display.as_str(),
        "Configuration loaded"
    );

    // Bulk process creation: even pids foreground, odd pids background
    let mut queue = DynamicQueue::new();
    for process in ProcessSupply::new().spawn_batch(config.total_processes) {
        queue.enqueue(process)?;
    }
    info!(
        processes = queue.len(),
        levels = queue.level_count(),
        "Processes enqueued"
    );

    let driver = SchedulerDriver::new(
        Arc::new(RwLock::new(queue)),
        config.display.build(),
        Arc::new(ShellExecutor::new()),
        Arc::new(TokioTimer),
        config.driver_config(),
    )?;

    let mut task = DriverTask::spawn(driver);
    info!("Scheduler running - press Ctrl+C to exit");

    let finished = tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "Failed to listen for Ctrl+C");
            }
            None
        }
        stats = task.wait() => stats,
    };

    let stats = match finished {
        Some(stats) => Some(stats),
        None => task.shutdown().await,
    };

    match stats {
        Some(stats) => info!(
            ticks = stats.ticks,
            promotions = stats.promotions,
            splits = stats.splits,
            threshold_errors = stats.threshold_errors,
            "Scheduler stopped"
        ),
        None => warn!("Scheduler stopped without final statistics"),
    }

    Ok(())
}
