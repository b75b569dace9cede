/*!
 * Scheduler Driver Tests
 * Tick ordering, threshold refresh and task control
 */

use dynqueue_kernel::{
    CommandExecutor, DriverCommand, DriverConfig, DriverTask, DynamicQueue, ExitStatus,
    ImmediateTimer, MemoryDisplay, ProcessSupply, SchedulerDriver, ShellExecutor, TokioTimer,
};
use parking_lot::RwLock;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn shared_queue(count: usize) -> Arc<RwLock<DynamicQueue>> {
    let mut queue = DynamicQueue::new();
    for process in ProcessSupply::new().spawn_batch(count) {
        queue.enqueue(process).unwrap();
    }
    Arc::new(RwLock::new(queue))
}

fn bounded_driver(
    queue: Arc<RwLock<DynamicQueue>>,
    display: Arc<MemoryDisplay>,
    timer: Arc<ImmediateTimer>,
    max_ticks: u64,
) -> SchedulerDriver {
    SchedulerDriver::new(
        queue,
        display,
        Arc::new(ShellExecutor::new()),
        timer,
        DriverConfig {
            tick_interval: Duration::from_millis(100),
            target_levels: 5,
            max_ticks: Some(max_ticks),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_bounded_run_conserves_population() {
    let queue = shared_queue(20);
    let display = Arc::new(MemoryDisplay::new());
    let timer = Arc::new(ImmediateTimer::new());
    let driver = bounded_driver(queue.clone(), display.clone(), timer.clone(), 25);

    let (_tx, rx) = mpsc::unbounded_channel();
    let stats = driver.run(rx).await;

    assert_eq!(stats.ticks, 25);
    assert_eq!(stats.threshold_updates, 25);
    assert_eq!(stats.threshold_errors, 0);
    assert_eq!(display.lines().len(), 25);

    let queue = queue.read();
    assert_eq!(queue.len(), 20);
    assert_eq!(queue.snapshot().process_count(), 20);
    assert!(queue.level_sizes().iter().all(|&size| size > 0));
}

#[tokio::test]
async fn test_every_status_line_lists_all_processes() {
    let display = Arc::new(MemoryDisplay::new());
    let driver = bounded_driver(
        shared_queue(12),
        display.clone(),
        Arc::new(ImmediateTimer::new()),
        10,
    );

    let (_tx, rx) = mpsc::unbounded_channel();
    driver.run(rx).await;

    for line in display.lines() {
        let mut pids: Vec<u32> = line
            .trim_start_matches("DQ:")
            .split_whitespace()
            .map(|pid| pid.parse().unwrap())
            .collect();
        pids.sort_unstable();
        assert_eq!(pids, (0..12).collect::<Vec<u32>>());
    }
}

#[tokio::test]
async fn test_timer_sees_configured_interval() {
    let timer = Arc::new(ImmediateTimer::new());
    let driver = bounded_driver(
        shared_queue(4),
        Arc::new(MemoryDisplay::new()),
        timer.clone(),
        3,
    );

    let (_tx, rx) = mpsc::unbounded_channel();
    driver.run(rx).await;

    // The first tick runs without waiting; every tick re-arms a full interval
    assert_eq!(timer.sleeps(), 4);
    assert_eq!(timer.requested(), Duration::from_millis(300));
}

#[tokio::test]
async fn test_interval_command_applies_to_following_sleeps() {
    let timer = Arc::new(ImmediateTimer::new());
    let driver = bounded_driver(
        shared_queue(4),
        Arc::new(MemoryDisplay::new()),
        timer.clone(),
        2,
    );

    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(DriverCommand::SetInterval(Duration::from_millis(7)))
        .unwrap();
    let stats = driver.run(rx).await;

    // The pending zero-delay sleep is replaced by one at the new interval
    assert_eq!(stats.ticks, 2);
    assert_eq!(timer.sleeps(), 4);
    assert_eq!(timer.requested(), Duration::from_millis(21));
}

#[tokio::test]
async fn test_frequent_commands_do_not_stall_ticks() {
    let executor = Arc::new(CountingExecutor {
        seen: parking_lot::Mutex::new(Vec::new()),
    });
    let driver = SchedulerDriver::new(
        shared_queue(8),
        Arc::new(MemoryDisplay::new()),
        executor.clone(),
        Arc::new(TokioTimer),
        DriverConfig {
            tick_interval: Duration::from_millis(40),
            target_levels: 4,
            max_ticks: None,
        },
    )
    .unwrap();
    let task = DriverTask::spawn(driver);

    // Commands arrive four times per tick interval for about ten intervals
    for _ in 0..40 {
        task.execute("ps");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let stats = task.shutdown().await.unwrap();
    assert_eq!(stats.commands_executed, 40);
    assert!(
        stats.ticks >= 5,
        "expected periodic ticks between commands, got {}",
        stats.ticks
    );
    assert_eq!(executor.seen.lock().len(), 40);
}

struct CountingExecutor {
    seen: parking_lot::Mutex<Vec<String>>,
}

impl CommandExecutor for CountingExecutor {
    fn execute(&self, command: &str) -> ExitStatus {
        self.seen.lock().push(command.to_string());
        ExitStatus::Failure(127)
    }
}

#[tokio::test]
async fn test_task_forwards_commands_to_executor() {
    let executor = Arc::new(CountingExecutor {
        seen: parking_lot::Mutex::new(Vec::new()),
    });
    let driver = SchedulerDriver::new(
        shared_queue(4),
        Arc::new(MemoryDisplay::new()),
        executor.clone(),
        Arc::new(ImmediateTimer::new()),
        DriverConfig {
            tick_interval: Duration::from_millis(50),
            ..DriverConfig::default()
        },
    )
    .unwrap();

    let task = DriverTask::spawn(driver);
    task.pause();
    task.execute("uptime");
    task.execute("whoami");
    let stats = task.shutdown().await.unwrap();

    assert_eq!(stats.commands_executed, 2);
    assert_eq!(
        *executor.seen.lock(),
        vec!["uptime".to_string(), "whoami".to_string()]
    );
}

#[tokio::test]
async fn test_concurrent_producer_shares_queue() {
    let queue = shared_queue(4);
    let driver = SchedulerDriver::new(
        queue.clone(),
        Arc::new(MemoryDisplay::new()),
        Arc::new(ShellExecutor::new()),
        Arc::new(ImmediateTimer::new()),
        DriverConfig {
            max_ticks: Some(50),
            ..DriverConfig::default()
        },
    )
    .unwrap();

    let mut task = DriverTask::spawn(driver);
    let producer = {
        let queue = queue.clone();
        tokio::spawn(async move {
            let mut supply = ProcessSupply::new();
            supply.spawn_batch(4);
            for process in supply.spawn_batch(16) {
                queue.write().enqueue(process).unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    producer.await.unwrap();
    task.wait().await.unwrap();

    assert_eq!(queue.read().len(), 20);
}
