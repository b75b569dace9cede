/*!
 * Dynamic Queue Kernel Library
 * Multi-level feedback queue simulation exposed as a library
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::config::SimulationConfig;
pub use crate::core::errors::*;
pub use crate::core::types::{KernelResult, Pid};
pub use crate::monitoring::{
    init_tracing, ConsoleDisplay, DisplayKind, JsonDisplay, LogDisplay, MemoryDisplay,
};
pub use crate::process::{
    ClassPolicy, ExitStatus, ParityPolicy, Process, ProcessClass, ProcessSupply, ShellExecutor,
};
pub use crate::scheduler::{
    AlarmClock, CommandExecutor, DriverCommand, DriverConfig, DriverStats, DriverStatsSnapshot,
    DriverTask, DynamicQueue, ImmediateTimer, QueueResult, QueueSnapshot, SchedulerDriver,
    SplitOutcome, StatusDisplay, ThresholdPolicy, TickReport, Timer, TokioTimer,
};
