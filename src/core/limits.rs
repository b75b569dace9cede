/*!
 * System Limits and Constants
 *
 * Centralized location for simulation defaults and bounds.
 * Values are grouped by domain (process supply, threshold, driver).
 */

use std::time::Duration;

// =============================================================================
// PROCESS SUPPLY
// =============================================================================

/// Processes created at startup when nothing else is configured
pub const DEFAULT_TOTAL_PROCESSES: usize = 20;

/// Upper bound on the bulk process supply
/// Pids are u32 and the status line prints every pid each tick
pub const MAX_PROCESSES: usize = 100_000;

// =============================================================================
// THRESHOLD POLICY
// =============================================================================

/// Level count the threshold is computed against
/// threshold = total_processes / DEFAULT_TARGET_LEVELS
pub const DEFAULT_TARGET_LEVELS: usize = 5;

// =============================================================================
// SCHEDULER DRIVER
// =============================================================================

/// Pause between scheduler ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest accepted tick interval
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Label that prefixes every rendered status line
pub const STATUS_LABEL: &str = "DQ:";
