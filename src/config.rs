/*!
 * Simulation Configuration
 * Environment-driven settings with defaults from `core::limits`
 *
 * Environment variables:
 * - DYNQ_TOTAL_PROCESSES: processes created at startup (default: 20)
 * - DYNQ_TARGET_LEVELS: level count the threshold divides by (default: 5)
 * - DYNQ_TICK_INTERVAL_MS: pause between ticks (default: 1000)
 * - DYNQ_MAX_TICKS: stop after this many ticks (default: unbounded)
 * - DYNQ_DISPLAY: console | log | json (default: console)
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{
    DEFAULT_TARGET_LEVELS, DEFAULT_TICK_INTERVAL, DEFAULT_TOTAL_PROCESSES, MAX_PROCESSES,
    MIN_TICK_INTERVAL,
};
use crate::monitoring::DisplayKind;
use crate::scheduler::DriverConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Settings for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub total_processes: usize,
    pub target_levels: usize,
    pub tick_interval_ms: u64,
    pub max_ticks: Option<u64>,
    pub display: DisplayKind,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_processes: DEFAULT_TOTAL_PROCESSES,
            target_levels: DEFAULT_TARGET_LEVELS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            max_ticks: None,
            display: DisplayKind::default(),
        }
    }
}

impl SimulationConfig {
    /// Read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = parse_var(&lookup, "DYNQ_TOTAL_PROCESSES")? {
            config.total_processes = value;
        }
        if let Some(value) = parse_var(&lookup, "DYNQ_TARGET_LEVELS")? {
            config.target_levels = value;
        }
        if let Some(value) = parse_var(&lookup, "DYNQ_TICK_INTERVAL_MS")? {
            config.tick_interval_ms = value;
        }
        if let Some(value) = parse_var(&lookup, "DYNQ_MAX_TICKS")? {
            config.max_ticks = Some(value);
        }
        if let Some(value) = parse_var(&lookup, "DYNQ_DISPLAY")? {
            config.display = value;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_levels == 0 {
            return Err(out_of_range("DYNQ_TARGET_LEVELS", "must be at least 1"));
        }
        if self.tick_interval() < MIN_TICK_INTERVAL {
            return Err(out_of_range(
                "DYNQ_TICK_INTERVAL_MS",
                &format!("must be at least {}ms", MIN_TICK_INTERVAL.as_millis()),
            ));
        }
        if self.total_processes > MAX_PROCESSES {
            return Err(out_of_range(
                "DYNQ_TOTAL_PROCESSES",
                &format!("must not exceed {}", MAX_PROCESSES),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            tick_interval: self.tick_interval(),
            target_levels: self.target_levels,
            max_ticks: self.max_ticks,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

fn out_of_range(key: &str, reason: &str) -> ConfigError {
    ConfigError::OutOfRange {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
