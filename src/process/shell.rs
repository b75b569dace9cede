/*!
 * Shell Execution Stub
 * Command execution collaborator; records commands without running them
 */

use crate::scheduler::traits::CommandExecutor;
use log::info;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Outcome reported for an executed command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    Success,
    Failure(i32),
}

impl ExitStatus {
    pub const fn success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Executor that never spawns anything
///
/// Every command is logged and kept in a history so callers can inspect what
/// the scheduler asked for.
#[derive(Debug, Default)]
pub struct ShellExecutor {
    history: Mutex<Vec<String>>,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &str) -> ExitStatus {
        let command = command.trim();
        if command.is_empty() {
            return ExitStatus::Failure(1);
        }

        info!("Shell command accepted (not executed): {}", command);
        self.history.lock().push(command.to_string());
        ExitStatus::Success
    }
}
