/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dynamic queue errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum QueueError {
    #[error("Dynamic queue is empty")]
    #[diagnostic(
        code(queue::empty_structure),
        help("No level holds a process. Enqueue processes before dequeuing or promoting.")
    )]
    EmptyStructure,

    #[error("Process {0} is already held by the queue")]
    #[diagnostic(
        code(queue::invalid_process),
        help("A pid may live in exactly one level. Dequeue it before enqueuing it again.")
    )]
    InvalidProcess(Pid),
}

/// Threshold policy errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ThresholdError {
    #[error("Cannot compute threshold for {total_processes} processes over zero levels")]
    #[diagnostic(
        code(threshold::division_by_zero),
        help("The level count used for the threshold must be at least 1.")
    )]
    DivisionByZero { total_processes: usize },
}

/// Configuration errors raised while reading the environment
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Check the environment variable; it must parse as the documented type.")
    )]
    InvalidValue { key: String, value: String },

    #[error("{key} out of range: {reason}")]
    #[diagnostic(code(config::out_of_range))]
    OutOfRange { key: String, reason: String },
}

/// Unified kernel error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Queue error: {0}")]
    #[diagnostic(transparent)]
    Queue(#[from] QueueError),

    #[error("Threshold error: {0}")]
    #[diagnostic(transparent)]
    Threshold(#[from] ThresholdError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
