/*!
 * Process Types
 * The process record moved between queue levels
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Foreground/background classification
///
/// Decides which end of a level a process enters: foreground at the tail,
/// background at the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessClass {
    Foreground,
    Background,
}

impl ProcessClass {
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Foreground => "fg",
            Self::Background => "bg",
        }
    }
}

/// Abstract process record
///
/// Not `Clone`: a record is moved into exactly one level and moved out again,
/// so ownership follows its placement in the queue.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pid: Pid,
    class: ProcessClass,
}

impl Process {
    pub const fn new(pid: Pid, class: ProcessClass) -> Self {
        Self { pid, class }
    }

    pub const fn foreground(pid: Pid) -> Self {
        Self::new(pid, ProcessClass::Foreground)
    }

    pub const fn background(pid: Pid) -> Self {
        Self::new(pid, ProcessClass::Background)
    }

    #[inline(always)]
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    #[inline(always)]
    pub const fn class(&self) -> ProcessClass {
        self.class
    }

    #[inline(always)]
    pub const fn is_foreground(&self) -> bool {
        matches!(self.class, ProcessClass::Foreground)
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.pid, self.class.as_str())
    }
}
