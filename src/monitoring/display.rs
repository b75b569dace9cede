/*!
 * Status Displays
 * Renderers for queue snapshots
 */

use crate::core::errors::ConfigError;
use crate::scheduler::{QueueSnapshot, StatusDisplay};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

/// Writes `DQ: ...` lines to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDisplay;

impl ConsoleDisplay {
    /// The line written for one snapshot
    pub fn format(snapshot: &QueueSnapshot) -> String {
        snapshot.status_line()
    }
}

impl StatusDisplay for ConsoleDisplay {
    fn render(&self, snapshot: &QueueSnapshot) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", Self::format(snapshot)) {
            log::warn!("Failed to write queue status: {}", e);
        }
    }
}

/// Emits each snapshot as a tracing event
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDisplay;

impl StatusDisplay for LogDisplay {
    fn render(&self, snapshot: &QueueSnapshot) {
        tracing::info!(
            levels = snapshot.level_count(),
            processes = snapshot.process_count(),
            "{}",
            snapshot.status_line()
        );
    }
}

/// One JSON object per snapshot on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDisplay;

impl JsonDisplay {
    /// Compact single-line JSON for one snapshot
    pub fn encode(snapshot: &QueueSnapshot) -> serde_json::Result<String> {
        serde_json::to_string(snapshot)
    }
}

impl StatusDisplay for JsonDisplay {
    fn render(&self, snapshot: &QueueSnapshot) {
        match Self::encode(snapshot) {
            Ok(json) => {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", json) {
                    log::warn!("Failed to write queue status: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize queue status: {}", e),
        }
    }
}

/// Keeps rendered status lines in memory
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    lines: Mutex<Vec<String>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines rendered so far, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl StatusDisplay for MemoryDisplay {
    fn render(&self, snapshot: &QueueSnapshot) {
        self.lines.lock().push(snapshot.status_line());
    }
}

/// Display selection for configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    #[default]
    Console,
    Log,
    Json,
}

impl DisplayKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Log => "log",
            Self::Json => "json",
        }
    }

    pub fn build(&self) -> Arc<dyn StatusDisplay> {
        match self {
            Self::Console => Arc::new(ConsoleDisplay),
            Self::Log => Arc::new(LogDisplay),
            Self::Json => Arc::new(JsonDisplay),
        }
    }
}

impl FromStr for DisplayKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(Self::Console),
            "log" | "tracing" => Ok(Self::Log),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "DYNQ_DISPLAY".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
