/*!
 * Process Module
 * Process records, bulk supply and the command execution stub
 */

pub mod shell;
pub mod supply;
pub mod types;

// Re-export public API
pub use shell::{ExitStatus, ShellExecutor};
pub use supply::{ClassPolicy, ParityPolicy, ProcessSupply};
pub use types::{Process, ProcessClass};
