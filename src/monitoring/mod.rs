/*!
 * Monitoring
 * Structured tracing setup and status display collaborators
 */

mod display;
mod tracer;

pub use display::{ConsoleDisplay, DisplayKind, JsonDisplay, LogDisplay, MemoryDisplay};
pub use tracer::init_tracing;
