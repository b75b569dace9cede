/*!
 * Timers
 * Real and immediate implementations of the driver's timing collaborator
 */

use super::traits::Timer;
use futures::future::{self, BoxFuture, FutureExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Sleeps on the tokio timer wheel
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed()
    }
}

/// Completes every sleep at once and counts what was requested
///
/// Makes tick loops run back to back, e.g. with a bounded `max_ticks`.
#[derive(Debug, Default)]
pub struct ImmediateTimer {
    sleeps: AtomicU64,
    requested_micros: AtomicU64,
}

impl ImmediateTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sleeps requested so far
    pub fn sleeps(&self) -> u64 {
        self.sleeps.load(Ordering::Relaxed)
    }

    /// Sum of all requested durations
    pub fn requested(&self) -> Duration {
        Duration::from_micros(self.requested_micros.load(Ordering::Relaxed))
    }
}

impl Timer for ImmediateTimer {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.sleeps.fetch_add(1, Ordering::Relaxed);
        self.requested_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        future::ready(()).boxed()
    }
}
