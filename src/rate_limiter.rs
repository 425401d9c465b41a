//! Process-wide throttle for outbound search-engine calls.
//!
//! One instance is constructed at startup and shared by `Arc` across every
//! domain search task. The timestamp of the last permitted call is the only
//! mutable state shared by the pipeline, so it lives behind a
//! `tokio::sync::Mutex`: two tasks can never both observe "interval elapsed"
//! for the same window. Each caller reserves its slot while holding the lock
//! and then sleeps outside it, so waiting to be throttled never blocks
//! unrelated tasks.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

/// Default minimum interval between outbound search calls.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(200);

/// Serializes outbound search-engine calls to a minimum inter-call interval.
#[derive(Debug)]
pub struct SearchRateLimiter {
    min_interval: Duration,
    /// Time of the most recently granted slot. Never reset for the process
    /// lifetime.
    last_call: Mutex<Option<Instant>>,
}

impl SearchRateLimiter {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Wait until at least the minimum interval has elapsed since the last
    /// permitted call, then record this call and return.
    pub async fn throttle(&self) {
        let slot = {
            let mut last = self.last_call.lock().await;
            let now = Instant::now();
            let slot = match *last {
                Some(previous) => {
                    let earliest = previous + self.min_interval;
                    if earliest > now { earliest } else { now }
                }
                None => now,
            };
            *last = Some(slot);
            slot
        };

        let now = Instant::now();
        if slot > now {
            trace!(wait_ms = (slot - now).as_millis() as u64, "rate limited");
            tokio::time::sleep_until(slot).await;
        }
    }
}

impl Default for SearchRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
