//! Session refresh ticker.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Smallest accepted period. Shorter requests are raised to this.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Periodic refresh for one session.
///
/// The first tick fires one full period after creation, never immediately.
/// Dropping the ticker stops it.
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
    period: Duration,
}

impl Ticker {
    /// Start a ticker with the given period.
    pub fn new(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, period }
    }

    /// Wait for the next tick. Cancel safe.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Interval between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }
}
