//! Fixed-cadence driver for [`GameEngine::tick`](super::GameEngine::tick)
//!
//! The scheduler never touches game state. The caller reports the current
//! status and whether a speed boost is active through [`TickScheduler::sync`],
//! and the scheduler re-arms its interval when the desired cadence changes.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::trace;

use super::state::GameStatus;

pub struct TickScheduler {
    base_period: Duration,
    armed: Option<Armed>,
}

struct Armed {
    period: Duration,
    interval: Interval,
}

impl TickScheduler {
    pub fn new(base_period: Duration) -> Self {
        Self {
            base_period,
            armed: None,
        }
    }

    pub fn from_millis(base_ms: u64) -> Self {
        Self::new(Duration::from_millis(base_ms))
    }

    /// Cadence wanted for the given state, `None` when no ticks should run
    pub fn period_for(&self, status: GameStatus, speed_boost: bool) -> Option<Duration> {
        match status {
            GameStatus::Running if speed_boost => Some(self.base_period / 2),
            GameStatus::Running => Some(self.base_period),
            GameStatus::NotStarted | GameStatus::Paused | GameStatus::Over => None,
        }
    }

    /// Period of the currently armed interval
    pub fn current_period(&self) -> Option<Duration> {
        self.armed.as_ref().map(|armed| armed.period)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Tear down and restart the interval if the wanted cadence changed.
    /// Returns true when the schedule was rebuilt.
    pub fn sync(&mut self, status: GameStatus, speed_boost: bool) -> bool {
        let wanted = self.period_for(status, speed_boost);
        if wanted == self.current_period() {
            return false;
        }

        self.armed = wanted.map(|period| {
            // First tick comes one full period after (re)arming
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            Armed { period, interval }
        });
        trace!(period = ?wanted, "tick schedule rebuilt");
        true
    }

    /// Completes at the next scheduled tick; never completes while disarmed
    pub async fn tick(&mut self) {
        match self.armed.as_mut() {
            Some(armed) => {
                armed.interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
