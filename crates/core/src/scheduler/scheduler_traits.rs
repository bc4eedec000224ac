use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

/// Receiver of the scheduler's periodic activities.
///
/// Both methods are called from Tokio tasks and must not block. A panic is
/// caught by the scheduler, logged, and the cadence continues.
pub trait TickHandler: Send + Sync + 'static {
    /// Market-status check cadence.
    fn on_market_check(&self, now: DateTime<Utc>);

    /// Price-update cadence.
    fn on_price_tick(&self, now: DateTime<Utc>);
}

/// Source of the wall-clock instant passed to handlers.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for tests and replay.
#[derive(Debug)]
pub struct FixedTimeSource {
    now: RwLock<DateTime<Utc>>,
}

impl FixedTimeSource {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}
