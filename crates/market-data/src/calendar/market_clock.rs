use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

use super::market_hours::MarketHours;
use crate::errors::MarketDataError;
use crate::models::MarketStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TradingWindow {
    tz: Tz,
    open_hour: u32,
    close_hour: u32,
}

/// Decides whether the simulated market is open at a given instant.
///
/// The clock is a pure function of the instant it is asked about. A clock
/// built from an unusable configuration has no trading window and reports
/// closed for every instant, since its answer gates price updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarketClock {
    window: Option<TradingWindow>,
}

impl Default for MarketClock {
    fn default() -> Self {
        Self::new(&MarketHours::default())
    }
}

impl MarketClock {
    /// Builds a clock, falling back to always-closed on invalid configuration.
    pub fn new(hours: &MarketHours) -> Self {
        match Self::try_new(hours) {
            Ok(clock) => clock,
            Err(e) => {
                warn!("Market clock disabled, reporting closed: {}", e);
                Self { window: None }
            }
        }
    }

    /// Builds a clock, rejecting invalid configuration.
    pub fn try_new(hours: &MarketHours) -> Result<Self, MarketDataError> {
        hours.validate()?;
        let tz = hours.parse_timezone()?;
        Ok(Self {
            window: Some(TradingWindow {
                tz,
                open_hour: hours.open_hour,
                close_hour: hours.close_hour,
            }),
        })
    }

    /// Whether the clock has a usable trading window.
    pub fn is_enabled(&self) -> bool {
        self.window.is_some()
    }

    /// Reference timezone, if the clock is enabled.
    pub fn timezone(&self) -> Option<Tz> {
        self.window.map(|w| w.tz)
    }

    /// Converts `now` to local time in the reference timezone.
    pub fn local_time(&self, now: DateTime<Utc>) -> Option<DateTime<Tz>> {
        self.window.map(|w| now.with_timezone(&w.tz))
    }

    /// Returns true iff `now` falls on Monday–Friday within `[open_hour, close_hour)`
    /// local time.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        let Some(window) = self.window else {
            return false;
        };
        let local = now.with_timezone(&window.tz);
        // Sunday = 0 .. Saturday = 6
        let weekday = local.weekday().num_days_from_sunday();
        let hour = local.hour();
        (1..=5).contains(&weekday) && hour >= window.open_hour && hour < window.close_hour
    }

    /// Same as [`is_open`](Self::is_open) for a Unix timestamp in milliseconds.
    /// Timestamps chrono cannot represent report closed.
    pub fn is_open_at_millis(&self, epoch_ms: i64) -> bool {
        match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
            Some(now) => self.is_open(now),
            None => {
                warn!("Unrepresentable timestamp {}ms, reporting market closed", epoch_ms);
                false
            }
        }
    }

    /// Evaluates the clock into a status stamped with `now`.
    pub fn status(&self, now: DateTime<Utc>) -> MarketStatus {
        MarketStatus::new(self.is_open(now), now)
    }
}
