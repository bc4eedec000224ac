use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Reference timezone of the simulated exchange.
pub const DEFAULT_MARKET_TZ: Tz = chrono_tz::America::Toronto;

/// Default local opening hour (inclusive).
pub const DEFAULT_OPEN_HOUR: u32 = 9;

/// Default local closing hour (exclusive).
pub const DEFAULT_CLOSE_HOUR: u32 = 16;

/// Trading window of the simulated market.
///
/// The window is the half-open interval `[open_hour, close_hour)` in local
/// time of `timezone`, Monday to Friday. There is no holiday calendar and no
/// minute-level precision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketHours {
    /// IANA timezone name, e.g. `America/Toronto`
    pub timezone: String,
    pub open_hour: u32,
    pub close_hour: u32,
}

impl Default for MarketHours {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_MARKET_TZ.name().to_string(),
            open_hour: DEFAULT_OPEN_HOUR,
            close_hour: DEFAULT_CLOSE_HOUR,
        }
    }
}

impl MarketHours {
    pub fn new(timezone: impl Into<String>, open_hour: u32, close_hour: u32) -> Self {
        Self {
            timezone: timezone.into(),
            open_hour,
            close_hour,
        }
    }

    /// Parses the configured timezone.
    pub fn parse_timezone(&self) -> Result<Tz, MarketDataError> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| MarketDataError::InvalidTimezone(self.timezone.clone()))
    }

    /// Checks the window is non-empty and fits in a day, and the timezone parses.
    pub fn validate(&self) -> Result<(), MarketDataError> {
        if self.open_hour >= self.close_hour || self.close_hour > 24 {
            return Err(MarketDataError::InvalidMarketHours {
                open_hour: self.open_hour,
                close_hour: self.close_hour,
            });
        }
        self.parse_timezone().map(|_| ())
    }
}
