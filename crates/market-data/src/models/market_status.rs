use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the simulated market is open, and when that was decided.
///
/// Recomputed on every check, never accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    pub is_open: bool,
    pub checked_at: DateTime<Utc>,
}

impl MarketStatus {
    pub fn new(is_open: bool, checked_at: DateTime<Utc>) -> Self {
        Self {
            is_open,
            checked_at,
        }
    }

    /// A closed status, used before the first check and on clock failures.
    pub fn closed(checked_at: DateTime<Utc>) -> Self {
        Self::new(false, checked_at)
    }
}
