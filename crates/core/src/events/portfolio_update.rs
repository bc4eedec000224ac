//! Portfolio update event.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wealthtracker_market_data::MarketStatus;

use crate::analytics::DerivedMetrics;
use crate::portfolio::PortfolioSnapshot;

/// A snapshot, the market status and the metrics derived from that snapshot.
///
/// The three parts are always published together, so `metrics` never
/// describes a different snapshot than the one it travels with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    pub snapshot: Arc<PortfolioSnapshot>,
    pub market_status: MarketStatus,
    pub metrics: Arc<DerivedMetrics>,
}

impl PortfolioUpdate {
    pub fn new(
        snapshot: Arc<PortfolioSnapshot>,
        market_status: MarketStatus,
        metrics: Arc<DerivedMetrics>,
    ) -> Self {
        Self {
            snapshot,
            market_status,
            metrics,
        }
    }

    /// Same snapshot and metrics with a refreshed market status.
    pub fn with_market_status(&self, market_status: MarketStatus) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
            market_status,
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Sequence of the snapshot this update carries.
    pub fn sequence(&self) -> u64 {
        self.snapshot.sequence
    }
}

#[cfg(test)]
pub(crate) fn sample_update(sequence: u64) -> PortfolioUpdate {
    use crate::analytics::{AnalyticsEngine, AnalyticsEngineTrait};
    use chrono::Utc;

    let snapshot = Arc::new(PortfolioSnapshot::new(sequence, Utc::now(), vec![]));
    let metrics = Arc::new(AnalyticsEngine::seeded(1).compute(&snapshot));
    PortfolioUpdate::new(snapshot, MarketStatus::closed(Utc::now()), metrics)
}
