use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rust_decimal::Decimal;

use super::{
    calculate_portfolio_totals, calculate_risk_metrics, calculate_sector_allocation,
    find_performers, generate_performance_alerts, DerivedMetrics, RiskBaseline, SectorTable,
};
use crate::portfolio::PortfolioSnapshot;

pub trait AnalyticsEngineTrait: Send + Sync {
    /// Derives every metric from one snapshot.
    fn compute(&self, snapshot: &PortfolioSnapshot) -> DerivedMetrics;
}

/// Runs the analytics calculations over a snapshot.
///
/// Holds the configuration and the random source used for risk jitter.
pub struct AnalyticsEngine {
    sectors: SectorTable,
    risk_baseline: RiskBaseline,
    cash_balance: Decimal,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl AnalyticsEngine {
    pub fn new(
        sectors: SectorTable,
        risk_baseline: RiskBaseline,
        cash_balance: Decimal,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        Self {
            sectors,
            risk_baseline,
            cash_balance,
            rng: Mutex::new(rng),
        }
    }

    /// Engine with the default tables and a deterministic jitter source.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            SectorTable::default(),
            RiskBaseline::default(),
            Decimal::ZERO,
            Box::new(StdRng::seed_from_u64(seed)),
        )
    }

    pub fn sectors(&self) -> &SectorTable {
        &self.sectors
    }
}

impl AnalyticsEngineTrait for AnalyticsEngine {
    fn compute(&self, snapshot: &PortfolioSnapshot) -> DerivedMetrics {
        let risk = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            calculate_risk_metrics(snapshot, &self.risk_baseline, &mut **rng)
        };

        DerivedMetrics {
            snapshot_sequence: snapshot.sequence,
            sector_allocation: calculate_sector_allocation(snapshot, &self.sectors),
            risk,
            totals: calculate_portfolio_totals(snapshot, self.cash_balance),
            performers: find_performers(snapshot),
            alerts: generate_performance_alerts(snapshot),
        }
    }
}
