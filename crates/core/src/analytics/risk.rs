//! Risk figures for the risk panel.
//!
//! Volatility comes from the dispersion of the current tick's percent moves
//! across holdings. It is not a historical volatility. Beta, Sharpe ratio,
//! max drawdown and VaR95 are baseline constants with a little Gaussian noise
//! added on every computation; they stand in for a real risk model.

use num_traits::FromPrimitive;
use rand::RngCore;
use rand_distr::{Distribution, Normal};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use wealthtracker_market_data::round2;

use super::RiskMetrics;
use crate::constants::TRADING_DAYS_PER_YEAR;
use crate::errors::{Error, Result};
use crate::portfolio::PortfolioSnapshot;

/// Baseline values for the synthetic risk figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBaseline {
    pub beta: Decimal,
    pub sharpe_ratio: Decimal,
    pub max_drawdown: Decimal,
    pub var95: Decimal,
    /// Standard deviation of the noise added to each figure. Zero disables it.
    pub jitter: f64,
}

impl Default for RiskBaseline {
    fn default() -> Self {
        Self {
            beta: dec!(1.2),
            sharpe_ratio: dec!(1.45),
            max_drawdown: dec!(-8.5),
            var95: dec!(-12.3),
            jitter: 0.05,
        }
    }
}

impl RiskBaseline {
    pub fn validate(&self) -> Result<()> {
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(Error::InvalidConfigValue(format!(
                "risk jitter must be a finite non-negative number, got {}",
                self.jitter
            )));
        }
        Ok(())
    }
}

/// Annualized volatility of the snapshot's per-holding returns, in percent.
///
/// Returns are `change_percent / 100`. Uses the population variance and
/// scales by `sqrt(252)`. An empty snapshot has zero volatility.
pub fn calculate_volatility(snapshot: &PortfolioSnapshot) -> Decimal {
    if snapshot.is_empty() {
        return Decimal::ZERO;
    }

    let count = Decimal::from(snapshot.len());
    let returns: Vec<Decimal> = snapshot
        .iter()
        .map(|h| h.change_percent / Decimal::ONE_HUNDRED)
        .collect();
    let mean = returns.iter().copied().sum::<Decimal>() / count;
    let variance = returns
        .iter()
        .map(|r| (*r - mean) * (*r - mean))
        .sum::<Decimal>()
        / count;

    let annualization = Decimal::from(TRADING_DAYS_PER_YEAR)
        .sqrt()
        .unwrap_or(Decimal::ZERO);
    let std_dev = variance.sqrt().unwrap_or(Decimal::ZERO);
    round2(std_dev * annualization * Decimal::ONE_HUNDRED)
}

/// Computes the risk figures for a snapshot.
///
/// Only volatility depends on the snapshot. The other figures draw noise
/// from `rng`, so two calls on the same snapshot can differ.
pub fn calculate_risk_metrics(
    snapshot: &PortfolioSnapshot,
    baseline: &RiskBaseline,
    rng: &mut dyn RngCore,
) -> RiskMetrics {
    let noise = Normal::new(0.0, baseline.jitter).ok().filter(|_| baseline.jitter > 0.0);
    let mut jittered = |value: Decimal| -> Decimal {
        let offset = noise
            .as_ref()
            .map(|n| n.sample(&mut *rng))
            .and_then(Decimal::from_f64)
            .unwrap_or(Decimal::ZERO);
        round2(value + offset)
    };

    RiskMetrics {
        beta: jittered(baseline.beta),
        sharpe_ratio: jittered(baseline.sharpe_ratio),
        volatility: calculate_volatility(snapshot),
        max_drawdown: jittered(baseline.max_drawdown),
        var95: jittered(baseline.var95),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Holding;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn holding(symbol: &str, change_percent: Decimal) -> Holding {
        Holding {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            price: dec!(100),
            change: change_percent,
            change_percent,
            shares: 1,
            value: dec!(100),
        }
    }

    fn snapshot(moves: &[Decimal]) -> PortfolioSnapshot {
        let holdings = moves
            .iter()
            .enumerate()
            .map(|(i, cp)| holding(&format!("S{}", i), *cp))
            .collect();
        PortfolioSnapshot::new(1, Utc::now(), holdings)
    }

    #[test]
    fn test_volatility_of_symmetric_moves() {
        // sqrt(0.0004) * sqrt(252) * 100 = 31.7490...
        assert_eq!(calculate_volatility(&snapshot(&[dec!(2), dec!(-2)])), dec!(31.75));
    }

    #[test]
    fn test_volatility_of_identical_moves_is_zero() {
        let s = snapshot(&[dec!(1.5), dec!(1.5), dec!(1.5)]);
        assert_eq!(calculate_volatility(&s), Decimal::ZERO);
    }

    #[test]
    fn test_volatility_of_empty_snapshot_is_zero() {
        assert_eq!(calculate_volatility(&snapshot(&[])), Decimal::ZERO);
    }

    #[test]
    fn test_zero_jitter_returns_baseline() {
        let baseline = RiskBaseline {
            jitter: 0.0,
            ..RiskBaseline::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let metrics = calculate_risk_metrics(&snapshot(&[dec!(2), dec!(-2)]), &baseline, &mut rng);

        assert_eq!(metrics.beta, dec!(1.2));
        assert_eq!(metrics.sharpe_ratio, dec!(1.45));
        assert_eq!(metrics.max_drawdown, dec!(-8.5));
        assert_eq!(metrics.var95, dec!(-12.3));
        assert_eq!(metrics.volatility, dec!(31.75));
    }

    #[test]
    fn test_jitter_stays_near_baseline() {
        let baseline = RiskBaseline::default();
        let mut rng = StdRng::seed_from_u64(42);
        let s = snapshot(&[dec!(1), dec!(-1)]);
        for _ in 0..200 {
            let metrics = calculate_risk_metrics(&s, &baseline, &mut rng);
            // Six standard deviations of 0.05 plus rounding.
            assert!((metrics.beta - dec!(1.2)).abs() <= dec!(0.31));
            assert!((metrics.sharpe_ratio - dec!(1.45)).abs() <= dec!(0.31));
            assert!(metrics.max_drawdown < Decimal::ZERO);
            assert!(metrics.var95 < Decimal::ZERO);
            assert_eq!(metrics.beta, metrics.beta.round_dp(2));
        }
    }

    #[test]
    fn test_same_seed_same_jitter() {
        let s = snapshot(&[dec!(1)]);
        let baseline = RiskBaseline::default();
        let a = calculate_risk_metrics(&s, &baseline, &mut StdRng::seed_from_u64(5));
        let b = calculate_risk_metrics(&s, &baseline, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_rejects_bad_jitter() {
        for jitter in [-0.1, f64::NAN, f64::INFINITY] {
            let baseline = RiskBaseline {
                jitter,
                ..RiskBaseline::default()
            };
            assert!(matches!(baseline.validate(), Err(Error::InvalidConfigValue(_))));
        }
        assert!(RiskBaseline::default().validate().is_ok());
    }
}
