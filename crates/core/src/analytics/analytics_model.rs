//! Derived metric models published alongside every snapshot.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Value held in one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocation {
    pub sector: String,
    /// Sum of holding values mapped to the sector
    pub value: Decimal,
    /// Percentage of total portfolio value (0-100)
    pub percentage: Decimal,
    /// Color for visualization (hex code)
    pub color: String,
}

/// Coarse band used by the risk panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SharpeRating {
    Good,
    Poor,
}

/// Portfolio risk figures.
///
/// Only `volatility` is derived from the snapshot, and only from the current
/// tick's percent moves. `beta`, `sharpe_ratio`, `max_drawdown` and `var95`
/// are jittered placeholder constants, not a model of the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub beta: Decimal,
    pub sharpe_ratio: Decimal,
    /// Annualized volatility, in percent
    pub volatility: Decimal,
    /// In percent, negative
    pub max_drawdown: Decimal,
    /// Value at risk at 95% confidence, in percent, negative
    pub var95: Decimal,
}

impl RiskMetrics {
    pub fn beta_level(&self) -> RiskLevel {
        if self.beta < dec!(0.8) {
            RiskLevel::Low
        } else if self.beta < dec!(1.2) {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn volatility_level(&self) -> RiskLevel {
        if self.volatility < dec!(15) {
            RiskLevel::Low
        } else if self.volatility < dec!(25) {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn sharpe_rating(&self) -> SharpeRating {
        if self.sharpe_ratio > Decimal::ONE {
            SharpeRating::Good
        } else {
            SharpeRating::Poor
        }
    }
}

/// Portfolio-level totals.
///
/// There is no separate "since open" baseline in a single session, so the day
/// figures mirror the total figures with a different denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub total_value: Decimal,
    pub total_gain_loss: Decimal,
    pub total_gain_loss_percent: Decimal,
    pub day_gain_loss: Decimal,
    pub day_gain_loss_percent: Decimal,
    /// Uninvested cash, reported as configured
    pub cash_balance: Decimal,
}

/// Short description of one holding for the performer cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerSummary {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    pub change_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performers {
    pub top: PerformerSummary,
    pub worst: PerformerSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertKind {
    /// A holding is up more than the threshold
    StrongGain,
    /// A holding is down more than the threshold
    SignificantDrop,
    /// The whole portfolio moved more than the threshold
    PortfolioMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertSeverity {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAlert {
    /// Stable id, e.g. `gain-SHOP` or `portfolio-change`
    pub id: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    /// Holding symbol; `None` for portfolio-wide alerts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub change_percent: Decimal,
    pub title: String,
    pub message: String,
    pub action: String,
}

/// Everything derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Sequence of the snapshot these metrics were computed from
    pub snapshot_sequence: u64,
    /// Sorted by value, descending
    pub sector_allocation: Vec<SectorAllocation>,
    pub risk: RiskMetrics,
    pub totals: PortfolioTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performers: Option<Performers>,
    pub alerts: Vec<PerformanceAlert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(beta: Decimal, volatility: Decimal, sharpe_ratio: Decimal) -> RiskMetrics {
        RiskMetrics {
            beta,
            sharpe_ratio,
            volatility,
            max_drawdown: dec!(-8.5),
            var95: dec!(-12.3),
        }
    }

    #[test]
    fn test_beta_bands() {
        assert_eq!(risk(dec!(0.79), dec!(0), dec!(1)).beta_level(), RiskLevel::Low);
        assert_eq!(risk(dec!(0.8), dec!(0), dec!(1)).beta_level(), RiskLevel::Medium);
        assert_eq!(risk(dec!(1.2), dec!(0), dec!(1)).beta_level(), RiskLevel::High);
    }

    #[test]
    fn test_volatility_bands() {
        assert_eq!(risk(dec!(1), dec!(14.99), dec!(1)).volatility_level(), RiskLevel::Low);
        assert_eq!(risk(dec!(1), dec!(15), dec!(1)).volatility_level(), RiskLevel::Medium);
        assert_eq!(risk(dec!(1), dec!(25), dec!(1)).volatility_level(), RiskLevel::High);
    }

    #[test]
    fn test_sharpe_rating() {
        assert_eq!(risk(dec!(1), dec!(0), dec!(1.45)).sharpe_rating(), SharpeRating::Good);
        assert_eq!(risk(dec!(1), dec!(0), dec!(1)).sharpe_rating(), SharpeRating::Poor);
    }
}
