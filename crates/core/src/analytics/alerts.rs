use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{AlertKind, AlertSeverity, PerformanceAlert};
use crate::constants::MAX_PERFORMANCE_ALERTS;
use crate::portfolio::{Holding, PortfolioSnapshot};
use crate::utils::decimal_utils::{format_signed_percent, safe_percentage};

const HOLDING_ALERT_THRESHOLD: Decimal = dec!(5);
const PORTFOLIO_ALERT_THRESHOLD: Decimal = dec!(2);

/// Alerts for large moves, holdings first in display order, then the
/// portfolio as a whole. At most [`MAX_PERFORMANCE_ALERTS`] are returned.
pub fn generate_performance_alerts(snapshot: &PortfolioSnapshot) -> Vec<PerformanceAlert> {
    let mut alerts: Vec<PerformanceAlert> = snapshot.iter().filter_map(holding_alert).collect();

    let total_value = snapshot.total_value();
    let total_change = snapshot.total_gain_loss();
    let portfolio_change_percent = safe_percentage(total_change, total_value);
    if portfolio_change_percent.abs() > PORTFOLIO_ALERT_THRESHOLD {
        let up = portfolio_change_percent > Decimal::ZERO;
        alerts.push(PerformanceAlert {
            id: "portfolio-change".to_string(),
            kind: AlertKind::PortfolioMove,
            severity: if up {
                AlertSeverity::Success
            } else {
                AlertSeverity::Warning
            },
            symbol: None,
            change_percent: portfolio_change_percent,
            title: "Portfolio Alert".to_string(),
            message: format!(
                "Your portfolio is {} {} today",
                if up { "up" } else { "down" },
                format_signed_percent(portfolio_change_percent.abs())
            ),
            action: "Review overall strategy".to_string(),
        });
    }

    alerts.truncate(MAX_PERFORMANCE_ALERTS);
    alerts
}

fn holding_alert(holding: &Holding) -> Option<PerformanceAlert> {
    let change_percent = holding.change_percent;
    if change_percent > HOLDING_ALERT_THRESHOLD {
        Some(PerformanceAlert {
            id: format!("gain-{}", holding.symbol),
            kind: AlertKind::StrongGain,
            severity: AlertSeverity::Success,
            symbol: Some(holding.symbol.clone()),
            change_percent,
            title: "Strong Performance Alert".to_string(),
            message: format!(
                "{} is up {} today",
                holding.symbol,
                format_signed_percent(change_percent)
            ),
            action: "Consider taking profits".to_string(),
        })
    } else if change_percent < -HOLDING_ALERT_THRESHOLD {
        Some(PerformanceAlert {
            id: format!("loss-{}", holding.symbol),
            kind: AlertKind::SignificantDrop,
            severity: AlertSeverity::Warning,
            symbol: Some(holding.symbol.clone()),
            change_percent,
            title: "Significant Drop Alert".to_string(),
            message: format!(
                "{} is down {} today",
                holding.symbol,
                format_signed_percent(change_percent.abs())
            ),
            action: "Review position or buy opportunity".to_string(),
        })
    } else {
        None
    }
}
