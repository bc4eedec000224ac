use rust_decimal::Decimal;
use wealthtracker_market_data::round2;

use super::{PerformerSummary, Performers, PortfolioTotals};
use crate::portfolio::{Holding, PortfolioSnapshot};
use crate::utils::decimal_utils::safe_percentage;

/// Portfolio totals for a snapshot.
///
/// Gain/loss is the last tick's move, `sum(change * shares)`. The total
/// percentage is relative to the value before that move, the day percentage
/// to the current value. A portfolio worth nothing reports zero for both.
pub fn calculate_portfolio_totals(
    snapshot: &PortfolioSnapshot,
    cash_balance: Decimal,
) -> PortfolioTotals {
    let total_value = snapshot.total_value();
    let total_gain_loss = round2(snapshot.total_gain_loss());

    let (total_gain_loss_percent, day_gain_loss_percent) = if total_value.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            safe_percentage(total_gain_loss, total_value.saturating_sub(total_gain_loss)),
            safe_percentage(total_gain_loss, total_value),
        )
    };

    PortfolioTotals {
        total_value,
        total_gain_loss,
        total_gain_loss_percent,
        day_gain_loss: total_gain_loss,
        day_gain_loss_percent,
        cash_balance,
    }
}

/// Best and worst holding by last percent move. The earlier holding wins ties.
pub fn find_performers(snapshot: &PortfolioSnapshot) -> Option<Performers> {
    let top = snapshot
        .iter()
        .reduce(|best, h| if h.change_percent > best.change_percent { h } else { best })?;
    let worst = snapshot
        .iter()
        .reduce(|worst, h| if h.change_percent < worst.change_percent { h } else { worst })?;

    Some(Performers {
        top: summarize(top),
        worst: summarize(worst),
    })
}

fn summarize(holding: &Holding) -> PerformerSummary {
    PerformerSummary {
        symbol: holding.symbol.clone(),
        name: holding.name.clone(),
        price: holding.price,
        change_percent: holding.change_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{default_seed_portfolio, NewHolding};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn seeded_snapshot() -> PortfolioSnapshot {
        let holdings = default_seed_portfolio()
            .into_iter()
            .map(|h| Holding::from_new(h).unwrap())
            .collect();
        PortfolioSnapshot::new(0, Utc::now(), holdings)
    }

    fn raw(symbol: &str, change: Decimal, change_percent: Decimal, shares: u64) -> Holding {
        Holding {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            price: Decimal::ZERO,
            change,
            change_percent,
            shares,
            value: Decimal::ZERO,
        }
    }

    #[test]
    fn test_totals_for_single_moved_holding() {
        let holding = Holding::from_new(
            NewHolding::new("AAPL", "Apple Inc.", dec!(102.00), 10)
                .with_last_change(dec!(2.00), dec!(2.00)),
        )
        .unwrap();
        let snapshot = PortfolioSnapshot::new(1, Utc::now(), vec![holding]);

        let totals = calculate_portfolio_totals(&snapshot, dec!(12500.00));
        assert_eq!(totals.total_value, dec!(1020.00));
        assert_eq!(totals.total_gain_loss, dec!(20.00));
        assert_eq!(totals.total_gain_loss_percent, dec!(2.00));
        assert_eq!(totals.day_gain_loss, dec!(20.00));
        // 20 / 1020 * 100
        assert_eq!(totals.day_gain_loss_percent, dec!(1.96));
        assert_eq!(totals.cash_balance, dec!(12500.00));
    }

    #[test]
    fn test_seed_portfolio_totals() {
        let totals = calculate_portfolio_totals(&seeded_snapshot(), Decimal::ZERO);
        assert_eq!(totals.total_value, dec!(48637.50));
        // 351.00 - 92.25 + 228.00 - 49.00 + 144.45 + 69.60
        assert_eq!(totals.total_gain_loss, dec!(651.80));
        assert_eq!(totals.day_gain_loss, totals.total_gain_loss);
    }

    #[test]
    fn test_oversized_totals_saturate() {
        let mut a = raw("A", Decimal::MAX, dec!(1), u64::MAX);
        a.value = Decimal::MAX;
        let mut b = raw("B", Decimal::MAX, dec!(1), u64::MAX);
        b.value = Decimal::MAX;
        let snapshot = PortfolioSnapshot::new(1, Utc::now(), vec![a, b]);

        let totals = calculate_portfolio_totals(&snapshot, Decimal::ZERO);
        assert_eq!(totals.total_value, Decimal::MAX);
        assert_eq!(totals.total_gain_loss, Decimal::MAX);
        assert_eq!(totals.total_gain_loss_percent, Decimal::ZERO);
        assert_eq!(totals.day_gain_loss_percent, dec!(100));
    }

    #[test]
    fn test_zero_total_value_yields_zero_percentages() {
        let snapshot = PortfolioSnapshot::new(
            1,
            Utc::now(),
            vec![raw("A", dec!(1.00), dec!(1.00), 5), raw("B", dec!(-1.00), dec!(-1.00), 5)],
        );
        let totals = calculate_portfolio_totals(&snapshot, Decimal::ZERO);
        assert_eq!(totals.total_value, Decimal::ZERO);
        assert_eq!(totals.total_gain_loss_percent, Decimal::ZERO);
        assert_eq!(totals.day_gain_loss_percent, Decimal::ZERO);

        let lopsided = PortfolioSnapshot::new(1, Utc::now(), vec![raw("A", dec!(3), dec!(3), 2)]);
        let totals = calculate_portfolio_totals(&lopsided, Decimal::ZERO);
        assert_eq!(totals.total_gain_loss, dec!(6.00));
        assert_eq!(totals.total_gain_loss_percent, Decimal::ZERO);
    }

    #[test]
    fn test_zero_base_value_yields_zero_percentage() {
        // The whole value is the last move: the base it moved from is zero.
        let mut holding = raw("A", dec!(5.00), dec!(5.00), 2);
        holding.value = dec!(10.00);
        let snapshot = PortfolioSnapshot::new(1, Utc::now(), vec![holding]);
        let totals = calculate_portfolio_totals(&snapshot, Decimal::ZERO);
        assert_eq!(totals.total_gain_loss_percent, Decimal::ZERO);
        assert_eq!(totals.day_gain_loss_percent, dec!(100.00));
    }

    #[test]
    fn test_totals_are_idempotent() {
        let snapshot = seeded_snapshot();
        assert_eq!(
            calculate_portfolio_totals(&snapshot, dec!(1)),
            calculate_portfolio_totals(&snapshot, dec!(1))
        );
    }

    #[test]
    fn test_find_performers() {
        let performers = find_performers(&seeded_snapshot()).unwrap();
        assert_eq!(performers.top.symbol, "SHOP");
        assert_eq!(performers.top.change_percent, dec!(3.54));
        assert_eq!(performers.worst.symbol, "RY");
        assert_eq!(performers.worst.change_percent, dec!(-0.97));
    }

    #[test]
    fn test_find_performers_ties_keep_first() {
        let snapshot = PortfolioSnapshot::new(
            1,
            Utc::now(),
            vec![raw("A", dec!(1), dec!(1), 1), raw("B", dec!(1), dec!(1), 1)],
        );
        let performers = find_performers(&snapshot).unwrap();
        assert_eq!(performers.top.symbol, "A");
        assert_eq!(performers.worst.symbol, "A");
    }

    #[test]
    fn test_find_performers_empty() {
        let snapshot = PortfolioSnapshot::new(0, Utc::now(), vec![]);
        assert!(find_performers(&snapshot).is_none());
    }
}
