//! Property-based integration tests for portfolio analytics.
//!
//! These tests verify that aggregate properties hold for any valid portfolio,
//! using the `proptest` crate for random test case generation.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use wealthtracker_core::analytics::{
    calculate_portfolio_totals, calculate_sector_allocation, generate_performance_alerts,
    SectorTable,
};
use wealthtracker_core::constants::MAX_PERFORMANCE_ALERTS;
use wealthtracker_core::portfolio::{Holding, NewHolding, PortfolioSnapshot, PortfolioState};
use wealthtracker_market_data::{round2, MarketClock, PriceSimulator, PRICE_FLOOR};

const SYMBOLS: [&str; 9] = ["AAPL", "MSFT", "GOOGL", "SHOP", "RY", "TD", "XOM", "ENB", "BNS"];

// =============================================================================
// Generators
// =============================================================================

/// Generates between one and nine holdings with distinct symbols.
fn arb_holdings() -> impl Strategy<Value = Vec<NewHolding>> {
    proptest::collection::vec(
        (
            1i64..10_000_000, // price in cents
            1u64..10_000,     // shares
            -900i64..900,     // last change percent in hundredths
        ),
        1..=SYMBOLS.len(),
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (cents, shares, pct))| {
                let price = Decimal::new(cents, 2);
                let change_percent = Decimal::new(pct, 2);
                let change = round2(price * change_percent / Decimal::ONE_HUNDRED);
                NewHolding::new(SYMBOLS[i], SYMBOLS[i], price, shares)
                    .with_last_change(change, change_percent)
            })
            .collect()
    })
}

fn snapshot_of(seed: Vec<NewHolding>) -> PortfolioSnapshot {
    let holdings = seed
        .into_iter()
        .map(|h| Holding::from_new(h).expect("generated holdings are valid"))
        .collect();
    PortfolioSnapshot::new(0, Utc::now(), holdings)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Sector values add up to the portfolio value and come out sorted.
    #[test]
    fn prop_allocation_sums_to_total(seed in arb_holdings()) {
        let snapshot = snapshot_of(seed);
        let allocation = calculate_sector_allocation(&snapshot, &SectorTable::default());

        let sum: Decimal = allocation.iter().map(|a| a.value).sum();
        prop_assert_eq!(sum, snapshot.total_value());

        for pair in allocation.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
        }

        let pct_sum: Decimal = allocation.iter().map(|a| a.percentage).sum();
        let tolerance = Decimal::new(1, 2) * Decimal::from(allocation.len());
        prop_assert!((pct_sum - Decimal::ONE_HUNDRED).abs() <= tolerance);
    }

    /// Totals match the holdings and allocation agrees with them.
    #[test]
    fn prop_totals_match_holdings(seed in arb_holdings()) {
        let snapshot = snapshot_of(seed);
        let totals = calculate_portfolio_totals(&snapshot, Decimal::ZERO);

        let expected: Decimal = snapshot.iter().map(|h| h.value).sum();
        prop_assert_eq!(totals.total_value, expected);
        prop_assert_eq!(totals.day_gain_loss, totals.total_gain_loss);
        prop_assert_eq!(totals.total_gain_loss_percent, totals.total_gain_loss_percent.round_dp(2));
    }

    /// Alerts are capped and holding alerts only fire beyond five percent.
    #[test]
    fn prop_alerts_capped(seed in arb_holdings()) {
        let snapshot = snapshot_of(seed);
        let alerts = generate_performance_alerts(&snapshot);
        prop_assert!(alerts.len() <= MAX_PERFORMANCE_ALERTS);
        for alert in alerts.iter().filter(|a| a.symbol.is_some()) {
            prop_assert!(alert.change_percent.abs() > Decimal::from(5));
        }
    }

    /// Repeated ticks keep prices above the floor and values consistent.
    #[test]
    fn prop_ticks_preserve_holding_invariants(seed in arb_holdings(), rng_seed in any::<u64>()) {
        let open = Utc.with_ymd_and_hms(2024, 9, 11, 14, 0, 0).unwrap();
        let state = PortfolioState::new(
            seed,
            MarketClock::default(),
            PriceSimulator::seeded(rng_seed),
            open,
        )
        .expect("generated holdings are valid");

        for _ in 0..10 {
            state.tick(open);
        }

        let snapshot = state.get_snapshot();
        prop_assert_eq!(snapshot.sequence, 10);
        for holding in snapshot.iter() {
            prop_assert!(holding.price >= PRICE_FLOOR);
            prop_assert_eq!(holding.value, round2(holding.price * Decimal::from(holding.shares)));
        }
    }
}
