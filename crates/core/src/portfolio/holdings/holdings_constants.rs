use rust_decimal_macros::dec;

use super::NewHolding;

/// The dashboard's starting portfolio, in display order.
pub fn default_seed_portfolio() -> Vec<NewHolding> {
    vec![
        NewHolding::new("SHOP", "Shopify Inc.", dec!(68.45), 150)
            .with_last_change(dec!(2.34), dec!(3.54)),
        NewHolding::new("RY", "Royal Bank of Canada", dec!(125.87), 75)
            .with_last_change(dec!(-1.23), dec!(-0.97)),
        NewHolding::new("AAPL", "Apple Inc.", dec!(175.84), 50)
            .with_last_change(dec!(4.56), dec!(2.67)),
        NewHolding::new("MSFT", "Microsoft Corporation", dec!(378.91), 20)
            .with_last_change(dec!(-2.45), dec!(-0.64)),
        NewHolding::new("GOOGL", "Alphabet Inc.", dec!(139.67), 45)
            .with_last_change(dec!(3.21), dec!(2.35)),
        NewHolding::new("TD", "Toronto-Dominion Bank", dec!(78.43), 80)
            .with_last_change(dec!(0.87), dec!(1.12)),
    ]
}
