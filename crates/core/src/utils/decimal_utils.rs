use rust_decimal::Decimal;
use wealthtracker_market_data::round2;

/// `part / whole * 100`, rounded to 2 decimal places.
///
/// A zero `whole` yields zero instead of dividing, so no NaN or infinity
/// equivalent ever reaches a consumer.
pub fn safe_percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

/// Formats a percentage with an explicit sign, e.g. `+2.35%` or `-0.97%`.
pub fn format_signed_percent(value: Decimal) -> String {
    let rounded = match round2(value) {
        r if r.is_zero() => Decimal::ZERO,
        r => r,
    };
    let sign = if rounded < Decimal::ZERO { "" } else { "+" };
    format!("{}{:.2}%", sign, rounded)
}
