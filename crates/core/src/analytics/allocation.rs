use rust_decimal::Decimal;

use super::{SectorAllocation, SectorTable};
use crate::portfolio::PortfolioSnapshot;
use crate::utils::decimal_utils::safe_percentage;

/// Groups holding values by sector.
///
/// Sectors with no value are omitted. The result is sorted by value,
/// descending, with ties kept in table order. Sector values are exact sums;
/// only the percentages are rounded.
pub fn calculate_sector_allocation(
    snapshot: &PortfolioSnapshot,
    sectors: &SectorTable,
) -> Vec<SectorAllocation> {
    let definitions = sectors.sectors();
    let mut values = vec![Decimal::ZERO; definitions.len()];
    for holding in snapshot.iter() {
        let slot = &mut values[sectors.sector_index(&holding.symbol)];
        *slot = slot.saturating_add(holding.value);
    }

    let total_value = snapshot.total_value();
    let mut allocation: Vec<SectorAllocation> = definitions
        .iter()
        .zip(values)
        .filter(|(_, value)| *value > Decimal::ZERO)
        .map(|(definition, value)| SectorAllocation {
            sector: definition.name.clone(),
            value,
            percentage: safe_percentage(value, total_value),
            color: definition.color.clone(),
        })
        .collect();

    // sort_by is stable
    allocation.sort_by(|a, b| b.value.cmp(&a.value));
    allocation
}
