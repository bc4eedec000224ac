//! Static symbol to sector lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Bucket for symbols with no sector mapping.
pub const OTHER_SECTOR: &str = "Other";

const OTHER_COLOR: &str = "#6b7280";
const FALLBACK_COLOR: &str = "#808080";

/// A sector bucket and its display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorDefinition {
    pub name: String,
    pub color: String,
}

/// Ordered sector buckets plus the symbol mapping.
///
/// Symbols are matched case-insensitively. Unmapped symbols fall into
/// [`OTHER_SECTOR`], which always exists. Bucket order is the tie-break when
/// two sectors hold the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorTable {
    sectors: Vec<SectorDefinition>,
    symbols: HashMap<String, String>,
}

impl Default for SectorTable {
    fn default() -> Self {
        Self::empty()
            .with_sector("Technology", "#3b82f6")
            .with_sector("Financial", "#10b981")
            .with_sector("Healthcare", "#f59e0b")
            .with_sector("Consumer", "#ef4444")
            .with_sector("Energy", "#8b5cf6")
            .with_symbol("AAPL", "Technology")
            .with_symbol("MSFT", "Technology")
            .with_symbol("GOOGL", "Technology")
            .with_symbol("SHOP", "Technology")
            .with_symbol("RY", "Financial")
            .with_symbol("TD", "Financial")
    }
}

impl SectorTable {
    /// A table with only the [`OTHER_SECTOR`] bucket.
    pub fn empty() -> Self {
        Self {
            sectors: vec![SectorDefinition {
                name: OTHER_SECTOR.to_string(),
                color: OTHER_COLOR.to_string(),
            }],
            symbols: HashMap::new(),
        }
    }

    /// Adds a sector bucket, or recolors it if it already exists.
    /// New buckets are ordered before [`OTHER_SECTOR`].
    pub fn with_sector(mut self, name: &str, color: &str) -> Self {
        if let Some(existing) = self.sectors.iter_mut().find(|s| s.name == name) {
            existing.color = color.to_string();
            return self;
        }
        let other_idx = self
            .sectors
            .iter()
            .position(|s| s.name == OTHER_SECTOR)
            .unwrap_or(self.sectors.len());
        self.sectors.insert(
            other_idx,
            SectorDefinition {
                name: name.to_string(),
                color: color.to_string(),
            },
        );
        self
    }

    /// Maps a symbol to a sector, creating the bucket if needed.
    pub fn with_symbol(mut self, symbol: &str, sector: &str) -> Self {
        if !self.sectors.iter().any(|s| s.name == sector) {
            self = self.with_sector(sector, FALLBACK_COLOR);
        }
        self.symbols
            .insert(symbol.trim().to_ascii_uppercase(), sector.to_string());
        self
    }

    pub fn sectors(&self) -> &[SectorDefinition] {
        &self.sectors
    }

    /// Sector name for a symbol.
    pub fn sector_for(&self, symbol: &str) -> &str {
        self.symbols
            .get(&symbol.trim().to_ascii_uppercase())
            .map(String::as_str)
            .unwrap_or(OTHER_SECTOR)
    }

    /// Index into [`sectors`](Self::sectors) for a symbol.
    pub(crate) fn sector_index(&self, symbol: &str) -> usize {
        let name = self.sector_for(symbol);
        self.sectors
            .iter()
            .position(|s| s.name == name)
            .or_else(|| self.sectors.iter().position(|s| s.name == OTHER_SECTOR))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping() {
        let table = SectorTable::default();
        assert_eq!(table.sector_for("AAPL"), "Technology");
        assert_eq!(table.sector_for("td"), "Financial");
        assert_eq!(table.sector_for("XOM"), OTHER_SECTOR);
    }

    #[test]
    fn test_other_stays_last() {
        let table = SectorTable::default().with_sector("Utilities", "#06b6d4");
        let names: Vec<_> = table.sectors().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Technology",
                "Financial",
                "Healthcare",
                "Consumer",
                "Energy",
                "Utilities",
                "Other"
            ]
        );
    }

    #[test]
    fn test_with_symbol_creates_missing_sector() {
        let table = SectorTable::default().with_symbol("ENB", "Pipelines");
        assert_eq!(table.sector_for("ENB"), "Pipelines");
        let pipelines = table
            .sectors()
            .iter()
            .find(|s| s.name == "Pipelines")
            .unwrap();
        assert_eq!(pipelines.color, FALLBACK_COLOR);
    }

    #[test]
    fn test_with_symbol_remaps_existing_symbol() {
        let table = SectorTable::default().with_symbol("SHOP", "Consumer");
        assert_eq!(table.sector_for("SHOP"), "Consumer");
        assert_eq!(table.sector_index("SHOP"), 3);
    }

    #[test]
    fn test_recolor_existing_sector() {
        let table = SectorTable::default().with_sector("Energy", "#000000");
        let energy = table.sectors().iter().find(|s| s.name == "Energy").unwrap();
        assert_eq!(energy.color, "#000000");
        assert_eq!(table.sectors().len(), 6);
    }
}
