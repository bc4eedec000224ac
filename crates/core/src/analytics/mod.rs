//! Analytics module - aggregates derived from a portfolio snapshot.
//!
//! Every computation here is a function of one [`PortfolioSnapshot`]:
//! nothing is cached between snapshots and nothing is updated incrementally.
//!
//! - [`sectors`] - Symbol to sector lookup with display colors
//! - [`allocation`] - Sector allocation
//! - [`risk`] - Volatility and the synthetic risk figures
//! - [`totals`] - Portfolio totals and top/worst performers
//! - [`alerts`] - Performance alerts
//! - [`analytics_service`] - `AnalyticsEngine`, which runs all of the above
//!
//! [`PortfolioSnapshot`]: crate::portfolio::PortfolioSnapshot

pub mod alerts;
pub mod allocation;
mod analytics_model;
pub mod analytics_service;
pub mod risk;
pub mod sectors;
pub mod totals;

pub use alerts::generate_performance_alerts;
pub use allocation::calculate_sector_allocation;
pub use analytics_model::*;
pub use analytics_service::{AnalyticsEngine, AnalyticsEngineTrait};
pub use risk::{calculate_risk_metrics, calculate_volatility, RiskBaseline};
pub use sectors::{SectorDefinition, SectorTable, OTHER_SECTOR};
pub use totals::{calculate_portfolio_totals, find_performers};
