use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wealthtracker_core::portfolio::default_seed_portfolio;
use wealthtracker_core::utils::decimal_utils::format_signed_percent;
use wealthtracker_core::{PortfolioFeed, PortfolioUpdate, PortfolioUpdateSink};

use crate::config::Config;

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_feed(config: &Config) -> anyhow::Result<PortfolioFeed> {
    let feed = PortfolioFeed::new(config.feed_config(), default_seed_portfolio())?;
    let status = feed.get_market_status();
    tracing::info!(
        "Feed ready: {} holdings, market {} ({})",
        feed.get_snapshot().len(),
        if status.is_open { "open" } else { "closed" },
        config.market_hours.timezone
    );
    Ok(feed)
}

/// Subscriber that logs a one-line summary of every update at info level and
/// the full JSON payload at debug level.
pub fn log_updates() -> Arc<dyn PortfolioUpdateSink> {
    Arc::new(|update: &PortfolioUpdate| {
        let totals = &update.metrics.totals;
        tracing::info!(
            sequence = update.sequence(),
            market_open = update.market_status.is_open,
            "Portfolio value {} ({} last tick), volatility {}%",
            totals.total_value,
            format_signed_percent(totals.day_gain_loss_percent),
            update.metrics.risk.volatility
        );
        for alert in &update.metrics.alerts {
            tracing::info!(alert = %alert.id, "{}: {}", alert.title, alert.message);
        }
        match serde_json::to_string(update) {
            Ok(json) => tracing::debug!(payload = %json, "Portfolio update"),
            Err(e) => tracing::warn!("Failed to serialize update: {}", e),
        }
    })
}
