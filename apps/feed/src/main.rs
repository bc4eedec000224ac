mod config;
mod main_lib;

use config::Config;
use main_lib::{build_feed, init_tracing, log_updates};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_format);

    let feed = build_feed(&config)?;
    let subscription = feed.subscribe(log_updates());
    feed.start()?;
    tracing::info!("Feed running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    subscription.unsubscribe();
    feed.dispose().await;
    Ok(())
}
