use std::sync::Arc;

use dotenvy::dotenv;
use tokio::sync::oneshot;
use tracing::{debug, info};

use common::logger;
use common::models::tracked_assets;
use market_data::services::{PriceService, StaticHypeSource};
use strategy::projection::ProjectionConfig;
use strategy::services::AlertService;

use executor::config::{self, TelegramConfig};
use executor::scheduler::Scheduler;
use executor::services::TelegramNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_logger();
    dotenv().ok();
    debug!("System starting up...");

    let telegram = TelegramConfig::from_env()?;
    let notifier = Arc::new(TelegramNotifier::new(&telegram));

    let service = AlertService::new(
        Arc::new(PriceService::new()),
        Arc::new(StaticHypeSource::new()),
        ProjectionConfig::default(),
    )
    .with_notifier(notifier);

    let scheduler = Scheduler::new(
        Arc::new(service),
        tracked_assets(),
        config::eval_interval(),
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = tokio::spawn(scheduler.start(shutdown_rx));

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    let _ = shutdown_tx.send(());
    handle.await?;

    Ok(())
}
