use std::sync::Arc;

use dotenvy::dotenv;
use tracing::debug;

use common::logger;
use common::models::tracked_assets;
use market_data::services::{PriceService, StaticHypeSource};
use strategy::projection::ProjectionConfig;
use strategy::services::AlertService;

use executor::config::TelegramConfig;
use executor::services::TelegramNotifier;
use executor::ui::Dashboard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_stderr_logger();
    dotenv().ok();
    debug!("Dashboard starting up...");

    let telegram = TelegramConfig::from_env()?;
    let notifier = Arc::new(TelegramNotifier::new(&telegram));

    let service = AlertService::new(
        Arc::new(PriceService::new()),
        Arc::new(StaticHypeSource::new()),
        ProjectionConfig::default(),
    )
    .with_notifier(notifier);

    Dashboard::new(Arc::new(service), tracked_assets()).run().await?;

    Ok(())
}
