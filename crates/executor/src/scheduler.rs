use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::info;

use common::models::AssetDescriptor;
use strategy::services::AlertService;

/// Drives the perpetual mode: one evaluation pass right away, then one per
/// interval until the shutdown signal fires.
pub struct Scheduler {
    service: Arc<AlertService>,
    assets: Vec<AssetDescriptor>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(
        service: Arc<AlertService>,
        assets: Vec<AssetDescriptor>,
        interval: Duration,
    ) -> Self {
        Self {
            service,
            assets,
            interval,
        }
    }

    /// A pass that overruns the interval delays the next tick instead of
    /// bursting to catch up.
    pub async fn start(self, mut shutdown: oneshot::Receiver<()>) {
        info!(
            "Starting scheduler: {} assets every {}s",
            self.assets.len(),
            self.interval.as_secs()
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.service.run_pass(&self.assets).await;
                }
                _ = &mut shutdown => break,
            }
        }

        info!("Scheduler stopped.");
    }
}
