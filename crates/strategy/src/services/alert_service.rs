use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use common::models::{AssetDescriptor, PriceSnapshot, ProjectionResult, Signal};
use common::notify::{Notifier, NotifyError};
use common::providers::{HypeProvider, PriceProvider};

use crate::classifier::classify;
use crate::projection::{ProjectionConfig, ProjectionError, project};

/// Everything one evaluation of one asset produced. Lives only until the
/// next pass; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEvaluation {
    pub symbol: String,
    pub price: f64,
    /// True when `price` is the fallback constant, not a live quote.
    pub degraded: bool,
    pub projection: ProjectionResult,
    pub hype: f64,
    pub signal: Signal,
    pub evaluated_at: DateTime<Utc>,
}

/// The evaluation pipeline: fetch prices, project, look up hype, classify,
/// and push non-neutral signals through the notifier.
///
/// Both drivers wrap this service — the perpetual loop calls [`run_pass`]
/// on a cadence, the dashboard calls [`evaluate_one`] and [`dispatch`] on
/// demand.
///
/// [`run_pass`]: AlertService::run_pass
/// [`evaluate_one`]: AlertService::evaluate_one
/// [`dispatch`]: AlertService::dispatch
pub struct AlertService {
    price_provider: Arc<dyn PriceProvider>,
    hype_provider: Arc<dyn HypeProvider>,
    config: ProjectionConfig,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AlertService {
    pub fn new(
        price_provider: Arc<dyn PriceProvider>,
        hype_provider: Arc<dyn HypeProvider>,
        config: ProjectionConfig,
    ) -> Self {
        Self {
            price_provider,
            hype_provider,
            config,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Evaluates a single asset against a fresh quote. Used by the
    /// interactive driver.
    pub async fn evaluate_one(
        &self,
        asset: &AssetDescriptor,
    ) -> Result<AssetEvaluation, ProjectionError> {
        let snapshot = self
            .price_provider
            .fetch_prices(std::slice::from_ref(asset))
            .await;
        self.evaluate_with_snapshot(asset, &snapshot).await
    }

    /// One full pass over the universe: a single batched price fetch, then
    /// per-asset evaluation. A failure on one asset is logged and skipped so
    /// the rest of the pass still runs; non-neutral signals go out through
    /// the notifier.
    pub async fn run_pass(&self, assets: &[AssetDescriptor]) -> Vec<AssetEvaluation> {
        info!("Evaluating {} assets", assets.len());
        let snapshot = self.price_provider.fetch_prices(assets).await;

        let mut evaluations = Vec::with_capacity(assets.len());
        for asset in assets {
            match self.evaluate_with_snapshot(asset, &snapshot).await {
                Ok(evaluation) => {
                    info!(
                        "{}: {} (median {:+.1}%, pump {:.0}%, hype {:.0}%)",
                        evaluation.symbol,
                        evaluation.signal.kind.as_str(),
                        evaluation.projection.median_return * 100.0,
                        evaluation.projection.pump_probability * 100.0,
                        evaluation.hype * 100.0
                    );

                    if evaluation.signal.is_actionable() {
                        if let Err(e) = self.dispatch(&evaluation).await {
                            warn!("Alert delivery failed for {}: {}", evaluation.symbol, e);
                        }
                    }

                    evaluations.push(evaluation);
                }
                Err(e) => error!("Skipping {}: {}", asset.symbol, e),
            }
        }

        evaluations
    }

    /// Formats and sends the alert for one evaluation, returning the
    /// notifier's outcome to the caller.
    pub async fn dispatch(&self, evaluation: &AssetEvaluation) -> Result<(), NotifyError> {
        let Some(notifier) = &self.notifier else {
            warn!(
                "No notifier configured, dropping {} alert for {}",
                evaluation.signal.kind.as_str(),
                evaluation.symbol
            );
            return Ok(());
        };

        let message = format_alert(evaluation);
        notifier.notify(&message).await?;

        info!(
            "{} alert for {} delivered",
            evaluation.signal.kind.as_str(),
            evaluation.symbol
        );
        Ok(())
    }

    async fn evaluate_with_snapshot(
        &self,
        asset: &AssetDescriptor,
        snapshot: &PriceSnapshot,
    ) -> Result<AssetEvaluation, ProjectionError> {
        let (price, used_fallback) = snapshot.price_or_fallback(&asset.symbol);

        // Misbehaving providers must not push the classifier out of its
        // domain.
        let hype = self
            .hype_provider
            .hype_score(&asset.symbol)
            .await
            .clamp(0.0, 1.0);

        let projection = project(
            price,
            self.config.horizon_days,
            asset.drift,
            asset.volatility,
            self.config.sample_count,
            &mut rand::thread_rng(),
        )?;

        let signal = classify(price, &projection, hype);

        Ok(AssetEvaluation {
            symbol: asset.symbol.clone(),
            price,
            degraded: used_fallback,
            projection,
            hype,
            signal,
            evaluated_at: snapshot.fetched_at,
        })
    }
}

/// The notification text: header with the signal and symbol, UTC timestamp,
/// the classifier's rationale, and the risk footer. Degraded evaluations
/// carry an explicit fallback-price marker.
pub fn format_alert(evaluation: &AssetEvaluation) -> String {
    let mut message = format!(
        "🚨 {} ALERT for {}!\n⏰ {}\n{}",
        evaluation.signal.kind.as_str(),
        evaluation.symbol,
        evaluation.evaluated_at.format("%Y-%m-%d %H:%M UTC"),
        evaluation.signal.rationale
    );

    if evaluation.degraded {
        message.push_str("\n⚠ Based on the fallback price, the quote feed was unavailable.");
    }

    message.push_str("\nHigh risk! DYOR.");
    message
}
