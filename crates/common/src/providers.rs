use async_trait::async_trait;

use crate::models::{AssetDescriptor, PriceSnapshot};

/// Source of current spot prices.
///
/// Implementations fail open: a transport or parse problem yields a degraded
/// fallback snapshot, never an error. Callers can always evaluate with
/// whatever comes back.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_prices(&self, assets: &[AssetDescriptor]) -> PriceSnapshot;
}

/// Sentiment indicator in [0, 1] for a symbol. The static table shipped with
/// this repo and any future live sentiment feed plug in behind the same
/// trait, so the classifier never changes.
#[async_trait]
pub trait HypeProvider: Send + Sync {
    async fn hype_score(&self, symbol: &str) -> f64;
}
