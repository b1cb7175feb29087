use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use common::models::{AssetDescriptor, PriceSnapshot};
use common::providers::PriceProvider;

use crate::remote::CoinGeckoClient;

/// Spot-price source over the CoinGecko simple-price endpoint.
///
/// Fails open: any transport or parse error is logged loudly and the pass
/// runs on a degraded fallback snapshot instead of aborting. Signals built
/// from fallback prices carry that mark all the way to the alert text.
pub struct PriceService {
    client: CoinGeckoClient,
}

impl PriceService {
    pub fn new() -> Self {
        Self {
            client: CoinGeckoClient::new(),
        }
    }

    pub fn with_client(client: CoinGeckoClient) -> Self {
        Self { client }
    }
}

impl Default for PriceService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for PriceService {
    async fn fetch_prices(&self, assets: &[AssetDescriptor]) -> PriceSnapshot {
        let ids: Vec<&str> = assets.iter().map(|a| a.source_id.as_str()).collect();

        match self.client.fetch_simple_prices(&ids).await {
            Ok(response) => {
                let snapshot = response.to_snapshot(assets, Utc::now());
                debug!(
                    "Fetched {}/{} prices",
                    snapshot.prices.len(),
                    assets.len()
                );
                snapshot
            }
            Err(e) => {
                warn!(
                    "Price fetch failed, running DEGRADED on fallback prices: {:#}",
                    e
                );
                PriceSnapshot::fallback()
            }
        }
    }
}
