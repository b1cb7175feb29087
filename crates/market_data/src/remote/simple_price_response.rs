use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use common::models::{AssetDescriptor, FALLBACK_PRICE_USD, PriceSnapshot};

#[derive(Debug, Deserialize)]
pub struct CurrencyQuote {
    pub usd: Option<f64>,
}

/// CoinGecko `/simple/price` payload: provider id to currency-keyed quotes.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct SimplePriceResponse(pub HashMap<String, CurrencyQuote>);

impl SimplePriceResponse {
    /// Map provider ids back to our symbols. A missing id or missing USD
    /// quote leaves the symbol out of the map, so it resolves to
    /// [`FALLBACK_PRICE_USD`] at read time and the snapshot is marked
    /// degraded.
    pub fn to_snapshot(
        &self,
        assets: &[AssetDescriptor],
        fetched_at: DateTime<Utc>,
    ) -> PriceSnapshot {
        let mut prices = HashMap::with_capacity(assets.len());
        let mut degraded = false;

        for asset in assets {
            match self.0.get(&asset.source_id).and_then(|quote| quote.usd) {
                Some(usd) => {
                    prices.insert(asset.symbol.clone(), usd);
                }
                None => {
                    warn!(
                        "No USD quote for {} ({}), will use fallback price {}",
                        asset.symbol, asset.source_id, FALLBACK_PRICE_USD
                    );
                    degraded = true;
                }
            }
        }

        PriceSnapshot {
            prices,
            degraded,
            fetched_at,
        }
    }
}
