use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Substitute quote used when the price API cannot give us a real one.
/// Evaluations built on it are marked degraded and must be flagged as such
/// wherever they surface.
pub const FALLBACK_PRICE_USD: f64 = 300.0;

/// Spot prices for one evaluation pass. Each snapshot supersedes the prior
/// one; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Symbol to last USD price, holding only quotes the API actually
    /// returned.
    pub prices: HashMap<String, f64>,
    /// True when at least one symbol will resolve to the fallback price.
    pub degraded: bool,
    pub fetched_at: DateTime<Utc>,
}

impl PriceSnapshot {
    /// Snapshot for a pass where the price API was unreachable: every lookup
    /// resolves to [`FALLBACK_PRICE_USD`].
    pub fn fallback() -> Self {
        Self {
            prices: HashMap::new(),
            degraded: true,
            fetched_at: Utc::now(),
        }
    }

    /// Price for `symbol`, substituting the fallback constant for anything
    /// the API did not quote. The second value reports whether the fallback
    /// was used.
    pub fn price_or_fallback(&self, symbol: &str) -> (f64, bool) {
        match self.prices.get(symbol) {
            Some(&price) => (price, false),
            None => (FALLBACK_PRICE_USD, true),
        }
    }
}
