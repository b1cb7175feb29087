use serde::{Deserialize, Serialize};

/// A tracked asset with its price-API identifier and the hand-tuned
/// annualized drift/volatility the projection model runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub symbol: String,
    pub source_id: String,
    pub drift: f64,
    pub volatility: f64,
}

impl AssetDescriptor {
    pub fn new(
        symbol: impl Into<String>,
        source_id: impl Into<String>,
        drift: f64,
        volatility: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            source_id: source_id.into(),
            drift,
            volatility,
        }
    }
}

/// The fixed universe this tool watches. No dynamic add/remove; the set is
/// decided at startup.
pub fn tracked_assets() -> Vec<AssetDescriptor> {
    vec![
        AssetDescriptor::new("TAO", "bittensor", 2.5, 1.5),
        AssetDescriptor::new("FET", "fetch-ai", 2.2, 1.3),
        AssetDescriptor::new("RNDR", "render", 2.4, 1.4),
        AssetDescriptor::new("NEAR", "near-protocol", 2.0, 1.2),
        AssetDescriptor::new("QUBIC", "qubic-network", 2.8, 1.6),
    ]
}
