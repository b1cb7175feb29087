use async_trait::async_trait;

use common::providers::HypeProvider;

/// Score handed out for symbols the table does not know.
pub const DEFAULT_HYPE_SCORE: f64 = 0.5;

/// Hand-curated sentiment table, refreshed manually from social chatter.
///
/// Stand-in for a live sentiment feed; anything that implements
/// [`HypeProvider`] can replace it without the classifier noticing.
pub struct StaticHypeSource;

impl StaticHypeSource {
    pub fn new() -> Self {
        Self
    }

    fn table_score(symbol: &str) -> Option<f64> {
        match symbol {
            "TAO" => Some(0.65),
            "FET" => Some(0.72),
            "RNDR" => Some(0.68),
            "NEAR" => Some(0.60),
            "QUBIC" => Some(0.75),
            _ => None,
        }
    }
}

impl Default for StaticHypeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HypeProvider for StaticHypeSource {
    async fn hype_score(&self, symbol: &str) -> f64 {
        Self::table_score(symbol).unwrap_or(DEFAULT_HYPE_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_symbols_use_the_table() {
        let source = StaticHypeSource::new();

        assert_eq!(source.hype_score("TAO").await, 0.65);
        assert_eq!(source.hype_score("QUBIC").await, 0.75);
    }

    #[tokio::test]
    async fn test_unknown_symbols_default_to_half() {
        let source = StaticHypeSource::new();

        assert_eq!(source.hype_score("DOGE").await, DEFAULT_HYPE_SCORE);
        assert_eq!(source.hype_score("").await, DEFAULT_HYPE_SCORE);
    }
}
