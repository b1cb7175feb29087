use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::Client;

use crate::remote::{get_api_base_url, simple_price_response::SimplePriceResponse};

pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self::with_base_url(get_api_base_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("pump_alert_bot/0.1.0")
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client."),
            base_url: base_url.into(),
        }
    }

    /// GET `/simple/price` for the given provider ids, quoted in USD.
    pub async fn fetch_simple_prices(&self, ids: &[&str]) -> anyhow::Result<SimplePriceResponse> {
        let url = format!("{}/simple/price", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", ids.join(",").as_str()), ("vs_currencies", "usd")])
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            bail!("CoinGecko returned HTTP {}", status);
        }

        let data = response
            .json::<SimplePriceResponse>()
            .await
            .context("Failed to parse JSON response")?;
        Ok(data)
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}
