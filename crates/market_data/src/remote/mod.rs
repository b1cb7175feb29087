use std::env;

pub mod coingecko_client;
pub mod simple_price_response;

pub use coingecko_client::CoinGeckoClient;
pub use simple_price_response::SimplePriceResponse;

pub fn get_api_base_url() -> String {
    env::var("COINGECKO_API_URL")
        .unwrap_or_else(|_| "https://api.coingecko.com/api/v3".to_string())
}
