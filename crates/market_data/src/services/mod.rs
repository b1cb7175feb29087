pub mod hype_service;
pub mod price_service;

pub use hype_service::{DEFAULT_HYPE_SCORE, StaticHypeSource};
pub use price_service::PriceService;
