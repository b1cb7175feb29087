pub mod asset;
pub mod projection;
pub mod signal;
pub mod snapshot;

pub use asset::{AssetDescriptor, tracked_assets};
pub use projection::ProjectionResult;
pub use signal::{Signal, SignalKind};
pub use snapshot::{FALLBACK_PRICE_USD, PriceSnapshot};
