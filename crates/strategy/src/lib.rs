pub mod classifier;
pub mod projection;
pub mod services;
