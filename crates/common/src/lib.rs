pub mod logger;
pub mod models;
pub mod notify;
pub mod providers;
