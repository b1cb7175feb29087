pub mod config;
pub mod scheduler;
pub mod services;
pub mod ui;
