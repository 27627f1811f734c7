pub mod app;
pub mod competition;
pub mod config;
pub mod error;
pub mod telemetry;
