pub mod config;
pub mod constitution;
pub mod error;
pub mod telemetry;
