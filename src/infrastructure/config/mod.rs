//! Configuration loading and logging initialization.

pub mod logging;
pub mod settings;

pub use logging::{LogFormat, LoggingConfig};
pub use settings::{AdvisorConfig, Config, SettlementConfig, DATABASE_ENV};
