//! Configuration management for the tpsmon telemetry tools

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    ChartSettings, Config, DatabaseConfig, LoggingSettings, PeriodSettings, StorageConfig,
};
