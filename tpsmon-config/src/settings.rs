//! Application configuration structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use tpsmon_common::Period;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Transaction database connection settings
    #[validate]
    pub database: DatabaseConfig,

    /// Flat-file storage settings
    #[validate]
    pub storage: StorageConfig,

    /// Chart rendering settings
    #[validate]
    pub chart: ChartSettings,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,

    /// Named calendar periods, in declaration order.
    /// When periods overlap, the first declared match wins.
    #[validate]
    pub periods: Vec<PeriodSettings>,
}

/// Transaction database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database server hostname
    #[validate(length(min = 1, message = "Database host cannot be empty"))]
    pub host: String,

    /// Database server port
    #[validate(range(min = 1, message = "Database port must be non-zero"))]
    pub port: u16,

    /// Database user
    #[validate(length(min = 1, message = "Database username cannot be empty"))]
    pub username: String,

    /// Database password
    pub password: String,

    /// Database name
    #[validate(length(min = 1, message = "Database name cannot be empty"))]
    pub dbname: String,

    /// Transaction table to sample, optionally schema-qualified
    #[validate(length(min = 1, message = "Transaction table cannot be empty"))]
    pub table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "default_user".to_string(),
            password: "default_pass".to_string(),
            dbname: "default_db".to_string(),
            table: "transactions".to_string(),
        }
    }
}

/// Flat-file storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory for series records and chart artifacts
    #[validate(length(min = 1, message = "Data directory cannot be empty"))]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartSettings {
    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be a valid hex color"))]
    pub background_color: String,

    /// Line color for the mean-TPS series (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Mean color must be a valid hex color"))]
    pub mean_color: String,

    /// Line color for the peak-TPS series (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Peak color must be a valid hex color"))]
    pub peak_color: String,

    /// Font family for text rendering
    pub font_family: String,

    /// Font size for axis labels
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub font_size: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        // 1000x600 matches the original 10x6 inch figure at 100 dpi
        Self {
            width: 1000,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            mean_color: "#0000FF".to_string(),
            peak_color: "#FF0000".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 12,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// One named calendar period within a season
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "crate::validation::validate_period_dates", skip_on_field_errors = false))]
pub struct PeriodSettings {
    /// Phase label (e.g. "Regular Season")
    #[validate(length(min = 1, message = "Period phase cannot be empty"))]
    pub phase: String,

    /// Season identifier used as storage namespace (e.g. "2024")
    #[validate(length(min = 1, message = "Period season cannot be empty"))]
    pub season: String,

    /// First date of the period (inclusive)
    pub start_date: NaiveDate,

    /// Last date of the period (inclusive)
    pub end_date: NaiveDate,
}

impl From<&PeriodSettings> for Period {
    fn from(settings: &PeriodSettings) -> Self {
        Period {
            phase: settings.phase.clone(),
            season: settings.season.clone(),
            start_date: settings.start_date,
            end_date: settings.end_date,
        }
    }
}

impl Config {
    /// Validate the entire configuration, including nested sections
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }

    /// The configured periods as domain values, declaration order preserved
    pub fn periods(&self) -> Vec<Period> {
        self.periods.iter().map(Period::from).collect()
    }
}
