//! Configuration loading with environment variable overrides
//!
//! Precedence order: environment variables -> YAML file -> defaults,
//! matching the behavior the collection scripts have always had.

use std::env;
use std::path::Path;

use thiserror::Error;

use crate::settings::Config;
use tpsmon_common::Result as TpsResult;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for tpsmon_common::TpsError {
    fn from(err: ConfigError) -> Self {
        tpsmon_common::TpsError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;

        config.validate_all().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from the default locations
    pub fn load() -> TpsResult<Config> {
        let config = if let Ok(config_path) = env::var("TPSMON_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config/config.yaml").exists() {
            Self::load_config("config/config.yaml")?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else {
            // No config file found, use defaults with env overrides
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TpsResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        // Database configuration overrides
        if let Ok(host) = env::var("DB_HOST") {
            config.database.host = host;
        }

        if let Ok(port) = env::var("DB_PORT") {
            config.database.port = port.parse().map_err(|e| ConfigError::EnvParseError {
                var: "DB_PORT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(user) = env::var("DB_USER") {
            config.database.username = user;
        }

        if let Ok(pass) = env::var("DB_PASS") {
            config.database.password = pass;
        }

        if let Ok(name) = env::var("DB_NAME") {
            config.database.dbname = name;
        }

        if let Ok(table) = env::var("DB_TABLE") {
            config.database.table = table;
        }

        // Storage configuration overrides
        if let Ok(data_dir) = env::var("TPSMON_DATA_DIR") {
            config.storage.data_dir = data_dir;
        }

        // Chart configuration overrides
        if let Ok(width) = env::var("CHART_WIDTH") {
            config.chart.width = width.parse().map_err(|e| ConfigError::EnvParseError {
                var: "CHART_WIDTH".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(height) = env::var("CHART_HEIGHT") {
            config.chart.height = height.parse().map_err(|e| ConfigError::EnvParseError {
                var: "CHART_HEIGHT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(bg_color) = env::var("CHART_BACKGROUND_COLOR") {
            config.chart.background_color = bg_color;
        }

        if let Ok(mean_color) = env::var("CHART_MEAN_COLOR") {
            config.chart.mean_color = mean_color;
        }

        if let Ok(peak_color) = env::var("CHART_PEAK_COLOR") {
            config.chart.peak_color = peak_color;
        }

        if let Ok(font_family) = env::var("CHART_FONT_FAMILY") {
            config.chart.font_family = font_family;
        }

        if let Ok(font_size) = env::var("CHART_FONT_SIZE") {
            config.chart.font_size = font_size.parse().map_err(|e| ConfigError::EnvParseError {
                var: "CHART_FONT_SIZE".to_string(),
                source: Box::new(e),
            })?;
        }

        // Logging configuration overrides
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = env::var("LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}
