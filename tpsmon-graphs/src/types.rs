//! Chart configuration types

use serde::{Deserialize, Serialize};

use tpsmon_config::ChartSettings;

/// Rendering configuration for a TPS chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart width in pixels
    pub width: u32,
    /// Chart height in pixels
    pub height: u32,
    /// Background color (hex format)
    pub background_color: String,
    /// Line color for the mean-TPS series (hex format)
    pub mean_color: String,
    /// Line color for the peak-TPS series (hex format)
    pub peak_color: String,
    /// Font family for text rendering
    pub font_family: String,
    /// Font size for axis labels
    pub font_size: u32,
    /// Chart margins
    pub margins: MarginConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            mean_color: "#0000FF".to_string(),
            peak_color: "#FF0000".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 12,
            margins: MarginConfig::default(),
        }
    }
}

impl From<&ChartSettings> for ChartConfig {
    fn from(settings: &ChartSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            background_color: settings.background_color.clone(),
            mean_color: settings.mean_color.clone(),
            peak_color: settings.peak_color.clone(),
            font_family: settings.font_family.clone(),
            font_size: settings.font_size,
            margins: MarginConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Title font size, scaled up from the label font size
    pub fn title_font_size(&self) -> u32 {
        self.font_size + 8
    }
}

/// Margin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 40,
            left: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.width, 1000);
        assert_eq!(config.height, 600);
        assert_eq!(config.title_font_size(), 20);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = ChartSettings::default();
        settings.width = 1600;
        settings.mean_color = "#1f77b4".to_string();

        let config = ChartConfig::from(&settings);
        assert_eq!(config.width, 1600);
        assert_eq!(config.mean_color, "#1f77b4");
        assert_eq!(config.margins.left, 60);
    }
}
