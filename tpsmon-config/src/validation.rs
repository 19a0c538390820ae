//! Custom validation functions for configuration values

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::settings::PeriodSettings;

/// Matches #RGB or #RRGGBB hex colors
pub static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

/// Validate a tracing level name
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Enforce the period invariant start_date <= end_date
pub fn validate_period_dates(period: &PeriodSettings) -> Result<(), ValidationError> {
    if period.start_date > period.end_date {
        return Err(ValidationError::new("period_dates_out_of_order"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#1f77b4"));
        assert!(HEX_COLOR_REGEX.is_match("#abc"));
        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
        assert!(!HEX_COLOR_REGEX.is_match("#12345"));
    }

    #[test]
    fn test_validate_log_level() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            assert!(validate_log_level(level).is_ok(), "{level} should be valid");
        }
        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("").is_err());
    }

    #[test]
    fn test_validate_period_dates() {
        let mut period = PeriodSettings {
            phase: "Regular Season".to_string(),
            season: "2024".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 9, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
        };
        assert!(validate_period_dates(&period).is_ok());

        // A single-day period is allowed
        period.end_date = period.start_date;
        assert!(validate_period_dates(&period).is_ok());

        period.end_date = NaiveDate::from_ymd_opt(2024, 9, 4).unwrap();
        assert!(validate_period_dates(&period).is_err());
    }
}
