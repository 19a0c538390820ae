//! Period catalog: resolve a calendar date to its configured period

use chrono::NaiveDate;

use tpsmon_common::Period;
use tpsmon_config::Config;

/// Read-only catalog of the configured calendar periods.
///
/// Loaded once at startup; lookups scan in declaration order, so when
/// periods overlap the first declared match wins. Overlaps are not
/// rejected at load time.
#[derive(Debug, Clone)]
pub struct PeriodCatalog {
    periods: Vec<Period>,
}

impl PeriodCatalog {
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.periods())
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Find the first declared period whose inclusive date range contains `date`.
    pub fn find_period(&self, date: NaiveDate) -> Option<&Period> {
        self.periods.iter().find(|p| p.contains(date))
    }
}
