//! Domain types shared across the tpsmon tools

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A labeled, inclusive calendar-date range within a season.
///
/// Periods are loaded once from configuration and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Human-readable phase label (e.g. "Regular Season", "Playoffs")
    pub phase: String,
    /// Season identifier, used as the storage path namespace (e.g. "2024")
    pub season: String,
    /// First calendar date of the period (inclusive)
    pub start_date: NaiveDate,
    /// Last calendar date of the period (inclusive)
    pub end_date: NaiveDate,
}

impl Period {
    /// Whether the given calendar date falls within this period's
    /// inclusive [start_date, end_date] range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Per-minute throughput statistics for one minute that saw at least one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteBucket {
    /// Timestamp truncated to the containing minute
    pub minute: NaiveDateTime,
    /// Total number of events observed in the minute
    pub count: u64,
    /// count / 60, rounded to one decimal place
    pub mean_tps: f64,
    /// Maximum per-second event count observed within the minute
    pub peak_tps: u32,
}

/// An ordered per-minute series for one calendar date.
///
/// Minutes with zero events are absent, not zero: the series is sparse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TpsSeries {
    pub buckets: Vec<MinuteBucket>,
}

impl TpsSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MinuteBucket> {
        self.buckets.iter()
    }

    /// Global maximum of mean_tps with the index of its first occurrence
    pub fn top_mean(&self) -> Option<(usize, f64)> {
        self.buckets
            .iter()
            .enumerate()
            .fold(None, |top, (i, b)| match top {
                Some((_, best)) if b.mean_tps <= best => top,
                _ => Some((i, b.mean_tps)),
            })
    }

    /// Global maximum of peak_tps with the index of its first occurrence
    pub fn top_peak(&self) -> Option<(usize, u32)> {
        self.buckets
            .iter()
            .enumerate()
            .fold(None, |top, (i, b)| match top {
                Some((_, best)) if b.peak_tps <= best => top,
                _ => Some((i, b.peak_tps)),
            })
    }
}

impl From<Vec<MinuteBucket>> for TpsSeries {
    fn from(buckets: Vec<MinuteBucket>) -> Self {
        Self { buckets }
    }
}
