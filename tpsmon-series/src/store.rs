//! Flat-file series storage
//!
//! One record collection per calendar date, grouped under its season:
//! `<data_dir>/tps/<season>/transactions_<date>.csv`. Records are
//! `minute,count,mean,peak` lines with no header, minute-ascending.
//! Chart artifacts live next door under `<data_dir>/charts/<season>/`.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use tpsmon_common::{MinuteBucket, Result, TpsError, TpsSeries};
use tpsmon_config::Config;

const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Store for per-minute series records and chart artifact paths
#[derive(Debug, Clone)]
pub struct SeriesStore {
    data_dir: PathBuf,
}

impl SeriesStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.storage.data_dir)
    }

    /// Path of the series record file for a season and date
    pub fn data_path(&self, season: &str, date: NaiveDate) -> PathBuf {
        self.data_dir
            .join("tps")
            .join(season)
            .join(format!("transactions_{date}.csv"))
    }

    /// Path of the chart artifact for a season and date
    pub fn chart_path(&self, season: &str, date: NaiveDate) -> PathBuf {
        self.data_dir
            .join("charts")
            .join(season)
            .join(format!("{date}.png"))
    }

    /// Create the chart directory for a season and return the artifact path
    pub fn prepare_chart_path(&self, season: &str, date: NaiveDate) -> Result<PathBuf> {
        let path = self.chart_path(season, date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    /// Persist a series for the given season and date, creating the season
    /// directory as needed. An empty series writes an empty record file,
    /// which is distinct from no file at all.
    pub fn save(&self, series: &TpsSeries, season: &str, date: NaiveDate) -> Result<PathBuf> {
        let path = self.data_path(season, date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = fs::File::create(&path)?;
        let mut writer = BufWriter::new(file);
        for bucket in series.iter() {
            writeln!(
                writer,
                "{},{},{:.1},{}",
                bucket.minute.format(MINUTE_FORMAT),
                bucket.count,
                bucket.mean_tps,
                bucket.peak_tps
            )?;
        }
        writer.flush()?;

        debug!(path = %path.display(), buckets = series.len(), "saved series");
        Ok(path)
    }

    /// Load a previously persisted series.
    ///
    /// Returns `Ok(None)` when no record file exists for the date, so
    /// callers can tell "never collected" apart from "collected, zero
    /// activity" (an existing empty file). Any malformed line is a hard
    /// error for the whole load.
    pub fn load(&self, season: &str, date: NaiveDate) -> Result<Option<TpsSeries>> {
        let path = self.data_path(season, date);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let mut buckets = Vec::new();
        for (index, line) in content.lines().enumerate() {
            buckets.push(parse_record(line, index + 1, &path)?);
        }

        Ok(Some(TpsSeries { buckets }))
    }
}

/// Parse one `minute,count,mean,peak` record line
fn parse_record(line: &str, line_number: usize, path: &Path) -> Result<MinuteBucket> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 4 {
        return Err(TpsError::store_at(
            format!(
                "line {line_number}: expected 4 fields, found {}",
                fields.len()
            ),
            path.display().to_string(),
        ));
    }

    let minute = NaiveDateTime::parse_from_str(fields[0], MINUTE_FORMAT).map_err(|e| {
        TpsError::store_at(
            format!("line {line_number}: invalid minute timestamp: {e}"),
            path.display().to_string(),
        )
    })?;
    let count: u64 = fields[1].parse().map_err(|e| {
        TpsError::store_at(
            format!("line {line_number}: invalid count: {e}"),
            path.display().to_string(),
        )
    })?;
    let mean_tps: f64 = fields[2].parse().map_err(|e| {
        TpsError::store_at(
            format!("line {line_number}: invalid mean rate: {e}"),
            path.display().to_string(),
        )
    })?;
    let peak_tps: u32 = fields[3].parse().map_err(|e| {
        TpsError::store_at(
            format!("line {line_number}: invalid peak rate: {e}"),
            path.display().to_string(),
        )
    })?;

    Ok(MinuteBucket {
        minute,
        count,
        mean_tps,
        peak_tps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_series() -> TpsSeries {
        TpsSeries {
            buckets: vec![
                MinuteBucket {
                    minute: ts("2024-09-10 10:00:00"),
                    count: 4,
                    mean_tps: 0.1,
                    peak_tps: 2,
                },
                MinuteBucket {
                    minute: ts("2024-09-10 10:02:00"),
                    count: 120,
                    mean_tps: 2.0,
                    peak_tps: 7,
                },
            ],
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SeriesStore::new(temp_dir.path());
        let series = sample_series();

        let path = store
            .save(&series, "2024", date("2024-09-10"))
            .expect("save failed");
        assert!(path.ends_with("tps/2024/transactions_2024-09-10.csv"));

        let loaded = store
            .load("2024", date("2024-09-10"))
            .expect("load failed")
            .expect("file should exist");
        assert_eq!(loaded, series);
    }

    #[test]
    fn test_record_format() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SeriesStore::new(temp_dir.path());

        let path = store
            .save(&sample_series(), "2024", date("2024-09-10"))
            .expect("save failed");

        let content = fs::read_to_string(path).expect("read failed");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "2024-09-10 10:00:00,4,0.1,2");
        assert_eq!(lines[1], "2024-09-10 10:02:00,120,2.0,7");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SeriesStore::new(temp_dir.path());

        let loaded = store.load("2024", date("2024-09-10")).expect("load failed");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_empty_series_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SeriesStore::new(temp_dir.path());

        store
            .save(&TpsSeries::new(), "2024", date("2024-09-10"))
            .expect("save failed");

        // An empty file loads as an empty series, not as "not found"
        let loaded = store.load("2024", date("2024-09-10")).expect("load failed");
        assert_eq!(loaded, Some(TpsSeries::new()));
    }

    #[test]
    fn test_malformed_line_wrong_field_count() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SeriesStore::new(temp_dir.path());
        let path = store.data_path("2024", date("2024-09-10"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "2024-09-10 10:00:00,4,0.1\n").unwrap();

        let result = store.load("2024", date("2024-09-10"));
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("line 1"));
        assert!(message.contains("4 fields"));
    }

    #[test]
    fn test_malformed_line_non_numeric_field() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SeriesStore::new(temp_dir.path());
        let path = store.data_path("2024", date("2024-09-10"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "2024-09-10 10:00:00,4,0.1,2\n2024-09-10 10:01:00,many,0.1,2\n",
        )
        .unwrap();

        let result = store.load("2024", date("2024-09-10"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("line 2"));
    }

    #[test]
    fn test_chart_path_layout() {
        let store = SeriesStore::new("/var/lib/tpsmon");
        let path = store.chart_path("2024", date("2024-09-10"));
        assert_eq!(
            path,
            PathBuf::from("/var/lib/tpsmon/charts/2024/2024-09-10.png")
        );
    }

    #[test]
    fn test_prepare_chart_path_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SeriesStore::new(temp_dir.path());

        let path = store
            .prepare_chart_path("2024", date("2024-09-10"))
            .expect("prepare failed");
        assert!(path.parent().unwrap().is_dir());
    }
}
