//! Collection pipeline: resolve the period, sample events, aggregate, persist

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::info;

use tpsmon_config::Config;
use tpsmon_series::{aggregate, EventSource, PeriodCatalog, PgEventSource, SeriesStore};

/// The inclusive [00:00:00, 23:59:59] window for a calendar date
fn day_window(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = start + Duration::days(1) - Duration::seconds(1);
    (start, end)
}

pub async fn run(config: &Config, target_date: NaiveDate) -> Result<()> {
    let catalog = PeriodCatalog::from_config(config);
    let Some(period) = catalog.find_period(target_date) else {
        info!(date = %target_date, "date is outside every configured period, nothing to collect");
        return Ok(());
    };

    let (window_start, window_end) = day_window(target_date);

    let source = PgEventSource::connect(&config.database).await?;
    let events = source.fetch_events(window_start, window_end).await?;
    source.close().await;

    let series = aggregate(events, window_start, window_end);

    let store = SeriesStore::from_config(config);
    let path = store.save(&series, &period.season, target_date)?;

    info!(
        date = %target_date,
        phase = %period.phase,
        season = %period.season,
        buckets = series.len(),
        path = %path.display(),
        "collection finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_window_bounds() {
        let date: NaiveDate = "2024-09-10".parse().unwrap();
        let (start, end) = day_window(date);

        assert_eq!(start.to_string(), "2024-09-10 00:00:00");
        assert_eq!(end.to_string(), "2024-09-10 23:59:59");
    }
}
