//! Per-minute rate aggregation
//!
//! Raw event timestamps are folded twice: first into per-second counts,
//! then per-second counts into per-minute {sum, max}. Minutes without any
//! event are absent from the output, not emitted as zeros.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Timelike};

use tpsmon_common::{MinuteBucket, TpsSeries};

/// Truncate a timestamp to its containing second
fn truncate_to_second(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Truncate a second-aligned timestamp to its containing minute
fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0).unwrap_or(ts)
}

/// Round to one decimal place, half away from zero
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Aggregate raw event timestamps within the inclusive
/// [window_start, window_end] range into an ordered per-minute series.
///
/// Each bucket carries the event count for the minute, the mean
/// transactions-per-second (count / 60, one decimal place), and the peak
/// per-second count observed within the minute.
pub fn aggregate<I>(events: I, window_start: NaiveDateTime, window_end: NaiveDateTime) -> TpsSeries
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    // Stage one: count events per containing second
    let per_second: BTreeMap<NaiveDateTime, u32> = events
        .into_iter()
        .filter(|ts| *ts >= window_start && *ts <= window_end)
        .map(truncate_to_second)
        .fold(BTreeMap::new(), |mut seconds, second| {
            *seconds.entry(second).or_insert(0) += 1;
            seconds
        });

    // Stage two: fold per-second counts into per-minute {sum, max}
    let per_minute: BTreeMap<NaiveDateTime, (u64, u32)> =
        per_second
            .into_iter()
            .fold(BTreeMap::new(), |mut minutes, (second, count)| {
                let entry = minutes.entry(truncate_to_minute(second)).or_insert((0, 0));
                entry.0 += u64::from(count);
                entry.1 = entry.1.max(count);
                minutes
            });

    let buckets = per_minute
        .into_iter()
        .map(|(minute, (count, peak))| MinuteBucket {
            minute,
            count,
            mean_tps: round_to_tenth(count as f64 / 60.0),
            peak_tps: peak,
        })
        .collect();

    TpsSeries { buckets }
}
