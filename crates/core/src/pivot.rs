//! Rolling-window pivot math.
//!
//! A pivot is a zero-filled series with one slot per local calendar day (or
//! per hour) ending at "now". Storage fetches the raw rows for the window
//! returned by [`daily_window`] / [`hourly_window`]; the functions here build
//! the series and fold the rows into it. Everything is generic over the
//! bucket time zone so day boundaries are an explicit input.

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A single dose at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoseEvent {
    pub at: DateTime<Utc>,
    pub dose: f64,
}

/// One slot of a pivot series. `created_at` is the slot label in the bucket
/// zone: `YYYY-MM-DD` for daily totals, `YYYY-MM-DD HH:00` for hourly counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotPoint {
    pub created_at: String,
    pub total: f64,
}

/// Resolve a local wall-clock time to UTC.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap move forward by an hour.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(naive + TimeDelta::hours(1)))
            .earliest()
            .map_or_else(|| naive.and_utc(), |t| t.with_timezone(&Utc)),
    }
}

/// UTC instant of local midnight starting `date`.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    resolve_local(tz, date.and_time(chrono::NaiveTime::MIN))
}

/// Half-open UTC range `[start, end)` covering local `date`.
pub fn day_bounds<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
    (local_midnight(tz, date), local_midnight(tz, next))
}

/// Half-open UTC range covering today and the `days` local days before it.
pub fn daily_window<Tz: TimeZone>(
    tz: &Tz,
    days: u32,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.with_timezone(tz).date_naive();
    let first = today - Days::new(u64::from(days));
    let (_, end) = day_bounds(tz, today);
    (local_midnight(tz, first), end)
}

/// Sum doses per local day. Returns exactly `days + 1` points, oldest first.
pub fn daily_totals<Tz: TimeZone>(
    tz: &Tz,
    events: &[DoseEvent],
    days: u32,
    now: DateTime<Utc>,
) -> Vec<PivotPoint> {
    let today = now.with_timezone(tz).date_naive();
    let first = today - Days::new(u64::from(days));
    let mut totals = vec![0.0_f64; days as usize + 1];

    for event in events {
        let day = event.at.with_timezone(tz).date_naive();
        let Ok(idx) = usize::try_from((day - first).num_days()) else {
            continue;
        };
        if let Some(slot) = totals.get_mut(idx) {
            *slot += event.dose;
        }
    }

    first
        .iter_days()
        .zip(totals)
        .map(|(day, total)| PivotPoint { created_at: day.format("%Y-%m-%d").to_string(), total })
        .collect()
}

/// UTC instant at which the local hour containing `now` began.
pub fn current_hour_start<Tz: TimeZone>(tz: &Tz, now: DateTime<Utc>) -> DateTime<Utc> {
    let local = now.with_timezone(tz);
    let into_hour = TimeDelta::seconds(i64::from(local.minute() * 60 + local.second()))
        + TimeDelta::nanoseconds(i64::from(local.nanosecond()));
    now - into_hour
}

/// Half-open UTC range covering the current local hour and `hours` before it.
pub fn hourly_window<Tz: TimeZone>(
    tz: &Tz,
    hours: u32,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let current = current_hour_start(tz, now);
    (current - TimeDelta::hours(i64::from(hours)), current + TimeDelta::hours(1))
}

/// Count events per hour. Returns exactly `hours + 1` points, oldest first.
///
/// Slots are real 60-minute spans, so a DST fall-back shows the repeated
/// wall-clock hour twice instead of merging it.
pub fn hourly_histogram<Tz: TimeZone>(
    tz: &Tz,
    events: &[DateTime<Utc>],
    hours: u32,
    now: DateTime<Utc>,
) -> Vec<PivotPoint>
where
    Tz::Offset: std::fmt::Display,
{
    let (start, _) = hourly_window(tz, hours, now);
    let mut counts = vec![0_u32; hours as usize + 1];

    for at in events {
        let Ok(idx) = usize::try_from((*at - start).num_seconds().div_euclid(3600)) else {
            continue;
        };
        if let Some(slot) = counts.get_mut(idx) {
            *slot += 1;
        }
    }

    counts
        .into_iter()
        .zip(0_i64..)
        .map(|(count, i)| {
            let slot = (start + TimeDelta::hours(i)).with_timezone(tz);
            PivotPoint {
                created_at: slot.format("%Y-%m-%d %H:00").to_string(),
                total: f64::from(count),
            }
        })
        .collect()
}
