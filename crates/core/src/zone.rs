//! Bucket time zone selection.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

use crate::pivot::{self, DoseEvent, PivotPoint};

/// Zone used to assign events to calendar days and hours.
///
/// `Local` follows the server's zone database (including DST); `Fixed` pins
/// an explicit UTC offset, which keeps tests and multi-host deployments
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

macro_rules! with_zone {
    ($self:expr, |$tz:ident| $body:expr) => {
        match $self {
            BucketZone::Local => {
                let $tz = &Local;
                $body
            },
            BucketZone::Fixed(offset) => {
                let $tz = offset;
                $body
            },
        }
    };
}

impl BucketZone {
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Calendar date of `now` in this zone.
    #[must_use]
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        with_zone!(self, |tz| now.with_timezone(tz).date_naive())
    }

    /// Half-open UTC range covering local `date`.
    #[must_use]
    pub fn day_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        with_zone!(self, |tz| pivot::day_bounds(tz, date))
    }

    /// `date` at the current local time of day, as UTC.
    #[must_use]
    pub fn at_current_time(&self, date: NaiveDate, now: DateTime<Utc>) -> DateTime<Utc> {
        with_zone!(self, |tz| {
            let time = now.with_timezone(tz).time();
            pivot::resolve_local(tz, date.and_time(time))
        })
    }

    #[must_use]
    pub fn daily_window(&self, days: u32, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        with_zone!(self, |tz| pivot::daily_window(tz, days, now))
    }

    #[must_use]
    pub fn hourly_window(&self, hours: u32, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        with_zone!(self, |tz| pivot::hourly_window(tz, hours, now))
    }

    #[must_use]
    pub fn daily_totals(
        &self,
        events: &[DoseEvent],
        days: u32,
        now: DateTime<Utc>,
    ) -> Vec<PivotPoint> {
        with_zone!(self, |tz| pivot::daily_totals(tz, events, days, now))
    }

    #[must_use]
    pub fn hourly_histogram(
        &self,
        events: &[DateTime<Utc>],
        hours: u32,
        now: DateTime<Utc>,
    ) -> Vec<PivotPoint> {
        with_zone!(self, |tz| pivot::hourly_histogram(tz, events, hours, now))
    }
}

impl Display for BucketZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for BucketZone {
    type Err = String;

    /// Accepts `local`, `utc`/`Z`, or an offset like `+05:30`, `-0500`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "local" | "" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::utc()),
            _ => {},
        }
        let invalid = || format!("invalid UTC offset '{s}', expected e.g. +05:30");
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::Fixed)
            .ok_or_else(invalid)
    }
}
