use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::TimePoint;
use crate::error::ChartError;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Time granularity, ordered from finest to coarsest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 9] = [
        TimeUnit::Millisecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Quarter,
        TimeUnit::Year,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Average length of one unit. Months, quarters and years use calendar means.
    #[must_use]
    pub fn nominal_millis(self) -> f64 {
        match self {
            Self::Millisecond => 1.0,
            Self::Second => 1.0e3,
            Self::Minute => 6.0e4,
            Self::Hour => 3.6e6,
            Self::Day => 8.64e7,
            Self::Week => 6.048e8,
            Self::Month => 2.628e9,
            Self::Quarter => 7.884e9,
            Self::Year => 3.154e10,
        }
    }

    /// Next unit up, `None` for years.
    #[must_use]
    pub fn coarser(self) -> Option<Self> {
        let position = Self::ALL.iter().position(|unit| *unit == self)?;
        Self::ALL.get(position + 1).copied()
    }

    /// Start of the unit containing `time`, in UTC.
    ///
    /// Weeks start on Sunday. Returns `None` when `time` is outside the
    /// calendar range chrono can represent.
    #[must_use]
    pub fn truncate(self, time: TimePoint) -> Option<TimePoint> {
        match self {
            Self::Millisecond => Some(time),
            Self::Second => floor_to(time, MILLIS_PER_SECOND),
            Self::Minute => floor_to(time, MILLIS_PER_MINUTE),
            Self::Hour => floor_to(time, MILLIS_PER_HOUR),
            Self::Day => floor_to(time, MILLIS_PER_DAY),
            Self::Week => {
                let date = utc(time)?.date_naive();
                let back = i64::from(date.weekday().num_days_from_sunday());
                floor_to(time, MILLIS_PER_DAY)?.checked_sub(back * MILLIS_PER_DAY)
            }
            Self::Month => {
                let date = utc(time)?.date_naive();
                start_of_month(date.year(), date.month())
            }
            Self::Quarter => {
                let date = utc(time)?.date_naive();
                let first_month = (date.month0() / 3) * 3 + 1;
                start_of_month(date.year(), first_month)
            }
            Self::Year => {
                let date = utc(time)?.date_naive();
                start_of_month(date.year(), 1)
            }
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeUnit {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::InvalidConfig(format!("unknown time unit `{s}`")))
    }
}

pub(crate) fn utc(time: TimePoint) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(time)
}

fn floor_to(time: TimePoint, step: i64) -> Option<TimePoint> {
    time.checked_sub(time.rem_euclid(step))
}

fn start_of_month(year: i32, month: u32) -> Option<TimePoint> {
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}
