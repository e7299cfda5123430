//! Calendar points and ranges.
//!
//! A [`Timestamp`] is a day/month/year triple with no inherent calendar; it
//! is not validated against the active [`Calendar`] at construction. Real
//! duration math needs a calendar threaded through explicitly — without one,
//! a [`Timerange`] stores [`UNKNOWN_LENGTH`].

use serde::{Deserialize, Serialize};

use super::calendar::Calendar;

/// Sentinel length for a range built without a calendar in reach.
pub const UNKNOWN_LENGTH: i64 = -1;

/// A point in a fictional calendar. Fields are 1-based where the calendar
/// says so; nothing here enforces that (the validator reports outliers).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub day: i64,
    pub month: i64,
    pub year: i64,
}

impl Timestamp {
    /// Creates a timestamp from explicit fields.
    #[inline]
    pub fn new(day: i64, month: i64, year: i64) -> Self {
        Self { day, month, year }
    }

    /// Signed whole days from `self` to `other` under `calendar`.
    ///
    /// Both endpoints are converted to an absolute day count using the
    /// calendar's month lengths and per-year leap adjustment, then
    /// subtracted. Positive when `other` is later.
    pub fn days_until(&self, other: &Timestamp, calendar: &Calendar) -> i64 {
        day_number(other, calendar) - day_number(self, calendar)
    }
}

/// Absolute day count of `ts` from day 1, month 1, year 0.
fn day_number(ts: &Timestamp, calendar: &Calendar) -> i64 {
    let mut days = calendar.days_before_year(ts.year);
    for month in 1..ts.month {
        days += i64::from(calendar.days_in_month(month));
    }
    days + ts.day
}

/// A span between two calendar points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Timerange {
    pub start: Timestamp,
    pub end: Timestamp,

    /// Signed day count from `start` to `end`, computed once at
    /// construction. [`UNKNOWN_LENGTH`] when no calendar was available.
    /// Written to the wire for inspection but never read back:
    /// deserialization recomputes it unconditionally.
    pub length: i64,
}

impl Timerange {
    /// Creates a range with no calendar in reach; `length` is the sentinel.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start,
            end,
            length: UNKNOWN_LENGTH,
        }
    }

    /// Creates a range with its real length computed against `calendar`.
    pub fn with_calendar(start: Timestamp, end: Timestamp, calendar: &Calendar) -> Self {
        Self {
            start,
            end,
            length: start.days_until(&end, calendar),
        }
    }

    /// Recomputes `length` against `calendar`, replacing any sentinel.
    pub fn recompute_length(&mut self, calendar: &Calendar) {
        self.length = self.start.days_until(&self.end, calendar);
    }
}

#[derive(Deserialize)]
struct TimerangeWire {
    start: Timestamp,
    end: Timestamp,
}

impl<'de> Deserialize<'de> for Timerange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The stored length is ignored by contract; without a calendar the
        // recomputed value is the sentinel.
        let wire = TimerangeWire::deserialize(deserializer)?;
        Ok(Timerange::new(wire.start, wire.end))
    }
}
