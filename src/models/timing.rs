//! Time windows, shifts, and minute arithmetic.
//!
//! All solver timing is carried as [`NaiveDateTime`] and fractional minutes.
//! Minutes are applied at microsecond precision so repeated travel-time
//! additions do not accumulate rounding drift.

use chrono::{Duration, NaiveDateTime};

use crate::error::{Error, Result};

/// Adds a fractional number of minutes to a timestamp.
pub fn add_minutes(t: NaiveDateTime, minutes: f64) -> NaiveDateTime {
    t + Duration::microseconds((minutes * 60_000_000.0).round() as i64)
}

/// Signed minutes elapsed from `earlier` to `later`.
///
/// Negative when `later` precedes `earlier`.
pub fn minutes_between(earlier: NaiveDateTime, later: NaiveDateTime) -> f64 {
    let micros = later
        .signed_duration_since(earlier)
        .num_microseconds()
        .unwrap_or_else(|| later.signed_duration_since(earlier).num_milliseconds() * 1000);
    micros as f64 / 60_000_000.0
}

/// An arrival time window at a work-order site.
///
/// Arrival must fall in `[start, end]` (inclusive). Early arrivals wait;
/// late arrivals are infeasible.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dispatch_routing::models::TimeWindow;
///
/// let day = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
/// let tw = TimeWindow::new(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(12, 0, 0).unwrap(),
/// ).unwrap();
/// assert!(tw.contains(day.and_hms_opt(10, 30, 0).unwrap()));
/// assert!(!tw.contains(day.and_hms_opt(12, 0, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a time window.
    ///
    /// Fails with [`Error::InvalidWindow`] if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Earliest acceptable arrival.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Latest acceptable arrival.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns `true` if `arrival` falls within this window (inclusive).
    pub fn contains(&self, arrival: NaiveDateTime) -> bool {
        arrival >= self.start && arrival <= self.end
    }

    /// Minutes a vehicle arriving at `arrival` must wait for the window to
    /// open. Zero when arriving within or after the window.
    pub fn waiting_minutes(&self, arrival: NaiveDateTime) -> f64 {
        if arrival < self.start {
            minutes_between(arrival, self.start)
        } else {
            0.0
        }
    }

    /// Returns `true` if arriving at `arrival` is too late for this window.
    pub fn is_violated(&self, arrival: NaiveDateTime) -> bool {
        arrival > self.end
    }
}

/// A technician's working shift.
///
/// Routes start at shift start; every departure must be at or before
/// shift end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Shift {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Shift {
    /// Creates a shift.
    ///
    /// Fails with [`Error::InvalidWindow`] if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Shift start.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Shift end.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Shift length in whole minutes.
    pub fn length_minutes(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_minutes()
    }
}
