// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day numbers on the UTC axis.
//!
//! The lunar engine works in continuous day counts. [`JulianDay`] stores a
//! single [`Days`] quantity (an `f64`) built from
//! `chrono::DateTime<Utc>`. No ΔT correction is applied: the analytic moon
//! model is only good to a fraction of a degree, so UT and TT are treated as
//! the same axis.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use qtty::{Day, Days, Seconds};
use std::ops::{Add, Sub};

/// A point on the Julian Day axis (UTC).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay {
    quantity: Days,
}

impl JulianDay {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// Unix epoch: 1970-01-01T00:00:00 (JD 2 440 587.5).
    pub const UNIX_EPOCH: Self = Self::new(2_440_587.5);

    /// Create from a raw Julian Day number.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self { quantity: days }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Build a Julian Day from a UTC timestamp.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let seconds = Seconds::new(datetime.timestamp() as f64);
        let nanos = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        Self::from_days(Self::UNIX_EPOCH.quantity + (seconds + nanos).to::<Day>())
    }

    /// Days elapsed since J2000.0 (negative before it).
    #[inline]
    pub fn days_since_j2000(&self) -> Days {
        *self - Self::J2000
    }
}

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {}", self.quantity)
    }
}

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl Sub<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

/// The instant a civil date is sampled at: 12:00 UTC, the middle of the day.
pub fn sample_instant(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&(midnight + chrono::Duration::hours(12)))
}

/// Signed length of `later - earlier` in fractional days.
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> Days {
    JulianDay::from_utc(later) - JulianDay::from_utc(earlier)
}
