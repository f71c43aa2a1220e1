// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Inclusive civil-date spans.
//!
//! A [`DateSpan`] is a closed range `[start, end]` of calendar days. It is the
//! unit used for lunar range queries and for the visible window a navigation
//! state asks the events collaborator for.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed range of calendar days.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rcal::DateSpan;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
/// let span = DateSpan::new(start, end).unwrap();
/// assert_eq!(span.len_days(), 29);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Creates a span, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::RangeReversed);
        }
        Ok(Self { start, end })
    }

    /// A span covering a single day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Creates a span and checks that `end - start` does not exceed `max_days`.
    ///
    /// The bound is on the difference between the endpoints, so a span of
    /// `max_days` yields `max_days + 1` calendar days.
    pub fn bounded(start: NaiveDate, end: NaiveDate, max_days: i64) -> Result<Self> {
        let span = Self::new(start, end)?;
        let days = span.difference_days();
        if days > max_days {
            return Err(Error::RangeTooLong {
                days,
                max: max_days,
            });
        }
        Ok(span)
    }

    /// `end - start` in whole days.
    pub fn difference_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Number of calendar days in the span, endpoints included.
    pub fn len_days(&self) -> usize {
        self.difference_days() as usize + 1
    }

    /// Whether `day` lies inside the span.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Iterates every day of the span in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
