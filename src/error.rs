// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for boundary validation.
//!
//! The navigation reducer and the lunar engine are total; errors only come
//! from parsing and validating caller input before it reaches them.

use thiserror::Error;

/// Errors raised while validating dates, ranges, coordinates and enum names.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A date string did not parse as `YYYY-MM-DD` (or RFC 3339).
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A latitude/longitude pair is malformed or outside the valid range.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A lunar range query spans more days than allowed.
    #[error("date range cannot exceed {max} days (got {days})")]
    RangeTooLong { days: i64, max: i64 },

    /// A range whose end precedes its start.
    #[error("date range end precedes its start")]
    RangeReversed,

    /// Only one of `start` / `end` was supplied.
    #[error("a date range needs both `start` and `end`")]
    IncompleteRange,

    /// A granularity name that matches no level.
    #[error("unknown granularity {0:?}")]
    UnknownGranularity(String),

    /// A granularity ordinal past the last level.
    #[error("granularity ordinal {ordinal} out of range 0..={max}")]
    GranularityOutOfRange { ordinal: u8, max: u8 },

    /// A lunar phase name that matches none of the eight canonical phases.
    #[error("unknown lunar phase {0:?}")]
    UnknownPhase(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
