// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The eight named lunar phases and the mean lunar age.
//!
//! | Phase             | Emoji | Age window (days)   |
//! |-------------------|-------|---------------------|
//! | `NewMoon`         | 🌑    | < 1.85 or ≥ 27.68   |
//! | `WaxingCrescent`  | 🌒    | 1.85 – 5.54         |
//! | `FirstQuarter`    | 🌓    | 5.54 – 9.23         |
//! | `WaxingGibbous`   | 🌔    | 9.23 – 12.92        |
//! | `FullMoon`        | 🌕    | 12.92 – 16.61       |
//! | `WaningGibbous`   | 🌖    | 16.61 – 20.30       |
//! | `LastQuarter`     | 🌗    | 20.30 – 23.99       |
//! | `WaningCrescent`  | 🌘    | 23.99 – 27.68       |
//!
//! Windows are one eighth of the mean synodic month, centred on each phase.

use crate::error::{Error, Result};
use crate::julian::JulianDay;
use chrono::{DateTime, Utc};
use qtty::Days;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean length of a lunation.
pub const MEAN_SYNODIC_MONTH: Days = Days::new(29.530_588_853);

/// A mean new moon (2000-01-06 14:24 UTC) used as the origin of the age count.
pub const LUNATION_EPOCH: JulianDay = JulianDay::new(2_451_550.1);

/// One of the eight canonical phases, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl LunarPhase {
    /// All phases in cycle order, starting at new moon.
    pub const ALL: [Self; 8] = [
        Self::NewMoon,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::FullMoon,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Position in the cycle, 0 for new moon through 7 for waning crescent.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Machine name, as used on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "new_moon",
            Self::WaxingCrescent => "waxing_crescent",
            Self::FirstQuarter => "first_quarter",
            Self::WaxingGibbous => "waxing_gibbous",
            Self::FullMoon => "full_moon",
            Self::WaningGibbous => "waning_gibbous",
            Self::LastQuarter => "last_quarter",
            Self::WaningCrescent => "waning_crescent",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::NewMoon => "🌑",
            Self::WaxingCrescent => "🌒",
            Self::FirstQuarter => "🌓",
            Self::WaxingGibbous => "🌔",
            Self::FullMoon => "🌕",
            Self::WaningGibbous => "🌖",
            Self::LastQuarter => "🌗",
            Self::WaningCrescent => "🌘",
        }
    }

    /// Phase for a position in the cycle, `0.0` new moon to `1.0` the next.
    ///
    /// Values outside `[0, 1)` wrap.
    pub fn from_cycle_fraction(fraction: f64) -> Self {
        let eighths = (fraction.rem_euclid(1.0) * 8.0).round() as usize;
        Self::ALL[eighths % 8]
    }

    /// Phase for a lunar age measured from the last mean new moon.
    pub fn from_age(age: Days) -> Self {
        Self::from_cycle_fraction(age.value() / MEAN_SYNODIC_MONTH.value())
    }
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for LunarPhase {
    type Err = Error;

    /// Accepts machine names, labels, and the short forms `new`, `full` and
    /// `third_quarter`, in any case and with `_`, `-` or space separators.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        let phase = match normalized.as_str() {
            "new" | "new_moon" => Self::NewMoon,
            "waxing_crescent" => Self::WaxingCrescent,
            "first_quarter" => Self::FirstQuarter,
            "waxing_gibbous" => Self::WaxingGibbous,
            "full" | "full_moon" => Self::FullMoon,
            "waning_gibbous" => Self::WaningGibbous,
            "last_quarter" | "third_quarter" => Self::LastQuarter,
            "waning_crescent" => Self::WaningCrescent,
            _ => return Err(Error::UnknownPhase(s.to_owned())),
        };
        Ok(phase)
    }
}

/// Days since the last mean new moon, in `[0, MEAN_SYNODIC_MONTH)`.
pub fn mean_lunar_age(at: DateTime<Utc>) -> Days {
    let month = MEAN_SYNODIC_MONTH.value();
    let elapsed = (JulianDay::from_utc(at) - LUNATION_EPOCH).value();
    let age = elapsed.rem_euclid(month);
    // rem_euclid may round up to the divisor itself
    Days::new(if age >= month { 0.0 } else { age })
}

/// Kind of eclipse falling on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EclipseKind {
    Solar,
    Lunar,
}

/// Everything reported about the Moon for one calendar day.
///
/// Serializes with the phase emoji alongside the fields; it is ignored when
/// deserializing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct LunarPhaseInfo {
    pub phase: LunarPhase,
    /// Illuminated fraction at midday UTC.
    pub illumination: f64,
    /// Mean lunar age at midday UTC, in days.
    pub age_days: f64,
    /// Eclipse detection is not modelled; always `false`.
    pub is_eclipse: bool,
    /// Always `None` while eclipses are not modelled.
    pub eclipse: Option<EclipseKind>,
}

impl LunarPhaseInfo {
    pub const fn emoji(&self) -> &'static str {
        self.phase.emoji()
    }
}

#[cfg(feature = "serde")]
impl Serialize for LunarPhaseInfo {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut info = serializer.serialize_struct("LunarPhaseInfo", 6)?;
        info.serialize_field("phase", &self.phase)?;
        info.serialize_field("emoji", self.emoji())?;
        info.serialize_field("illumination", &self.illumination)?;
        info.serialize_field("age_days", &self.age_days)?;
        info.serialize_field("is_eclipse", &self.is_eclipse)?;
        info.serialize_field("eclipse", &self.eclipse)?;
        info.end()
    }
}
