// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Temporal and spatial granularity levels and the tables that couple them.
//!
//! Both enumerations are ordered by ordinal. Every per-level property
//! (labels, coupled spatial level, navigation step, calendar view, map zoom)
//! is a static array indexed by that ordinal, so each mapping is total by
//! construction.
//!
//! | Temporal | Ordinal | Coupled spatial | Step |
//! |----------|---------|-----------------|------|
//! | Moment   | 0 | Coordinates  | 1 day |
//! | Hour     | 1 | Address      | 1 day |
//! | Day      | 2 | Address      | 1 day |
//! | Week     | 3 | City         | 7 days |
//! | Month    | 4 | Country      | 1 month |
//! | Season   | 5 | Country      | 3 months |
//! | Year     | 6 | Continent    | 12 months |
//! | Decade   | 7 | Continent    | 120 months |
//! | Century  | 8 | Planet       | 1200 months |
//! | Cosmic   | 9 | Planet       | 1 day |

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Temporal granularity
// ═══════════════════════════════════════════════════════════════════════════

/// Zoom level of time navigation, finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum TemporalGranularity {
    Moment = 0,
    Hour = 1,
    Day = 2,
    Week = 3,
    Month = 4,
    Season = 5,
    Year = 6,
    Decade = 7,
    Century = 8,
    Cosmic = 9,
}

impl TemporalGranularity {
    /// Every level in ordinal order.
    pub const ALL: [Self; 10] = [
        Self::Moment,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Season,
        Self::Year,
        Self::Decade,
        Self::Century,
        Self::Cosmic,
    ];

    /// Finest level; the floor of [`zoomed_in`](Self::zoomed_in).
    pub const FINEST: Self = Self::Moment;

    /// Ceiling of [`zoomed_out`](Self::zoomed_out).
    ///
    /// Century and Cosmic sit above it and are only reachable by selecting
    /// them directly.
    pub const ZOOM_OUT_CEILING: Self = Self::Decade;

    const LABELS: [&'static str; 10] = [
        "Moment", "Hour", "Day", "Week", "Month", "Season", "Year", "Decade", "Century", "Cosmic",
    ];

    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    /// One level finer, stopping at [`Moment`](Self::Moment).
    pub fn zoomed_in(self) -> Self {
        let ordinal = self.ordinal().saturating_sub(1).max(Self::FINEST.ordinal());
        Self::ALL[ordinal as usize]
    }

    /// One level coarser, stopping at [`Decade`](Self::Decade).
    ///
    /// From Century or Cosmic this moves *down* to Decade: the clamp is on the
    /// result, not a no-op guard.
    pub fn zoomed_out(self) -> Self {
        let ordinal = (self.ordinal() + 1).min(Self::ZOOM_OUT_CEILING.ordinal());
        Self::ALL[ordinal as usize]
    }

    /// Spatial level this temporal level drives while zoom is coupled.
    #[inline]
    pub const fn coupled_spatial(self) -> SpatialGranularity {
        COUPLING[self.index()]
    }

    /// How far one `prev`/`next` navigation moves the anchor date.
    #[inline]
    pub const fn navigation_step(self) -> NavigationStep {
        NAVIGATION_STEPS[self.index()]
    }

    /// Calendar view shown for this level, if it has a dedicated one.
    #[inline]
    pub const fn calendar_view(self) -> Option<CalendarView> {
        CALENDAR_VIEWS[self.index()]
    }
}

impl Default for TemporalGranularity {
    fn default() -> Self {
        Self::Month
    }
}

impl fmt::Display for TemporalGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for TemporalGranularity {
    type Error = Error;

    fn try_from(ordinal: u8) -> Result<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(Error::GranularityOutOfRange {
                ordinal,
                max: Self::Cosmic.ordinal(),
            })
    }
}

impl FromStr for TemporalGranularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownGranularity(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Spatial granularity
// ═══════════════════════════════════════════════════════════════════════════

/// Zoom level of geographic resolution.
///
/// Ordinal 0 ([`Planet`](Self::Planet)) covers the largest area and ordinal 8
/// ([`Coordinates`](Self::Coordinates)) a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum SpatialGranularity {
    Planet = 0,
    Continent = 1,
    Bioregion = 2,
    Country = 3,
    Region = 4,
    City = 5,
    Neighborhood = 6,
    Address = 7,
    Coordinates = 8,
}

impl SpatialGranularity {
    /// Every level in ordinal order.
    pub const ALL: [Self; 9] = [
        Self::Planet,
        Self::Continent,
        Self::Bioregion,
        Self::Country,
        Self::Region,
        Self::City,
        Self::Neighborhood,
        Self::Address,
        Self::Coordinates,
    ];

    const LABELS: [&'static str; 9] = [
        "Planet",
        "Continent",
        "Bioregion",
        "Country",
        "Region",
        "City",
        "Neighborhood",
        "Address",
        "Coordinates",
    ];

    const MAP_ZOOM: [u8; 9] = [2, 4, 5, 6, 8, 11, 14, 16, 18];

    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }

    /// Size of the area this level covers: 8 for Planet down to 0 for Coordinates.
    ///
    /// Coupling is monotone in this rank: a coarser temporal level never maps
    /// to a smaller area.
    #[inline]
    pub const fn extent_rank(self) -> u8 {
        Self::Coordinates.ordinal() - self.ordinal()
    }

    /// Web-map zoom level that frames an area of this size.
    #[inline]
    pub const fn map_zoom(self) -> u8 {
        Self::MAP_ZOOM[self as usize]
    }

    /// Spatial level implied by a web-map zoom level.
    pub fn from_map_zoom(zoom: f64) -> Self {
        const UPPER_BOUNDS: [(f64, SpatialGranularity); 8] = [
            (2.0, SpatialGranularity::Planet),
            (4.0, SpatialGranularity::Continent),
            (5.0, SpatialGranularity::Bioregion),
            (7.0, SpatialGranularity::Country),
            (9.0, SpatialGranularity::Region),
            (12.0, SpatialGranularity::City),
            (15.0, SpatialGranularity::Neighborhood),
            (17.0, SpatialGranularity::Address),
        ];
        UPPER_BOUNDS
            .iter()
            .find(|(bound, _)| zoom <= *bound)
            .map_or(Self::Coordinates, |(_, level)| *level)
    }
}

impl fmt::Display for SpatialGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for SpatialGranularity {
    type Error = Error;

    fn try_from(ordinal: u8) -> Result<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(Error::GranularityOutOfRange {
                ordinal,
                max: Self::Coordinates.ordinal(),
            })
    }
}

impl FromStr for SpatialGranularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownGranularity(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Per-level tables
// ═══════════════════════════════════════════════════════════════════════════

/// Temporal → spatial coupling, indexed by temporal ordinal.
const COUPLING: [SpatialGranularity; 10] = [
    SpatialGranularity::Coordinates, // Moment
    SpatialGranularity::Address,     // Hour
    SpatialGranularity::Address,     // Day
    SpatialGranularity::City,        // Week
    SpatialGranularity::Country,     // Month
    SpatialGranularity::Country,     // Season
    SpatialGranularity::Continent,   // Year
    SpatialGranularity::Continent,   // Decade
    SpatialGranularity::Planet,      // Century
    SpatialGranularity::Planet,      // Cosmic
];

/// Amount the anchor date moves per navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationStep {
    /// A fixed number of days.
    Days(u32),
    /// A number of calendar months; days past the end of the target month clamp to its last day.
    Months(u32),
}

const NAVIGATION_STEPS: [NavigationStep; 10] = [
    NavigationStep::Days(1),      // Moment
    NavigationStep::Days(1),      // Hour
    NavigationStep::Days(1),      // Day
    NavigationStep::Days(7),      // Week
    NavigationStep::Months(1),    // Month
    NavigationStep::Months(3),    // Season
    NavigationStep::Months(12),   // Year
    NavigationStep::Months(120),  // Decade
    NavigationStep::Months(1200), // Century
    NavigationStep::Days(1),      // Cosmic
];

/// Calendar layout a temporal level renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CalendarView {
    Day,
    Week,
    #[default]
    Month,
    Year,
    Timeline,
}

const CALENDAR_VIEWS: [Option<CalendarView>; 10] = [
    None,                         // Moment
    None,                         // Hour
    Some(CalendarView::Day),      // Day
    Some(CalendarView::Week),     // Week
    Some(CalendarView::Month),    // Month
    None,                         // Season
    Some(CalendarView::Year),     // Year
    Some(CalendarView::Timeline), // Decade
    None,                         // Century
    None,                         // Cosmic
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_increase_with_coarseness() {
        for (i, level) in TemporalGranularity::ALL.iter().enumerate() {
            assert_eq!(level.ordinal() as usize, i);
        }
        for (i, level) in SpatialGranularity::ALL.iter().enumerate() {
            assert_eq!(level.ordinal() as usize, i);
        }
    }

    #[test]
    fn coupling_is_total_and_monotone() {
        let extents: Vec<u8> = TemporalGranularity::ALL
            .iter()
            .map(|t| t.coupled_spatial().extent_rank())
            .collect();
        assert_eq!(extents.len(), 10);
        assert!(extents.windows(2).all(|w| w[0] <= w[1]), "{extents:?}");
    }

    #[test]
    fn coupling_table_values() {
        use SpatialGranularity as S;
        use TemporalGranularity as T;
        assert_eq!(T::Moment.coupled_spatial(), S::Coordinates);
        assert_eq!(T::Week.coupled_spatial(), S::City);
        assert_eq!(T::Month.coupled_spatial(), S::Country);
        assert_eq!(T::Decade.coupled_spatial(), S::Continent);
        assert_eq!(T::Cosmic.coupled_spatial(), S::Planet);
    }

    #[test]
    fn zoom_in_floors_at_moment() {
        assert_eq!(TemporalGranularity::Hour.zoomed_in(), TemporalGranularity::Moment);
        assert_eq!(TemporalGranularity::Moment.zoomed_in(), TemporalGranularity::Moment);
        assert_eq!(TemporalGranularity::Cosmic.zoomed_in(), TemporalGranularity::Century);
    }

    #[test]
    fn zoom_out_never_passes_decade() {
        for level in TemporalGranularity::ALL {
            let out = level.zoomed_out();
            assert!(out <= TemporalGranularity::Decade, "{level} -> {out}");
        }
        assert_eq!(TemporalGranularity::Year.zoomed_out(), TemporalGranularity::Decade);
        assert_eq!(TemporalGranularity::Decade.zoomed_out(), TemporalGranularity::Decade);
        assert_eq!(TemporalGranularity::Century.zoomed_out(), TemporalGranularity::Decade);
        assert_eq!(TemporalGranularity::Cosmic.zoomed_out(), TemporalGranularity::Decade);
    }

    #[test]
    fn zoom_round_trip_below_ceiling() {
        for level in &TemporalGranularity::ALL[..TemporalGranularity::Decade as usize] {
            assert_eq!(level.zoomed_out().zoomed_in(), *level);
        }
    }

    #[test]
    fn navigation_steps() {
        use NavigationStep::*;
        use TemporalGranularity as T;
        assert_eq!(T::Day.navigation_step(), Days(1));
        assert_eq!(T::Week.navigation_step(), Days(7));
        assert_eq!(T::Season.navigation_step(), Months(3));
        assert_eq!(T::Century.navigation_step(), Months(1200));
        assert_eq!(T::Moment.navigation_step(), Days(1));
        assert_eq!(T::Cosmic.navigation_step(), Days(1));
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert_eq!(TemporalGranularity::try_from(4), Ok(TemporalGranularity::Month));
        assert_eq!(
            TemporalGranularity::try_from(10),
            Err(Error::GranularityOutOfRange { ordinal: 10, max: 9 })
        );
        assert_eq!(SpatialGranularity::try_from(8), Ok(SpatialGranularity::Coordinates));
        assert!(SpatialGranularity::try_from(9).is_err());
    }

    #[test]
    fn parse_names_case_insensitively() {
        assert_eq!("decade".parse::<TemporalGranularity>(), Ok(TemporalGranularity::Decade));
        assert_eq!(" City ".parse::<SpatialGranularity>(), Ok(SpatialGranularity::City));
        assert_eq!(
            "fortnight".parse::<TemporalGranularity>(),
            Err(Error::UnknownGranularity("fortnight".into()))
        );
    }

    #[test]
    fn map_zoom_inverse_recovers_level() {
        for level in SpatialGranularity::ALL {
            assert_eq!(SpatialGranularity::from_map_zoom(level.map_zoom() as f64), level);
        }
        assert_eq!(SpatialGranularity::from_map_zoom(7.0), SpatialGranularity::Country);
        assert_eq!(SpatialGranularity::from_map_zoom(20.0), SpatialGranularity::Coordinates);
    }

    #[test]
    fn calendar_views_are_partial() {
        assert_eq!(TemporalGranularity::Decade.calendar_view(), Some(CalendarView::Timeline));
        assert_eq!(TemporalGranularity::Season.calendar_view(), None);
        assert_eq!(TemporalGranularity::Moment.calendar_view(), None);
    }
}
