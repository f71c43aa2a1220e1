// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Navigation state: anchor date, zoom levels and the coupling flag.
//!
//! Every transition is total. Calendar arithmetic that would leave chrono's
//! date range leaves the anchor where it is and logs a warning.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use rcal::{Direction, NavigationState, SpatialGranularity, TemporalGranularity};
//!
//! let mut nav = NavigationState::new(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
//! nav.set_temporal_granularity(TemporalGranularity::Season);
//! nav.navigate(Direction::Next);
//! assert_eq!(nav.anchor_date, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
//! assert_eq!(nav.effective_spatial_granularity(), SpatialGranularity::Country);
//! ```

use crate::granularity::{CalendarView, NavigationStep, SpatialGranularity, TemporalGranularity};
use crate::location::{GeoPoint, MapView};
use crate::span::DateSpan;
use chrono::{Datelike, Local, Months, NaiveDate};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which way [`NavigationState::navigate`] moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Prev,
    Next,
}

/// A user intent, applied with [`NavigationState::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "value", rename_all = "snake_case")
)]
pub enum NavigationAction {
    SetTemporal(TemporalGranularity),
    ZoomIn,
    ZoomOut,
    SetSpatial(Option<SpatialGranularity>),
    ToggleCoupled,
    SetCoupled(bool),
    Navigate(Direction),
    GoToToday,
    SetAnchor(NaiveDate),
    /// The map was zoomed by hand to this map zoom level.
    MapZoomed(f64),
}

/// What the calendar is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigationState {
    pub anchor_date: NaiveDate,
    pub temporal: TemporalGranularity,
    /// Spatial override. Overwritten by the coupling table whenever coupling applies.
    pub spatial: Option<SpatialGranularity>,
    pub coupled: bool,
    pub view: CalendarView,
}

impl Default for NavigationState {
    /// Month level, coupled, anchored on the local current date.
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl NavigationState {
    /// Month level, coupled, no spatial override.
    pub fn new(anchor_date: NaiveDate) -> Self {
        Self {
            anchor_date,
            temporal: TemporalGranularity::default(),
            spatial: None,
            coupled: true,
            view: CalendarView::default(),
        }
    }

    /// Applies `action` in place.
    pub fn apply(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::SetTemporal(level) => self.set_temporal_granularity(level),
            NavigationAction::ZoomIn => self.zoom_in(),
            NavigationAction::ZoomOut => self.zoom_out(),
            NavigationAction::SetSpatial(level) => self.set_spatial_granularity(level),
            NavigationAction::ToggleCoupled => self.toggle_coupled(),
            NavigationAction::SetCoupled(coupled) => self.set_coupled(coupled),
            NavigationAction::Navigate(direction) => self.navigate(direction),
            NavigationAction::GoToToday => self.go_to_today(),
            NavigationAction::SetAnchor(date) => self.set_anchor_date(date),
            NavigationAction::MapZoomed(zoom) => self.map_zoomed(zoom),
        }
    }

    /// Returns the state after `action`.
    #[must_use]
    pub fn reduce(mut self, action: NavigationAction) -> Self {
        self.apply(action);
        self
    }

    pub fn set_temporal_granularity(&mut self, level: TemporalGranularity) {
        self.temporal = level;
        if let Some(view) = level.calendar_view() {
            self.view = view;
        }
        if self.coupled {
            self.spatial = Some(level.coupled_spatial());
        }
        debug!(
            target: "rcal::navigation",
            temporal = %level,
            spatial = %self.effective_spatial_granularity(),
            "temporal granularity set"
        );
    }

    /// One level finer, stopping at `Moment`.
    pub fn zoom_in(&mut self) {
        self.set_temporal_granularity(self.temporal.zoomed_in());
    }

    /// One level coarser, stopping at `Decade`.
    pub fn zoom_out(&mut self) {
        self.set_temporal_granularity(self.temporal.zoomed_out());
    }

    /// Sets or clears the spatial override. Has no visible effect while coupled.
    pub fn set_spatial_granularity(&mut self, level: Option<SpatialGranularity>) {
        self.spatial = level;
    }

    pub fn toggle_coupled(&mut self) {
        self.set_coupled(!self.coupled);
    }

    /// Turning coupling on snaps the spatial level to the coupling table.
    pub fn set_coupled(&mut self, coupled: bool) {
        self.coupled = coupled;
        if coupled {
            self.spatial = Some(self.temporal.coupled_spatial());
        }
        debug!(target: "rcal::navigation", coupled, "coupling changed");
    }

    /// Moves the anchor by one step of the current temporal level.
    pub fn navigate(&mut self, direction: Direction) {
        let step = self.temporal.navigation_step();
        match shift_date(self.anchor_date, step, direction) {
            Some(date) => self.anchor_date = date,
            None => warn!(
                target: "rcal::navigation",
                anchor = %self.anchor_date,
                ?step,
                ?direction,
                "navigation leaves the representable calendar; anchor unchanged"
            ),
        }
    }

    /// Anchors on the local current date.
    pub fn go_to_today(&mut self) {
        self.set_anchor_date(Local::now().date_naive());
    }

    pub fn set_anchor_date(&mut self, date: NaiveDate) {
        self.anchor_date = date;
    }

    /// Spatial level used to label and cluster records.
    pub fn effective_spatial_granularity(&self) -> SpatialGranularity {
        if self.coupled {
            self.temporal.coupled_spatial()
        } else {
            self.spatial
                .unwrap_or(TemporalGranularity::Month.coupled_spatial())
        }
    }

    /// A hand-made map zoom becomes the spatial override when decoupled.
    pub fn map_zoomed(&mut self, zoom: f64) {
        if !self.coupled {
            self.spatial = Some(SpatialGranularity::from_map_zoom(zoom));
        }
    }

    /// Map framing for `points` at the effective spatial level.
    pub fn map_view<I>(&self, points: I) -> MapView
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        MapView::for_points(points, self.effective_spatial_granularity())
    }

    /// Inclusive span of days shown at the current temporal level.
    pub fn visible_range(&self) -> DateSpan {
        use TemporalGranularity::*;

        let anchor = self.anchor_date;
        let span = match self.temporal {
            Moment | Hour | Day => Some(DateSpan::single(anchor)),
            Week => week_containing(anchor),
            Month => months_from(first_of_month(anchor), 1),
            Season => quarter_containing(anchor),
            Year => years_from(anchor.year(), 1),
            Decade => years_from(anchor.year() - anchor.year().rem_euclid(10), 10),
            Century | Cosmic => years_from(anchor.year() - anchor.year().rem_euclid(100), 100),
        };
        span.unwrap_or_else(|| {
            warn!(
                target: "rcal::navigation",
                %anchor,
                temporal = %self.temporal,
                "visible range clipped to anchor"
            );
            DateSpan::single(anchor)
        })
    }
}

fn shift_date(date: NaiveDate, step: NavigationStep, direction: Direction) -> Option<NaiveDate> {
    match (step, direction) {
        (NavigationStep::Days(n), Direction::Next) => {
            date.checked_add_days(chrono::Days::new(n.into()))
        }
        (NavigationStep::Days(n), Direction::Prev) => {
            date.checked_sub_days(chrono::Days::new(n.into()))
        }
        (NavigationStep::Months(n), Direction::Next) => date.checked_add_months(Months::new(n)),
        (NavigationStep::Months(n), Direction::Prev) => date.checked_sub_months(Months::new(n)),
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn months_from(first: NaiveDate, months: u32) -> Option<DateSpan> {
    let end = first.checked_add_months(Months::new(months))?.pred_opt()?;
    Some(DateSpan { start: first, end })
}

/// The calendar quarter (Jan–Mar, Apr–Jun, Jul–Sep, Oct–Dec) holding `date`.
fn quarter_containing(date: NaiveDate) -> Option<DateSpan> {
    let first_month = (date.month0() / 3) * 3 + 1;
    months_from(NaiveDate::from_ymd_opt(date.year(), first_month, 1)?, 3)
}

fn years_from(first_year: i32, years: u32) -> Option<DateSpan> {
    months_from(NaiveDate::from_ymd_opt(first_year, 1, 1)?, years * 12)
}

/// Sunday through Saturday.
fn week_containing(date: NaiveDate) -> Option<DateSpan> {
    let back = u64::from(date.weekday().num_days_from_sunday());
    let start = date.checked_sub_days(chrono::Days::new(back))?;
    let end = start.checked_add_days(chrono::Days::new(6))?;
    Some(DateSpan { start, end })
}
