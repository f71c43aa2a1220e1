// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Spatiotemporal calendar navigation and a lunar-cycle engine.
//!
//! # Navigation
//!
//! - [`TemporalGranularity`] - ten zoom levels of time, `Moment` to `Cosmic`.
//! - [`SpatialGranularity`] - nine zoom levels of space, `Planet` to `Coordinates`.
//! - [`NavigationState`] - anchor date, both levels and the coupling flag,
//!   driven directly or through [`NavigationAction`].
//!
//! While coupled, zooming time zooms space with it:
//!
//! | Temporal              | Spatial     |
//! |-----------------------|-------------|
//! | Moment                | Coordinates |
//! | Hour, Day             | Address     |
//! | Week                  | City        |
//! | Month, Season         | Country     |
//! | Year, Decade          | Continent   |
//! | Century, Cosmic       | Planet      |
//!
//! Records from an external event source are labelled and grouped at the
//! effective spatial level with [`EventLocation::semantic_label`] and
//! [`group_by_location`].
//!
//! # Lunar cycle
//!
//! - [`lunar::LunarEngine`] - cached synodic-month and phase lookups.
//! - [`lunar::SynodicMonth`] - bounding new moons and the eight phase instants.
//! - [`lunar::IlluminationModel`] - the illumination source; [`lunar::AnalyticMoon`]
//!   is the built-in low-precision model.
//! - [`LunarRequest`] / [`LunarResponse`] - parameter parsing and reports.
//!
//! # Logging
//!
//! Events are emitted with [`tracing`] under the `rcal::lunar`,
//! `rcal::navigation` and `rcal::query` targets. No subscriber is installed.

mod config;
mod error;
mod granularity;
mod julian;
mod location;
pub mod lunar;
mod navigation;
mod query;
mod span;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use config::LunarConfig;
pub use error::{Error, Result};
pub use granularity::{CalendarView, NavigationStep, SpatialGranularity, TemporalGranularity};
pub use julian::{days_between, sample_instant, JulianDay};
pub use location::{
    group_by_location, EventLocation, GeoPoint, Located, LocationGroup, MapView,
    BREADCRUMB_SEPARATOR,
};
pub use navigation::{Direction, NavigationAction, NavigationState};
pub use query::{parse_date, DayReport, LunarQuery, LunarRequest, LunarResponse, RangeReport};
pub use span::DateSpan;
