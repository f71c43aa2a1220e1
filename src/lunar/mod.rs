// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar cycle engine.
//!
//! | Module      | Provides                                                         |
//! |-------------|------------------------------------------------------------------|
//! | `ephemeris` | [`IlluminationModel`], [`RiseSetModel`] and the [`AnalyticMoon`] |
//! | `phase`     | [`LunarPhase`] names and the mean lunar age                      |
//! | `synodic`   | New-moon search and [`SynodicMonth`] construction                |
//! | `engine`    | [`LunarEngine`], the cached front end                            |
//!
//! The free functions take the model and configuration explicitly; the
//! engine bundles both with per-date caches.

mod engine;
mod ephemeris;
mod phase;
mod synodic;

pub use engine::LunarEngine;
pub use ephemeris::{
    AnalyticMoon, IlluminationModel, MoonIllumination, MoonPosition, MoonTimes, RiseSetModel,
};
pub use phase::{
    mean_lunar_age, EclipseKind, LunarPhase, LunarPhaseInfo, LUNATION_EPOCH, MEAN_SYNODIC_MONTH,
};
pub use synodic::{
    find_next_new_moon, find_previous_new_moon, lunar_phase_for_date, PhaseInstant, SynodicMonth,
};
