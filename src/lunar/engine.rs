// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Memoizing front end over the synodic locator.

use super::ephemeris::{AnalyticMoon, IlluminationModel, MoonTimes, RiseSetModel};
use super::phase::LunarPhaseInfo;
use super::synodic::{
    find_next_new_moon, find_previous_new_moon, lunar_phase_for_date, SynodicMonth,
};
use crate::config::LunarConfig;
use crate::location::GeoPoint;
use crate::span::DateSpan;
use chrono::{DateTime, NaiveDate, Utc};
use lru::LruCache;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use tracing::{debug, trace};

/// Lunar engine with per-date LRU caches.
///
/// Results depend only on the date, the model and the configuration, so
/// cached entries never go stale. The caches sit behind mutexes; the engine is
/// `Send + Sync` whenever the model is.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rcal::lunar::LunarEngine;
///
/// let engine = LunarEngine::default();
/// let month = engine.synodic_month(NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
/// assert_eq!(month.start.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
/// ```
pub struct LunarEngine<M = AnalyticMoon> {
    model: M,
    config: LunarConfig,
    months: Mutex<LruCache<NaiveDate, SynodicMonth>>,
    phases: Mutex<LruCache<NaiveDate, LunarPhaseInfo>>,
}

impl Default for LunarEngine<AnalyticMoon> {
    fn default() -> Self {
        Self::new(AnalyticMoon, LunarConfig::default())
    }
}

impl<M> std::fmt::Debug for LunarEngine<M>
where
    M: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LunarEngine")
            .field("model", &self.model)
            .field("config", &self.config)
            .field("cached_months", &self.months.lock().len())
            .field("cached_phases", &self.phases.lock().len())
            .finish()
    }
}

impl<M: IlluminationModel> LunarEngine<M> {
    pub fn new(model: M, config: LunarConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            model,
            config,
            months: Mutex::new(LruCache::new(capacity)),
            phases: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[inline]
    pub fn config(&self) -> &LunarConfig {
        &self.config
    }

    /// Most recent new moon on or before `date`.
    pub fn previous_new_moon(&self, date: NaiveDate) -> DateTime<Utc> {
        find_previous_new_moon(&self.model, date, &self.config)
    }

    /// First new moon after `date`.
    pub fn next_new_moon(&self, date: NaiveDate) -> DateTime<Utc> {
        find_next_new_moon(&self.model, date, &self.config)
    }

    /// Lunation containing `date`.
    pub fn synodic_month(&self, date: NaiveDate) -> SynodicMonth {
        if let Some(month) = self.months.lock().get(&date) {
            trace!(target: "rcal::lunar", %date, "synodic month cache hit");
            return *month;
        }
        let month = SynodicMonth::containing(&self.model, date, &self.config);
        debug!(
            target: "rcal::lunar",
            %date,
            start = %month.start,
            end = %month.end,
            duration_days = month.duration_days,
            "synodic month computed"
        );
        self.months.lock().put(date, month);
        month
    }

    /// Phase information for one calendar day.
    pub fn phase_for_date(&self, date: NaiveDate) -> LunarPhaseInfo {
        if let Some(info) = self.phases.lock().get(&date) {
            return *info;
        }
        let info = lunar_phase_for_date(&self.model, date);
        self.phases.lock().put(date, info);
        info
    }

    /// Phase information for every day of `span`, keyed by date.
    ///
    /// Range length is not checked here; see [`LunarRequest`](crate::query::LunarRequest).
    pub fn lunar_data_for_range(&self, span: &DateSpan) -> BTreeMap<NaiveDate, LunarPhaseInfo> {
        debug!(target: "rcal::lunar", %span, days = span.len_days(), "computing lunar range");
        span.days().map(|day| (day, self.phase_for_date(day))).collect()
    }

    /// Drops every cached entry.
    pub fn clear_cache(&self) {
        self.months.lock().clear();
        self.phases.lock().clear();
    }
}

impl<M: IlluminationModel + RiseSetModel> LunarEngine<M> {
    /// Moonrise and moonset on `date` for `observer`. Not cached.
    pub fn moon_times(&self, date: NaiveDate, observer: GeoPoint) -> MoonTimes {
        self.model.moon_times(date, observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunar::ephemeris::MoonIllumination;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Counts evaluations so tests can see the cache at work.
    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl IlluminationModel for Counting {
        fn illumination(&self, at: DateTime<Utc>) -> MoonIllumination {
            self.calls.fetch_add(1, Ordering::Relaxed);
            AnalyticMoon.illumination(at)
        }
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LunarEngine>();
    }

    #[test]
    fn synodic_month_is_memoized() {
        let engine = LunarEngine::new(Counting::default(), LunarConfig::default());
        let first = engine.synodic_month(ymd(2024, 1, 20));
        let calls = engine.model().calls.load(Ordering::Relaxed);
        assert!(calls > 0);
        let second = engine.synodic_month(ymd(2024, 1, 20));
        assert_eq!(first, second);
        assert_eq!(engine.model().calls.load(Ordering::Relaxed), calls);
    }

    #[test]
    fn search_stays_bounded() {
        let engine = LunarEngine::new(Counting::default(), LunarConfig::default());
        engine.previous_new_moon(ymd(2024, 1, 25));
        // one extra evaluation for the slope at the origin
        assert!(engine.model().calls.load(Ordering::Relaxed) <= 33);
    }

    #[test]
    fn clear_cache_forces_recompute() {
        let engine = LunarEngine::new(Counting::default(), LunarConfig::default());
        engine.phase_for_date(ymd(2024, 5, 1));
        engine.clear_cache();
        engine.phase_for_date(ymd(2024, 5, 1));
        assert_eq!(engine.model().calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn range_covers_every_day() {
        let engine = LunarEngine::default();
        let span = DateSpan::new(ymd(2024, 2, 1), ymd(2024, 2, 29)).unwrap();
        let data = engine.lunar_data_for_range(&span);
        assert_eq!(data.len(), 29);
        assert_eq!(data.keys().next(), Some(&ymd(2024, 2, 1)));
        assert_eq!(data.keys().last(), Some(&ymd(2024, 2, 29)));
    }

    #[test]
    fn zero_capacity_still_works() {
        let config = LunarConfig {
            cache_capacity: 0,
            ..LunarConfig::default()
        };
        let engine = LunarEngine::new(AnalyticMoon, config);
        let month = engine.synodic_month(ymd(2024, 1, 11));
        assert_eq!(month.start.date_naive(), ymd(2024, 1, 11));
    }
}
