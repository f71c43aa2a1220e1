// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Synodic-month boundaries and the eight phase instants.
//!
//! New moons are the minima of the illumination function. The locator scans
//! whole days (sampled at midday UTC) over a bounded window and stops as soon
//! as illumination has climbed [`rise_threshold`] above a running minimum
//! that is itself below [`minimum_threshold`].
//!
//! The running minimum is only tracked while the scan is heading *into* a
//! minimum. Scanning backward from a date past full moon would otherwise
//! start on a descending slope and report the first sample as a minimum;
//! instead the scan walks over the bright half until values start to fall.
//!
//! [`rise_threshold`]: crate::LunarConfig::rise_threshold
//! [`minimum_threshold`]: crate::LunarConfig::minimum_threshold

use super::ephemeris::IlluminationModel;
use super::phase::{mean_lunar_age, LunarPhase, LunarPhaseInfo};
use crate::config::LunarConfig;
use crate::julian::{days_between, sample_instant};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use qtty::Days;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of a boundary scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// From the origin itself towards the past.
    Backward,
    /// From the day after the origin towards the future.
    Forward,
}

fn shift(day: NaiveDate, by: i64) -> Option<NaiveDate> {
    day.checked_add_signed(TimeDelta::try_days(by)?)
}

fn locate_minimum<M>(model: &M, origin: NaiveDate, scan: Scan, config: &LunarConfig) -> NaiveDate
where
    M: IlluminationModel + ?Sized,
{
    let sample = |day: NaiveDate| model.fraction(sample_instant(day));
    let window = i64::from(config.window_days);

    // backward includes the origin itself, forward starts the day after
    let (first, step, samples) = match scan {
        Scan::Backward => (0, -1, window + 1),
        Scan::Forward => (1, 1, window),
    };

    let at_origin = sample(origin);
    let after_origin = shift(origin, 1).map(sample).unwrap_or(at_origin);
    let mut tracking = match scan {
        Scan::Backward => after_origin >= at_origin,
        Scan::Forward => at_origin > after_origin,
    };

    let mut best: Option<(NaiveDate, f64)> = None;
    let mut lowest: Option<(NaiveDate, f64)> = None;
    let mut previous: Option<f64> = None;

    for offset in 0..samples {
        let Some(day) = shift(origin, first + step * offset) else {
            break;
        };
        let value = sample(day);

        if lowest.map_or(true, |(_, low)| value < low) {
            lowest = Some((day, value));
        }

        let descending = previous.is_some_and(|p| value < p);
        previous = Some(value);
        if !tracking {
            if !descending {
                continue;
            }
            tracking = true;
        }

        if best.map_or(true, |(_, min)| value < min) {
            best = Some((day, value));
        }
        if let Some((min_day, min)) = best {
            if value > min + config.rise_threshold && min < config.minimum_threshold {
                trace!(target: "rcal::lunar", %origin, ?scan, %min_day, min, "new moon located");
                return min_day;
            }
        }
    }

    let fallback = best.or(lowest).map_or(origin, |(day, _)| day);
    debug!(
        target: "rcal::lunar",
        %origin,
        ?scan,
        %fallback,
        window,
        "no qualifying minimum in window; using lowest sample"
    );
    fallback
}

/// Most recent new moon on or before `date`, at the midday sample of its day.
pub fn find_previous_new_moon<M>(model: &M, date: NaiveDate, config: &LunarConfig) -> DateTime<Utc>
where
    M: IlluminationModel + ?Sized,
{
    sample_instant(locate_minimum(model, date, Scan::Backward, config))
}

/// First new moon after `date`, at the midday sample of its day.
pub fn find_next_new_moon<M>(model: &M, date: NaiveDate, config: &LunarConfig) -> DateTime<Utc>
where
    M: IlluminationModel + ?Sized,
{
    sample_instant(locate_minimum(model, date, Scan::Forward, config))
}

/// One phase of a synodic month and when it falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseInstant {
    pub phase: LunarPhase,
    pub instant: DateTime<Utc>,
}

/// The lunation containing a date, bounded by two consecutive new moons.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynodicMonth {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_days: f64,
    /// The eight phases spaced at eighths of the interval, `phases[0].instant == start`.
    pub phases: [PhaseInstant; 8],
}

impl SynodicMonth {
    /// Lunation containing `date`.
    ///
    /// The end boundary is searched forward from the start boundary, not from
    /// `date`, so both ends always belong to the same cycle.
    pub fn containing<M>(model: &M, date: NaiveDate, config: &LunarConfig) -> Self
    where
        M: IlluminationModel + ?Sized,
    {
        let start = find_previous_new_moon(model, date, config);
        let end = find_next_new_moon(model, start.date_naive(), config);
        Self::between(start, end)
    }

    /// Builds the month from known boundaries by linear interpolation.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let duration = days_between(start, end);
        let phases = LunarPhase::ALL.map(|phase| {
            let offset = duration * (phase.index() as f64 / 8.0);
            let millis = (offset.value() * 86_400_000.0).round() as i64;
            PhaseInstant {
                phase,
                instant: start + TimeDelta::milliseconds(millis),
            }
        });
        Self {
            start,
            end,
            duration_days: duration.value(),
            phases,
        }
    }

    /// `end - start`.
    #[inline]
    pub fn duration(&self) -> Days {
        Days::new(self.duration_days)
    }

    /// Instant of `phase` within this month.
    #[inline]
    pub fn instant_of(&self, phase: LunarPhase) -> DateTime<Utc> {
        self.phases[phase.index()].instant
    }

    /// Whether `at` lies in `[start, end)`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Phase name, illumination and age for a calendar day.
pub fn lunar_phase_for_date<M>(model: &M, date: NaiveDate) -> LunarPhaseInfo
where
    M: IlluminationModel + ?Sized,
{
    let at = sample_instant(date);
    let age = mean_lunar_age(at);
    LunarPhaseInfo {
        phase: LunarPhase::from_age(age),
        illumination: model.fraction(at),
        age_days: age.value(),
        is_eclipse: false,
        eclipse: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunar::ephemeris::{AnalyticMoon, MoonIllumination};
    use std::f64::consts::TAU;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Idealised moon: illumination is a raised cosine with a fixed period.
    struct CosineMoon {
        new_moon: DateTime<Utc>,
        period_days: f64,
    }

    impl IlluminationModel for CosineMoon {
        fn illumination(&self, at: DateTime<Utc>) -> MoonIllumination {
            let elapsed = days_between(self.new_moon, at).value();
            let cycle = (elapsed / self.period_days).rem_euclid(1.0);
            MoonIllumination {
                fraction: (1.0 - (TAU * cycle).cos()) / 2.0,
                phase: cycle,
                angle: 0.0,
            }
        }
    }

    #[test]
    fn locates_january_2024_lunation() {
        let config = LunarConfig::default();
        let month = SynodicMonth::containing(&AnalyticMoon, ymd(2024, 1, 11), &config);
        assert_eq!(month.start.date_naive(), ymd(2024, 1, 11));
        let end = month.end.date_naive();
        assert!(end == ymd(2024, 2, 9) || end == ymd(2024, 2, 10), "{end}");
    }

    #[test]
    fn idealised_cycle_is_recovered() {
        let moon = CosineMoon {
            new_moon: sample_instant(ymd(2024, 3, 5)),
            period_days: 29.5,
        };
        let config = LunarConfig::default();
        let month = SynodicMonth::containing(&moon, ymd(2024, 3, 20), &config);
        assert_eq!(month.start.date_naive(), ymd(2024, 3, 5));
        let gap = (month.end.date_naive() - month.start.date_naive()).num_days();
        assert!(gap == 29 || gap == 30, "gap {gap}");
    }

    #[test]
    fn forward_search_skips_the_neighbouring_day() {
        let config = LunarConfig::default();
        for day in ymd(2024, 1, 1).iter_days().take(120) {
            let start = find_previous_new_moon(&AnalyticMoon, day, &config);
            let end = find_next_new_moon(&AnalyticMoon, start.date_naive(), &config);
            let gap = (end - start).num_days();
            assert!((27..=31).contains(&gap), "{day}: {start} .. {end}");
            assert!(start.date_naive() <= day && day <= end.date_naive());
        }
    }

    #[test]
    fn flat_model_falls_back_to_lowest_sample() {
        struct Dark;
        impl IlluminationModel for Dark {
            fn illumination(&self, _: DateTime<Utc>) -> MoonIllumination {
                MoonIllumination { fraction: 0.0, phase: 0.0, angle: 0.0 }
            }
        }
        let config = LunarConfig::default();
        let at = find_previous_new_moon(&Dark, ymd(2024, 6, 1), &config);
        assert_eq!(at.date_naive(), ymd(2024, 6, 1));
    }

    #[test]
    fn phases_are_evenly_spaced() {
        let start = sample_instant(ymd(2024, 1, 11));
        let end = sample_instant(ymd(2024, 2, 9));
        let month = SynodicMonth::between(start, end);
        assert_eq!(month.phases[0].instant, start);
        assert!((month.duration().value() - 29.0).abs() < 1e-9);
        for pair in month.phases.windows(2) {
            assert!(pair[0].instant < pair[1].instant);
            let gap = days_between(pair[0].instant, pair[1].instant).value();
            assert!((gap - 29.0 / 8.0).abs() < 1e-6);
        }
        assert_eq!(month.instant_of(LunarPhase::FullMoon), start + TimeDelta::hours(29 * 12));
        assert!(month.contains(start));
        assert!(!month.contains(end));
    }

    #[test]
    fn phase_info_has_no_eclipse() {
        let info = lunar_phase_for_date(&AnalyticMoon, ymd(2024, 1, 25));
        assert_eq!(info.phase, LunarPhase::FullMoon);
        assert!(info.illumination > 0.95);
        assert!(!info.is_eclipse);
        assert_eq!(info.eclipse, None);
    }
}
