// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-precision analytic Sun and Moon model.
//!
//! Mean-element series good to a fraction of a degree: enough to locate the
//! day of a new moon and to time moonrise to a few minutes, far from
//! ephemeris grade. The model sits behind the [`IlluminationModel`] and
//! [`RiseSetModel`] traits so the synodic search can run over any source of
//! illumination.
//!
//! ## References
//! * Meeus, *Astronomical Algorithms* (2nd ed.), ch. 13, 25, 47, 48.
//! * Mean lunar elements after the simplified Brown theory.

use crate::julian::JulianDay;
use crate::location::GeoPoint;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Obliquity of the ecliptic at J2000, radians.
const OBLIQUITY: f64 = 23.4397 * PI / 180.0;

/// Mean Sun–Earth distance in km.
const SUN_DISTANCE_KM: f64 = 149_598_000.0;

/// Altitude of the Moon's centre at rise/set: parallax less refraction and semidiameter.
const MOONRISE_ALTITUDE: f64 = 0.133 * PI / 180.0;

// ═══════════════════════════════════════════════════════════════════════════
// Traits
// ═══════════════════════════════════════════════════════════════════════════

/// Source of lunar illumination.
///
/// The synodic search only requires that `fraction` be continuous and
/// monotonic between its extrema.
pub trait IlluminationModel {
    /// Illumination state of the Moon at `at`.
    fn illumination(&self, at: DateTime<Utc>) -> MoonIllumination;

    /// Illuminated fraction of the visible disk in `[0, 1]`.
    #[inline]
    fn fraction(&self, at: DateTime<Utc>) -> f64 {
        self.illumination(at).fraction
    }
}

/// Source of location-aware moonrise/moonset times.
pub trait RiseSetModel {
    /// Rise and set within the UTC day `date` as seen from `observer`.
    fn moon_times(&self, date: NaiveDate, observer: GeoPoint) -> MoonTimes;
}

// ═══════════════════════════════════════════════════════════════════════════
// Result types
// ═══════════════════════════════════════════════════════════════════════════

/// Lit part of the lunar disk.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoonIllumination {
    /// Illuminated fraction, 0 at new moon and 1 at full moon.
    pub fraction: f64,
    /// Position in the cycle: 0 new, 0.25 first quarter, 0.5 full, 0.75 last quarter.
    pub phase: f64,
    /// Midpoint angle of the bright limb in radians; negative while waxing.
    pub angle: f64,
}

/// Topocentric position of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoonPosition {
    /// Radians, measured from south towards west.
    pub azimuth: f64,
    /// Radians above the horizon, refraction included.
    pub altitude: f64,
    /// Earth–Moon distance in km.
    pub distance_km: f64,
    /// Radians.
    pub parallactic_angle: f64,
}

/// Moonrise and moonset over one UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoonTimes {
    pub rise: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
    /// No rise or set and the Moon stays above the horizon.
    pub always_up: bool,
    /// No rise or set and the Moon stays below the horizon.
    pub always_down: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// Spherical helpers
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
struct Equatorial {
    right_ascension: f64,
    declination: f64,
}

impl Equatorial {
    fn from_ecliptic(longitude: f64, latitude: f64) -> Self {
        let (sin_e, cos_e) = OBLIQUITY.sin_cos();
        Self {
            right_ascension: (longitude.sin() * cos_e - latitude.tan() * sin_e)
                .atan2(longitude.cos()),
            declination: (latitude.sin() * cos_e + latitude.cos() * sin_e * longitude.sin())
                .asin(),
        }
    }
}

fn sidereal_time(d: f64, west_longitude: f64) -> f64 {
    (280.16 + 360.985_623_5 * d).to_radians() - west_longitude
}

fn altitude(hour_angle: f64, latitude: f64, declination: f64) -> f64 {
    (latitude.sin() * declination.sin() + latitude.cos() * declination.cos() * hour_angle.cos())
        .asin()
}

fn azimuth(hour_angle: f64, latitude: f64, declination: f64) -> f64 {
    hour_angle
        .sin()
        .atan2(hour_angle.cos() * latitude.sin() - declination.tan() * latitude.cos())
}

/// Bennett's refraction formula, for altitudes in radians.
fn refraction(altitude: f64) -> f64 {
    let h = altitude.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

fn sun_coords(d: f64) -> Equatorial {
    let mean_anomaly = (357.5291 + 0.985_600_28 * d).to_radians();
    let center = (1.9148 * mean_anomaly.sin()
        + 0.02 * (2.0 * mean_anomaly).sin()
        + 0.0003 * (3.0 * mean_anomaly).sin())
    .to_radians();
    let perihelion = 102.9372_f64.to_radians();
    let longitude = mean_anomaly + center + perihelion + PI;
    Equatorial::from_ecliptic(longitude, 0.0)
}

fn moon_coords(d: f64) -> (Equatorial, f64) {
    let mean_longitude = (218.316 + 13.176_396 * d).to_radians();
    let mean_anomaly = (134.963 + 13.064_993 * d).to_radians();
    let node_distance = (93.272 + 13.229_350 * d).to_radians();

    let longitude = mean_longitude + 6.289_f64.to_radians() * mean_anomaly.sin();
    let latitude = 5.128_f64.to_radians() * node_distance.sin();
    let distance_km = 385_001.0 - 20_905.0 * mean_anomaly.cos();

    (Equatorial::from_ecliptic(longitude, latitude), distance_km)
}

fn days_since_j2000(at: DateTime<Utc>) -> f64 {
    JulianDay::from_utc(at).days_since_j2000().value()
}

// ═══════════════════════════════════════════════════════════════════════════
// AnalyticMoon
// ═══════════════════════════════════════════════════════════════════════════

/// The default illumination and rise/set model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticMoon;

impl AnalyticMoon {
    /// Azimuth, refracted altitude, distance and parallactic angle at `at`.
    pub fn position(&self, at: DateTime<Utc>, observer: GeoPoint) -> MoonPosition {
        let west_longitude = -observer.longitude.to_radians();
        let latitude = observer.latitude.to_radians();
        let d = days_since_j2000(at);

        let (moon, distance_km) = moon_coords(d);
        let hour_angle = sidereal_time(d, west_longitude) - moon.right_ascension;
        let geometric = altitude(hour_angle, latitude, moon.declination);
        let parallactic_angle = hour_angle.sin().atan2(
            latitude.tan() * moon.declination.cos()
                - moon.declination.sin() * hour_angle.cos(),
        );

        MoonPosition {
            azimuth: azimuth(hour_angle, latitude, moon.declination),
            altitude: geometric + refraction(geometric),
            distance_km,
            parallactic_angle,
        }
    }
}

impl IlluminationModel for AnalyticMoon {
    fn illumination(&self, at: DateTime<Utc>) -> MoonIllumination {
        let d = days_since_j2000(at);
        let sun = sun_coords(d);
        let (moon, moon_distance) = moon_coords(d);

        let delta_ra = sun.right_ascension - moon.right_ascension;
        let elongation = (sun.declination.sin() * moon.declination.sin()
            + sun.declination.cos() * moon.declination.cos() * delta_ra.cos())
        .clamp(-1.0, 1.0)
        .acos();
        let incidence = (SUN_DISTANCE_KM * elongation.sin())
            .atan2(moon_distance - SUN_DISTANCE_KM * elongation.cos());
        let angle = (sun.declination.cos() * delta_ra.sin()).atan2(
            sun.declination.sin() * moon.declination.cos()
                - sun.declination.cos() * moon.declination.sin() * delta_ra.cos(),
        );
        let waxing_sign = if angle < 0.0 { -1.0 } else { 1.0 };

        MoonIllumination {
            fraction: (1.0 + incidence.cos()) / 2.0,
            phase: 0.5 + 0.5 * incidence * waxing_sign / PI,
            angle,
        }
    }
}

impl RiseSetModel for AnalyticMoon {
    /// Scans the day in two-hour windows and fits a parabola through three
    /// altitude samples to find horizon crossings.
    fn moon_times(&self, date: NaiveDate, observer: GeoPoint) -> MoonTimes {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        let at_hour =
            |hours: f64| midnight + chrono::Duration::milliseconds((hours * 3_600_000.0) as i64);
        let height =
            |hours: f64| self.position(at_hour(hours), observer).altitude - MOONRISE_ALTITUDE;

        let mut rise: Option<f64> = None;
        let mut set: Option<f64> = None;
        let mut h0 = height(0.0);
        let mut vertex_height = 0.0;

        let mut hour = 1.0;
        while hour <= 24.0 {
            let h1 = height(hour);
            let h2 = height(hour + 1.0);

            let a = (h0 + h2) / 2.0 - h1;
            let b = (h2 - h0) / 2.0;
            let vertex = -b / (2.0 * a);
            vertex_height = (a * vertex + b) * vertex + h1;
            let discriminant = b * b - 4.0 * a * h1;

            let mut roots = 0;
            let (mut x1, mut x2) = (0.0, 0.0);
            if discriminant >= 0.0 {
                let dx = discriminant.sqrt() / (a.abs() * 2.0);
                x1 = vertex - dx;
                x2 = vertex + dx;
                if x1.abs() <= 1.0 {
                    roots += 1;
                }
                if x2.abs() <= 1.0 {
                    roots += 1;
                }
                if x1 < -1.0 {
                    x1 = x2;
                }
            }

            match roots {
                1 if h0 < 0.0 => rise = Some(hour + x1),
                1 => set = Some(hour + x1),
                2 => {
                    let (up, down) = if vertex_height < 0.0 { (x2, x1) } else { (x1, x2) };
                    rise = Some(hour + up);
                    set = Some(hour + down);
                }
                _ => {}
            }

            if rise.is_some() && set.is_some() {
                break;
            }
            h0 = h2;
            hour += 2.0;
        }

        let neither = rise.is_none() && set.is_none();
        MoonTimes {
            rise: rise.map(at_hour),
            set: set.map(at_hour),
            always_up: neither && vertex_height > 0.0,
            always_down: neither && vertex_height <= 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::sample_instant;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn illumination_is_a_fraction() {
        let moon = AnalyticMoon;
        for day in ymd(2024, 1, 1).iter_days().take(60) {
            let lit = moon.illumination(sample_instant(day));
            assert!((0.0..=1.0).contains(&lit.fraction), "{day}: {}", lit.fraction);
            assert!((0.0..=1.0).contains(&lit.phase), "{day}: {}", lit.phase);
        }
    }

    #[test]
    fn new_and_full_moon_extremes() {
        let moon = AnalyticMoon;
        // New moon 2024-01-11 11:57 UTC, full moon 2024-01-25 17:54 UTC.
        assert!(moon.fraction(sample_instant(ymd(2024, 1, 11))) < 0.01);
        assert!(moon.fraction(sample_instant(ymd(2024, 1, 25))) > 0.98);
    }

    #[test]
    fn waxing_angle_is_negative() {
        let moon = AnalyticMoon;
        let first_quarter = moon.illumination(sample_instant(ymd(2024, 1, 18)));
        let last_quarter = moon.illumination(sample_instant(ymd(2024, 2, 2)));
        assert!(first_quarter.angle < 0.0);
        assert!(first_quarter.phase < 0.5);
        assert!(last_quarter.angle > 0.0);
        assert!(last_quarter.phase > 0.5);
    }

    #[test]
    fn position_distance_is_lunar() {
        let observer = GeoPoint::new(52.52, 13.405).unwrap();
        let position = AnalyticMoon.position(sample_instant(ymd(2024, 3, 1)), observer);
        assert!((356_000.0..=407_000.0).contains(&position.distance_km));
        assert!(position.altitude.abs() <= PI / 2.0 + 0.01);
    }

    #[test]
    fn mid_latitude_sees_moonrise_within_two_days() {
        let observer = GeoPoint::new(40.7128, -74.006).unwrap();
        let start = ymd(2024, 5, 1);
        for day in start.iter_days().take(10) {
            let times = AnalyticMoon.moon_times(day, observer);
            assert!(!times.always_up && !times.always_down, "{day}: {times:?}");
            let next = AnalyticMoon.moon_times(day.succ_opt().unwrap(), observer);
            assert!(times.rise.is_some() || next.rise.is_some());
            for instant in times.rise.iter().chain(times.set.iter()) {
                assert!(*instant >= sample_instant(day) - chrono::Duration::hours(12));
                assert!(*instant <= sample_instant(day) + chrono::Duration::hours(14));
            }
        }
    }

    #[test]
    fn polar_summer_moon_can_stay_up_or_down() {
        let observer = GeoPoint::new(89.0, 0.0).unwrap();
        let times = AnalyticMoon.moon_times(ymd(2024, 1, 25), observer);
        let crossed = times.rise.is_some() || times.set.is_some();
        assert!(times.always_up || times.always_down || crossed);
        assert!(!(times.always_up && times.always_down));
    }
}
