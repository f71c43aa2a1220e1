// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Locations of externally supplied records and how they are labelled at
//! each spatial granularity.
//!
//! Records carry a breadcrumb such as
//! `"Earth > Europe > Germany > Berlin > Mitte"`. The label shown for a record
//! is the breadcrumb cut down to the effective [`SpatialGranularity`]:
//!
//! | Granularity             | Label                                      |
//! |-------------------------|--------------------------------------------|
//! | `Planet`                | segment 0, else `"Earth"`                  |
//! | `Continent`             | segment 1, else 0                          |
//! | `Bioregion`, `Country`  | segment 2, else 1                          |
//! | `Region`                | segment 3, else 2                          |
//! | `City`                  | segment 3, else 2, else the raw location   |
//! | `Neighborhood`          | last two segments joined with `", "`       |
//! | `Address`, `Coordinates`| the raw location string                    |
//!
//! Missing segments fall back to the display name.

use crate::error::{Error, Result};
use crate::granularity::SpatialGranularity;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Separator between breadcrumb segments.
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    /// Degrees north, `-90..=90`.
    pub latitude: f64,
    /// Degrees east, `-180..=180`.
    pub longitude: f64,
}

impl GeoPoint {
    /// Default map centre when there is nothing to frame.
    pub const WORLD_CENTER: Self = Self {
        latitude: 30.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidCoordinate(format!(
                "latitude {latitude} outside -90..=90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinate(format!(
                "longitude {longitude} outside -180..=180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Where a record happens.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventLocation {
    /// Location exactly as entered.
    pub raw: Option<String>,
    /// Short human name.
    pub display: Option<String>,
    /// Hierarchy from planet downwards, joined by [`BREADCRUMB_SEPARATOR`].
    pub breadcrumb: Option<String>,
    pub is_virtual: bool,
    pub virtual_platform: Option<String>,
    pub coordinates: Option<GeoPoint>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl EventLocation {
    /// Breadcrumb segments, empty when there is no breadcrumb.
    pub fn segments(&self) -> Vec<&str> {
        non_empty(&self.breadcrumb)
            .map(|b| b.split(BREADCRUMB_SEPARATOR).collect())
            .unwrap_or_default()
    }

    /// Label for this location at `spatial`. Empty when nothing is known.
    pub fn semantic_label(&self, spatial: SpatialGranularity) -> String {
        use SpatialGranularity::*;

        let raw = non_empty(&self.raw);
        let display = non_empty(&self.display);

        if raw.is_none() && display.is_none() {
            if self.is_virtual {
                return non_empty(&self.virtual_platform)
                    .unwrap_or("Virtual")
                    .to_owned();
            }
            return String::new();
        }

        let segments = self.segments();
        if segments.is_empty() {
            return display.or(raw).unwrap_or_default().to_owned();
        }
        let segment = |i: usize| segments.get(i).copied().filter(|s| !s.is_empty());

        let label = match spatial {
            Planet => segment(0).or(Some("Earth")),
            Continent => segment(1).or(segment(0)).or(display),
            Bioregion | Country => segment(2).or(segment(1)).or(display),
            Region => segment(3).or(segment(2)).or(display),
            City => segment(3).or(segment(2)).or(display).or(raw),
            Neighborhood => {
                let tail = &segments[segments.len().saturating_sub(2)..];
                return Some(tail.join(", "))
                    .filter(|s| !s.is_empty())
                    .or_else(|| display.or(raw).map(str::to_owned))
                    .unwrap_or_default();
            }
            Address | Coordinates => raw.or(display),
        };
        label.unwrap_or_default().to_owned()
    }
}

/// Anything with a location.
pub trait Located {
    fn location(&self) -> &EventLocation;
}

impl Located for EventLocation {
    fn location(&self) -> &EventLocation {
        self
    }
}

/// Records sharing one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup<'a, T> {
    pub label: String,
    pub records: Vec<&'a T>,
}

/// Groups `records` by their label at `spatial`.
///
/// Groups appear in the order their label is first seen; records without a
/// label are left out.
pub fn group_by_location<T: Located>(
    records: &[T],
    spatial: SpatialGranularity,
) -> Vec<LocationGroup<'_, T>> {
    let mut groups: Vec<LocationGroup<'_, T>> = Vec::new();
    for record in records {
        let label = record.location().semantic_label(spatial);
        if label.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.records.push(record),
            None => groups.push(LocationGroup {
                label,
                records: vec![record],
            }),
        }
    }
    groups
}

/// Where a map should look for a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl MapView {
    /// Centroid of `points` at the zoom of `spatial`, or the world centre
    /// when there are no points.
    pub fn for_points<I>(points: I, spatial: SpatialGranularity) -> Self
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let (sum_lat, sum_lng, count) = points
            .into_iter()
            .fold((0.0, 0.0, 0usize), |(lat, lng, n), p| {
                (lat + p.latitude, lng + p.longitude, n + 1)
            });
        let center = if count == 0 {
            GeoPoint::WORLD_CENTER
        } else {
            GeoPoint {
                latitude: sum_lat / count as f64,
                longitude: sum_lng / count as f64,
            }
        };
        Self {
            center,
            zoom: spatial.map_zoom(),
        }
    }

    /// Frames the located records that carry coordinates.
    pub fn for_records<T: Located>(records: &[T], spatial: SpatialGranularity) -> Self {
        Self::for_points(
            records.iter().filter_map(|r| r.location().coordinates),
            spatial,
        )
    }
}
