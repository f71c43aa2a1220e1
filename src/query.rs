// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar query parsing and responses.
//!
//! A request is built from string key/value parameters:
//!
//! | Parameters        | Query                                    |
//! |-------------------|------------------------------------------|
//! | `start` + `end`   | every day of the inclusive range         |
//! | `date`            | one day, with its synodic month          |
//! | none of the above | today                                    |
//! | `lat` + `lng`     | adds moonrise/moonset to single-day data |
//!
//! All validation happens here; the engine itself never fails.

use crate::config::LunarConfig;
use crate::error::{Error, Result};
use crate::location::GeoPoint;
use crate::lunar::{
    IlluminationModel, LunarEngine, LunarPhaseInfo, MoonTimes, RiseSetModel, SynodicMonth,
};
use crate::span::DateSpan;
use chrono::{DateTime, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which days a request asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LunarQuery {
    Today,
    Date(NaiveDate),
    Range(DateSpan),
}

/// A validated lunar request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarRequest {
    pub query: LunarQuery,
    pub observer: Option<GeoPoint>,
}

/// Parses `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(input).map(|dt| dt.date_naive()))
        .map_err(|_| Error::InvalidDate(input.to_owned()))
}

fn parse_degrees(name: &str, input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidCoordinate(format!("{name} {input:?} is not a number")))
}

impl LunarRequest {
    /// Builds a request from query parameters. Unknown keys are ignored; a
    /// repeated key keeps its last value.
    ///
    /// Ranges longer than `config.max_range_days` are rejected.
    pub fn from_params<'a, I>(params: I, config: &LunarConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (mut date, mut start, mut end, mut lat, mut lng) = (None, None, None, None, None);
        for (key, value) in params {
            match key {
                "date" => date = Some(value),
                "start" => start = Some(value),
                "end" => end = Some(value),
                "lat" => lat = Some(value),
                "lng" | "lon" => lng = Some(value),
                _ => {}
            }
        }

        let query = match (start, end, date) {
            (Some(start), Some(end), _) => LunarQuery::Range(DateSpan::bounded(
                parse_date(start)?,
                parse_date(end)?,
                config.max_range_days,
            )?),
            (Some(_), None, _) | (None, Some(_), _) => return Err(Error::IncompleteRange),
            (None, None, Some(date)) => LunarQuery::Date(parse_date(date)?),
            (None, None, None) => LunarQuery::Today,
        };

        let observer = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(
                parse_degrees("lat", lat)?,
                parse_degrees("lng", lng)?,
            )?),
            (None, None) => None,
            _ => {
                return Err(Error::InvalidCoordinate(
                    "`lat` and `lng` must be given together".to_owned(),
                ))
            }
        };

        Ok(Self { query, observer })
    }
}

/// Phase, lunation and optional rise/set for one day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayReport {
    pub date: NaiveDate,
    pub phase: LunarPhaseInfo,
    pub synodic_month: SynodicMonth,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub moon_times: Option<MoonTimes>,
}

/// Phase information for each day of a range, keyed `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub count: usize,
    pub phases: BTreeMap<String, LunarPhaseInfo>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum LunarResponse {
    Day(DayReport),
    Range(RangeReport),
}

impl<M: IlluminationModel> LunarEngine<M> {
    /// [`LunarRequest::from_params`] with this engine's configuration.
    pub fn parse_request<'a, I>(&self, params: I) -> Result<LunarRequest>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        LunarRequest::from_params(params, self.config())
    }
}

impl<M: IlluminationModel + RiseSetModel> LunarEngine<M> {
    /// Answers `request`, resolving [`LunarQuery::Today`] to `today`.
    pub fn answer(&self, request: &LunarRequest, today: NaiveDate) -> LunarResponse {
        let day = match request.query {
            LunarQuery::Range(span) => {
                debug!(target: "rcal::query", %span, "lunar range query");
                let phases: BTreeMap<String, LunarPhaseInfo> = self
                    .lunar_data_for_range(&span)
                    .into_iter()
                    .map(|(day, info)| (day.format("%Y-%m-%d").to_string(), info))
                    .collect();
                return LunarResponse::Range(RangeReport {
                    start: span.start,
                    end: span.end,
                    count: phases.len(),
                    phases,
                });
            }
            LunarQuery::Date(date) => date,
            LunarQuery::Today => today,
        };
        debug!(
            target: "rcal::query",
            date = %day,
            observer = ?request.observer,
            "lunar day query"
        );
        LunarResponse::Day(DayReport {
            date: day,
            phase: self.phase_for_date(day),
            synodic_month: self.synodic_month(day),
            moon_times: request.observer.map(|point| self.moon_times(day, point)),
        })
    }
}
