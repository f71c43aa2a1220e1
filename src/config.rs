// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tuning knobs for the lunar engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Search and cache parameters.
///
/// | Field               | Default | Meaning                                             |
/// |---------------------|---------|-----------------------------------------------------|
/// | `window_days`       | 30      | Days scanned per boundary search                    |
/// | `rise_threshold`    | 0.05    | Rise above the running minimum that ends a search   |
/// | `minimum_threshold` | 0.05    | Largest illumination accepted as a new moon         |
/// | `max_range_days`    | 366     | Longest `end - start` accepted by range queries     |
/// | `cache_capacity`    | 256     | Entries per LRU cache in [`LunarEngine`]            |
///
/// [`LunarEngine`]: crate::lunar::LunarEngine
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LunarConfig {
    pub window_days: u32,
    pub rise_threshold: f64,
    pub minimum_threshold: f64,
    pub max_range_days: i64,
    pub cache_capacity: usize,
}

impl LunarConfig {
    pub const DEFAULT: Self = Self {
        window_days: 30,
        rise_threshold: 0.05,
        minimum_threshold: 0.05,
        max_range_days: 366,
        cache_capacity: 256,
    };
}

impl Default for LunarConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
