#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical weather signal record.
//!
//! Every weather provider normalizes its response into a [`WeatherSignal`]
//! so the spread model never sees provider-specific shapes. Values are not
//! range-checked; consumers clamp where their formulas require it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provenance tag of the fixed demo record.
pub const FALLBACK_SOURCE: &str = "demo-fallback";

/// A normalized point-in-time weather observation for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSignal {
    /// Wind speed in km/h.
    pub wind_speed_kmph: f64,
    /// Compass bearing the wind blows *from*, in degrees. Not normalized.
    pub wind_bearing_deg: f64,
    /// Relative humidity, nominally 0-100.
    pub humidity_pct: f64,
    /// Shallow soil moisture as a volumetric fraction, nominally 0-1.
    pub soil_moisture: f64,
    /// Fuel dryness/load proxy, nominally 0-1.
    pub fuel_index: f64,
    /// When the observation was taken, if known.
    pub observed_at: Option<DateTime<Utc>>,
    /// Which provider produced this record.
    pub source: String,
}

impl WeatherSignal {
    /// The record used when no provider answers.
    ///
    /// These literals double as a test fixture and must not drift.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            wind_speed_kmph: 18.0,
            wind_bearing_deg: 250.0,
            humidity_pct: 62.0,
            soil_moisture: 0.22,
            fuel_index: 0.4,
            observed_at: None,
            source: FALLBACK_SOURCE.to_string(),
        }
    }

    /// Whether this record is the demo fallback rather than a provider
    /// answer.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == FALLBACK_SOURCE
    }
}
